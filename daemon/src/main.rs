//! Tally daemon — entry point for the view-count oracle.
//!
//! `monitor` runs the long-lived oracle loop; the remaining subcommands are
//! one-shot contract operations and the wallet utility.

mod config;

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use clap::Parser;

use tally_chain::ContractClient;
use tally_crypto::{
    checksum_address, credential_from_mnemonic, credential_from_private, derive_key,
    generate_mnemonic,
};
use tally_oracle::{Monitor, ShutdownController};
use tally_source::YoutubeSource;
use tally_types::{Address, Credential, PrivateKey, StorageKey};

use config::Config;

#[derive(Parser)]
#[command(name = "tally-daemon", about = "View-count oracle daemon")]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, default_value = "tally.toml", env = "TALLY_CONFIG")]
    config: PathBuf,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, default_value = "info", env = "TALLY_LOG_LEVEL")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Monitor an identifier and update the contract when its value changes.
    Monitor {
        /// The video id to monitor.
        identifier: String,

        /// Seconds between cycles (defaults to the config file value).
        #[arg(long, env = "TALLY_INTERVAL")]
        interval: Option<u64>,
    },

    /// Set the indicator value for a storage key.
    Set {
        /// Storage key (32-byte hex).
        #[arg(long)]
        key: StorageKey,

        /// New indicator value.
        #[arg(long)]
        value: u128,
    },

    /// Transfer contract ownership.
    SetOwner {
        /// New owner address (0x-prefixed hex).
        #[arg(long)]
        address: Address,
    },

    /// Print the current contract owner.
    GetOwner,

    /// Print the indicator value for a storage key.
    GetIndicator {
        /// Storage key (32-byte hex).
        #[arg(long)]
        key: StorageKey,
    },

    /// Print the storage key derived from an identifier.
    DeriveKey {
        /// The identifier to hash.
        identifier: String,
    },

    /// Wallet utilities (one-shot, no chain connection).
    Wallet {
        #[command(subcommand)]
        action: WalletAction,
    },
}

#[derive(clap::Subcommand)]
enum WalletAction {
    /// Generate a new mnemonic and credential.
    Generate {
        /// Also write a `[wallet]` TOML snippet to this file.
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let Cli {
        config: config_path,
        log_level,
        command,
    } = Cli::parse();
    tally_utils::init_tracing(&log_level);

    match command {
        Command::Monitor {
            identifier,
            interval,
        } => {
            let config = Config::from_toml_file(&config_path)?;
            let credential = load_credential(&config)?;
            let interval_secs = interval.unwrap_or(config.oracle.interval_secs);

            let client = ContractClient::connect(config.chain, credential).await?;
            let source = YoutubeSource::new();
            let monitor = Monitor::new(
                &identifier,
                source,
                client,
                Duration::from_secs(interval_secs),
            );
            tracing::info!(
                identifier = %identifier,
                interval_secs,
                key = %monitor.key(),
                "starting monitor"
            );

            let (shutdown, signal) = ShutdownController::new();
            tokio::spawn(shutdown.wait_for_signal());
            monitor.run(signal).await;

            tracing::info!("tally daemon exited cleanly");
        }

        Command::Set { key, value } => {
            let client = connect(&config_path).await?;
            let receipt = client.set_indicator(&key, value).await?;
            println!("{}", receipt.transaction_hash);
        }

        Command::SetOwner { address } => {
            let client = connect(&config_path).await?;
            let receipt = client.set_owner(&address).await?;
            println!("{}", receipt.transaction_hash);
        }

        Command::GetOwner => {
            let client = connect(&config_path).await?;
            let owner = client.get_owner().await?;
            println!("{}", checksum_address(&owner));
        }

        Command::GetIndicator { key } => {
            let client = connect(&config_path).await?;
            match client.get_indicator(&key).await? {
                Some(value) => println!("{value}"),
                None => println!("not set"),
            }
        }

        Command::DeriveKey { identifier } => {
            println!("{}", derive_key(&identifier));
        }

        Command::Wallet { action } => match action {
            WalletAction::Generate { out } => {
                let mnemonic = generate_mnemonic()?;
                let credential = credential_from_mnemonic(&mnemonic)?;
                println!("MNEMONIC={mnemonic}");
                println!("PRIV_KEY=0x{}", hex_key(&credential));
                println!("ADDRESS={}", checksum_address(&credential.address));
                if let Some(path) = out {
                    let snippet =
                        format!("[wallet]\nprivate_key = \"0x{}\"\n", hex_key(&credential));
                    std::fs::write(&path, snippet).map_err(|e| {
                        anyhow::anyhow!("failed to write {}: {e}", path.display())
                    })?;
                    tracing::info!(path = %path.display(), "wrote wallet snippet");
                }
            }
        },
    }

    Ok(())
}

/// Load config and open the contract connection for a one-shot command.
async fn connect(config_path: &std::path::Path) -> anyhow::Result<ContractClient> {
    let config = Config::from_toml_file(config_path)?;
    let credential = load_credential(&config)?;
    Ok(ContractClient::connect(config.chain, credential).await?)
}

fn load_credential(config: &Config) -> anyhow::Result<Credential> {
    let private = PrivateKey::from_str(&config.wallet.private_key)
        .map_err(|e| anyhow::anyhow!("invalid wallet.private_key: {e}"))?;
    Ok(credential_from_private(private)?)
}

fn hex_key(credential: &Credential) -> String {
    credential
        .private
        .as_bytes()
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}
