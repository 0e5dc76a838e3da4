//! Process configuration with TOML file support.

use std::path::Path;

use serde::Deserialize;

use tally_chain::ChainConfig;

/// Default seconds between monitor cycles.
fn default_interval_secs() -> u64 {
    300
}

/// Wallet section: the signing credential, loaded once at startup.
#[derive(Deserialize)]
pub struct WalletSection {
    /// Hex-encoded secp256k1 private key, with or without a 0x prefix.
    pub private_key: String,
}

/// Oracle section: loop tuning.
#[derive(Clone, Debug, Deserialize)]
pub struct OracleSection {
    /// Seconds to sleep between cycles.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

impl Default for OracleSection {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
        }
    }
}

/// Full process configuration.
///
/// Loaded once from a TOML file; every section becomes an immutable value
/// passed into the relevant constructor. There is no ambient global state.
#[derive(Deserialize)]
pub struct Config {
    pub chain: ChainConfig,
    pub wallet: WalletSection,
    #[serde(default)]
    pub oracle: OracleSection,
}

impl Config {
    /// Read and parse the config file.
    pub fn from_toml_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .map_err(|e| anyhow::anyhow!("failed to parse {}: {e}", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"
        [chain]
        rpc_url = "http://localhost:8545"
        chain_id = 31337
        contract_address = "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed"

        [wallet]
        private_key = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80"
    "#;

    #[test]
    fn loads_from_file_with_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let config = Config::from_toml_file(file.path()).unwrap();
        assert_eq!(config.chain.chain_id, 31337);
        assert_eq!(config.oracle.interval_secs, 300);
        assert!(config.wallet.private_key.starts_with("0xac09"));
    }

    #[test]
    fn oracle_section_overrides_interval() {
        let toml = format!("{SAMPLE}\n[oracle]\ninterval_secs = 60\n");
        let config: Config = toml::from_str(&toml).unwrap();
        assert_eq!(config.oracle.interval_secs, 60);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(Config::from_toml_file(Path::new("/nonexistent/tally.toml")).is_err());
    }

    #[test]
    fn missing_wallet_section_is_an_error() {
        let toml = r#"
            [chain]
            rpc_url = "http://localhost:8545"
            chain_id = 1
            contract_address = "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed"
        "#;
        assert!(toml::from_str::<Config>(toml).is_err());
    }
}
