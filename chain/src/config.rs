//! Chain connection configuration.

use serde::{Deserialize, Serialize};

use tally_types::Address;

/// Configuration for the chain connection and transaction policy.
///
/// Loaded once at startup from the TOML config file and passed into
/// [`crate::ContractClient::connect`]; immutable afterwards.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChainConfig {
    /// HTTP URL of the JSON-RPC endpoint.
    pub rpc_url: String,

    /// Expected chain id; the startup probe fails if the node disagrees.
    pub chain_id: u64,

    /// Address of the deployed indicator contract.
    pub contract_address: Address,

    /// Static gas limit for every write. No estimation, a documented
    /// design limitation.
    #[serde(default = "default_gas_limit")]
    pub gas_limit: u64,

    /// Static gas price in wei for every write.
    #[serde(default = "default_gas_price_wei")]
    pub gas_price_wei: u128,

    /// How long to wait for a confirmation before giving up.
    /// Unset means wait indefinitely, matching the original behavior.
    #[serde(default)]
    pub confirm_timeout_secs: Option<u64>,

    /// How often to poll for the receipt while waiting.
    #[serde(default = "default_confirm_poll_secs")]
    pub confirm_poll_secs: u64,
}

fn default_gas_limit() -> u64 {
    50_000
}

fn default_gas_price_wei() -> u128 {
    1_000_000_000 // 1 gwei
}

fn default_confirm_poll_secs() -> u64 {
    2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_toml_uses_defaults() {
        let cfg: ChainConfig = toml::from_str(
            r#"
            rpc_url = "http://localhost:8545"
            chain_id = 31337
            contract_address = "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.gas_limit, 50_000);
        assert_eq!(cfg.gas_price_wei, 1_000_000_000);
        assert_eq!(cfg.confirm_timeout_secs, None);
        assert_eq!(cfg.confirm_poll_secs, 2);
    }

    #[test]
    fn explicit_values_override_defaults() {
        let cfg: ChainConfig = toml::from_str(
            r#"
            rpc_url = "http://localhost:8545"
            chain_id = 11155111
            contract_address = "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed"
            gas_limit = 90000
            gas_price_wei = 2000000000
            confirm_timeout_secs = 120
            confirm_poll_secs = 5
            "#,
        )
        .unwrap();
        assert_eq!(cfg.gas_limit, 90_000);
        assert_eq!(cfg.confirm_timeout_secs, Some(120));
    }

    #[test]
    fn bad_contract_address_rejected() {
        let result: Result<ChainConfig, _> = toml::from_str(
            r#"
            rpc_url = "http://localhost:8545"
            chain_id = 1
            contract_address = "not-an-address"
            "#,
        );
        assert!(result.is_err());
    }
}
