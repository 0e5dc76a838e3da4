//! Chain client for the tally oracle.
//!
//! Single point of contact with the remote ledger: a JSON-RPC client over
//! HTTP, hand-rolled RLP and ABI encoding for the one contract we talk to,
//! EIP-155 legacy transaction signing, and receipt polling. The contract
//! interface is compiled in; function selectors are derived from keccak-256
//! of the canonical signatures.

pub mod abi;
pub mod config;
pub mod contract;
pub mod error;
pub mod rlp;
pub mod rpc;
pub mod tx;

pub use config::ChainConfig;
pub use contract::{ContractClient, IndicatorStore};
pub use error::ChainError;
pub use rpc::{JsonRpcClient, TxReceipt};
pub use tx::LegacyTx;
