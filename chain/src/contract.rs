//! Client for the deployed indicator contract.

use std::time::Duration;

use tally_types::{Address, Credential, StorageKey, TxHash};

use crate::abi;
use crate::rpc::{JsonRpcClient, TxReceipt};
use crate::tx::LegacyTx;
use crate::{ChainConfig, ChainError};

/// Read/write access to the recorded indicator values.
///
/// The monitor loop works against this trait so tests can swap in a
/// deterministic double; [`ContractClient`] is the production
/// implementation.
pub trait IndicatorStore {
    /// Last recorded value for a key; `None` when nothing was ever set.
    fn last_recorded(
        &self,
        key: &StorageKey,
    ) -> impl std::future::Future<Output = Result<Option<u128>, ChainError>> + Send;

    /// Record a new value, blocking until the write is confirmed.
    fn record(
        &self,
        key: &StorageKey,
        value: u128,
    ) -> impl std::future::Future<Output = Result<TxReceipt, ChainError>> + Send;
}

/// Single point of contact with the remote ledger.
///
/// Owns the RPC connection, the signing credential, and the contract
/// address. Every write builds a legacy transaction with the static gas
/// policy from config, signs it with EIP-155, submits it, and waits for
/// the receipt. No automatic retry: failed submissions are reported and
/// the caller decides whether a later cycle retries.
pub struct ContractClient {
    rpc: JsonRpcClient,
    config: ChainConfig,
    credential: Credential,
}

impl ContractClient {
    /// Connect to the node and verify the chain id.
    ///
    /// This is a startup precondition: any failure here is fatal to the
    /// process, unlike runtime errors which the caller skips over.
    pub async fn connect(
        config: ChainConfig,
        credential: Credential,
    ) -> Result<Self, ChainError> {
        let rpc = JsonRpcClient::new(&config.rpc_url);
        let reported = rpc
            .chain_id()
            .await
            .map_err(|e| ChainError::Connection(format!("{}: {e}", config.rpc_url)))?;
        if reported != config.chain_id {
            return Err(ChainError::Connection(format!(
                "node reports chain id {reported}, config expects {}",
                config.chain_id
            )));
        }
        tracing::info!(
            rpc_url = %config.rpc_url,
            chain_id = config.chain_id,
            contract = %config.contract_address,
            account = %credential.address,
            "connected to chain"
        );
        Ok(Self {
            rpc,
            config,
            credential,
        })
    }

    /// The account address that signs every write.
    pub fn account(&self) -> &Address {
        &self.credential.address
    }

    /// Read the indicator value for a key. `Ok(None)` when the node
    /// returns no data for the slot.
    pub async fn get_indicator(&self, key: &StorageKey) -> Result<Option<u128>, ChainError> {
        let data = abi::encode_call(
            abi::selector("Indicator(bytes32)"),
            &[abi::encode_bytes32(key)],
        );
        let returned = self.rpc.call(&self.config.contract_address, &data).await?;
        if returned.is_empty() {
            return Ok(None);
        }
        abi::decode_uint256(&returned).map(Some)
    }

    /// Read the current contract owner.
    pub async fn get_owner(&self) -> Result<Address, ChainError> {
        let data = abi::encode_call(abi::selector("owner()"), &[]);
        let returned = self.rpc.call(&self.config.contract_address, &data).await?;
        abi::decode_address(&returned)
    }

    /// Write a new indicator value; blocks until confirmed.
    pub async fn set_indicator(
        &self,
        key: &StorageKey,
        value: u128,
    ) -> Result<TxReceipt, ChainError> {
        let data = abi::encode_call(
            abi::selector("set(bytes32,uint256)"),
            &[abi::encode_bytes32(key), abi::encode_uint256(value)],
        );
        self.submit(data).await
    }

    /// Transfer contract ownership; blocks until confirmed.
    ///
    /// Address well-formedness was enforced when the [`Address`] was
    /// parsed, before any network round trip.
    pub async fn set_owner(&self, new_owner: &Address) -> Result<TxReceipt, ChainError> {
        let data = abi::encode_call(
            abi::selector("setOwner(address)"),
            &[abi::encode_address(new_owner)],
        );
        self.submit(data).await
    }

    /// Shared write path: nonce, build, sign, submit, await confirmation.
    async fn submit(&self, data: Vec<u8>) -> Result<TxReceipt, ChainError> {
        let nonce = self.rpc.pending_nonce(&self.credential.address).await?;
        let tx = LegacyTx {
            nonce,
            gas_price: self.config.gas_price_wei,
            gas_limit: self.config.gas_limit,
            to: self.config.contract_address,
            value: 0,
            data,
        };
        let raw = tx.sign(&self.credential.private, self.config.chain_id)?;
        let hash = self.rpc.send_raw_transaction(&raw).await?;
        tracing::info!(tx = %hash, nonce, "transaction submitted");
        self.wait_for_receipt(hash).await
    }

    /// Poll until the transaction is mined, honoring the configured
    /// timeout. With no timeout configured this waits indefinitely,
    /// matching the original design.
    async fn wait_for_receipt(&self, hash: TxHash) -> Result<TxReceipt, ChainError> {
        let poll = Duration::from_secs(self.config.confirm_poll_secs.max(1));
        let wait = async {
            loop {
                match self.rpc.transaction_receipt(&hash).await {
                    Ok(Some(receipt)) => return Ok(receipt),
                    Ok(None) => tokio::time::sleep(poll).await,
                    // The transaction may still land; its final state is
                    // unknown until a later read.
                    Err(e) => return Err(ChainError::Confirmation(hash, e.to_string())),
                }
            }
        };

        let receipt = match self.config.confirm_timeout_secs {
            Some(secs) => tokio::time::timeout(Duration::from_secs(secs), wait)
                .await
                .map_err(|_| ChainError::ConfirmationTimeout(secs))??,
            None => wait.await?,
        };

        if !receipt.status {
            return Err(ChainError::Confirmation(hash, "transaction reverted".into()));
        }
        tracing::info!(tx = %hash, block = receipt.block_number, "transaction confirmed");
        Ok(receipt)
    }
}

impl IndicatorStore for ContractClient {
    async fn last_recorded(&self, key: &StorageKey) -> Result<Option<u128>, ChainError> {
        self.get_indicator(key).await
    }

    async fn record(&self, key: &StorageKey, value: u128) -> Result<TxReceipt, ChainError> {
        self.set_indicator(key, value).await
    }
}
