//! JSON-RPC client for a standard Ethereum node.
//!
//! Thin wrapper over `reqwest` that speaks the JSON-RPC 2.0 envelope and
//! decodes the quantity/data hex conventions. Only the handful of methods
//! the oracle needs are exposed.

use serde::Deserialize;
use serde_json::{json, Value};

use tally_types::{Address, TxHash};

use crate::ChainError;

/// A mined transaction receipt, as much of it as we consume.
#[derive(Debug, Clone)]
pub struct TxReceipt {
    pub transaction_hash: TxHash,
    pub block_number: u64,
    /// Post-Byzantium status flag: `true` means the transaction succeeded.
    pub status: bool,
}

#[derive(Deserialize)]
struct RpcEnvelope {
    result: Option<Value>,
    error: Option<RpcErrorObject>,
}

#[derive(Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

/// JSON-RPC 2.0 client over HTTP.
pub struct JsonRpcClient {
    client: reqwest::Client,
    url: String,
}

impl JsonRpcClient {
    pub fn new(url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.to_string(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Issue a single JSON-RPC request and unwrap the envelope.
    async fn request(&self, method: &str, params: Value) -> Result<Value, ChainError> {
        let payload = json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
            "id": 1,
        });
        let response = self
            .client
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| ChainError::Transport(e.to_string()))?;
        let envelope: RpcEnvelope = response
            .json()
            .await
            .map_err(|e| ChainError::InvalidResponse(e.to_string()))?;
        if let Some(err) = envelope.error {
            return Err(ChainError::Rpc {
                code: err.code,
                message: err.message,
            });
        }
        // `result: null` is legitimate (e.g. a receipt that is not mined
        // yet), so absence maps to Null rather than an error.
        Ok(envelope.result.unwrap_or(Value::Null))
    }

    /// `eth_chainId` — used as the startup connectivity probe.
    pub async fn chain_id(&self) -> Result<u64, ChainError> {
        let result = self.request("eth_chainId", json!([])).await?;
        parse_quantity(&result)
    }

    /// `eth_blockNumber`.
    pub async fn block_number(&self) -> Result<u64, ChainError> {
        let result = self.request("eth_blockNumber", json!([])).await?;
        parse_quantity(&result)
    }

    /// `eth_getTransactionCount` against the pending block — the next nonce.
    pub async fn pending_nonce(&self, address: &Address) -> Result<u64, ChainError> {
        let result = self
            .request(
                "eth_getTransactionCount",
                json!([address.to_string(), "pending"]),
            )
            .await?;
        parse_quantity(&result)
    }

    /// `eth_call` against the latest block; returns the raw return data.
    pub async fn call(&self, to: &Address, data: &[u8]) -> Result<Vec<u8>, ChainError> {
        let call = json!({
            "to": to.to_string(),
            "data": format!("0x{}", hex::encode(data)),
        });
        let result = self.request("eth_call", json!([call, "latest"])).await?;
        parse_data(&result)
    }

    /// `eth_sendRawTransaction`; returns the transaction hash.
    pub async fn send_raw_transaction(&self, raw: &[u8]) -> Result<TxHash, ChainError> {
        let result = self
            .request(
                "eth_sendRawTransaction",
                json!([format!("0x{}", hex::encode(raw))]),
            )
            .await
            .map_err(|e| match e {
                // The node rejecting the transaction (nonce conflict,
                // insufficient funds, reverted estimate) is a submission
                // failure, not a transport problem.
                ChainError::Rpc { code, message } => {
                    ChainError::Submission(format!("rpc error {code}: {message}"))
                }
                other => other,
            })?;
        let s = result
            .as_str()
            .ok_or_else(|| ChainError::InvalidResponse("tx hash is not a string".into()))?;
        s.parse()
            .map_err(|e| ChainError::InvalidResponse(format!("bad tx hash: {e}")))
    }

    /// `eth_getTransactionReceipt`; `None` while the transaction is pending.
    pub async fn transaction_receipt(
        &self,
        hash: &TxHash,
    ) -> Result<Option<TxReceipt>, ChainError> {
        let result = self
            .request("eth_getTransactionReceipt", json!([hash.to_string()]))
            .await?;
        if result.is_null() {
            return Ok(None);
        }
        let block_number = result
            .get("blockNumber")
            .map(parse_quantity)
            .transpose()?
            .ok_or_else(|| ChainError::InvalidResponse("receipt missing blockNumber".into()))?;
        let status = match result.get("status") {
            Some(v) => parse_quantity(v)? == 1,
            // Pre-Byzantium chains omit the status field; assume success.
            None => true,
        };
        Ok(Some(TxReceipt {
            transaction_hash: *hash,
            block_number,
            status,
        }))
    }
}

/// Parse a hex quantity (`"0x1a"`) into a u64.
fn parse_quantity(value: &Value) -> Result<u64, ChainError> {
    let s = value
        .as_str()
        .ok_or_else(|| ChainError::InvalidResponse("quantity is not a string".into()))?;
    let stripped = s
        .strip_prefix("0x")
        .ok_or_else(|| ChainError::InvalidResponse(format!("quantity missing 0x: {s}")))?;
    u64::from_str_radix(stripped, 16)
        .map_err(|e| ChainError::InvalidResponse(format!("bad quantity {s}: {e}")))
}

/// Parse hex data (`"0xdeadbeef"`, possibly empty) into raw bytes.
fn parse_data(value: &Value) -> Result<Vec<u8>, ChainError> {
    let s = value
        .as_str()
        .ok_or_else(|| ChainError::InvalidResponse("data is not a string".into()))?;
    let stripped = s
        .strip_prefix("0x")
        .ok_or_else(|| ChainError::InvalidResponse(format!("data missing 0x: {s}")))?;
    hex::decode(stripped).map_err(|e| ChainError::InvalidResponse(format!("bad data {s}: {e}")))
}
