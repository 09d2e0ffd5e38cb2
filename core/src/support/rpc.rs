use crate::{
    constants::{RECEIPT_POLL_ATTEMPTS, RECEIPT_POLL_INTERVAL},
    support::abi::from_quantity,
    Error,
};
use async_trait::async_trait;
use ethnum::U256;
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, trace, warn};

/// Read access to contract state. Implemented over JSON-RPC in the browser and by mocks in tests.
#[async_trait(?Send)]
pub trait EthCall {
    /// Executes a read-only call and returns the raw return data.
    async fn call(&self, to: &str, data: &str) -> Result<String, Error>;
}

#[derive(Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u32,
    method: &'a str,
    params: Value,
}

#[derive(Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcError>,
}

#[derive(Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub transaction_hash: String,
    pub block_number: Option<String>,
    /// `0x1` on success, `0x0` on revert.
    pub status: Option<String>,
}

impl TransactionReceipt {
    pub fn succeeded(&self) -> bool {
        self.status.as_deref() == Some("0x1")
    }
}

#[derive(Clone, Debug)]
pub struct JsonRpcClient {
    url: String,
}

impl JsonRpcClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    async fn request<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<Option<T>, Error> {
        trace!("{method} {params}");

        let response: RpcResponse<T> = Request::post(&self.url)
            .json(&RpcRequest {
                jsonrpc: "2.0",
                id: 1,
                method,
                params,
            })?
            .send()
            .await?
            .json()
            .await?;

        if let Some(error) = response.error {
            return Err(Error::Rpc(format!("{} (code {})", error.message, error.code)));
        }

        Ok(response.result)
    }

    pub async fn get_balance(&self, address: &str) -> Result<U256, Error> {
        let balance: Option<String> = self
            .request("eth_getBalance", json!([address, "latest"]))
            .await?;
        from_quantity(&balance.unwrap_or_default())
    }

    pub async fn get_transaction_receipt(
        &self,
        hash: &str,
    ) -> Result<Option<TransactionReceipt>, Error> {
        self.request("eth_getTransactionReceipt", json!([hash])).await
    }

    /// Polls until the transaction is mined. Fails if it reverted or never showed up.
    pub async fn wait_for_receipt(&self, hash: &str) -> Result<TransactionReceipt, Error> {
        for attempt in 0..RECEIPT_POLL_ATTEMPTS {
            match self.get_transaction_receipt(hash).await {
                Ok(Some(receipt)) if receipt.succeeded() => {
                    debug!("{hash} mined after {attempt} polls");
                    return Ok(receipt);
                }
                Ok(Some(_)) => return Err(Error::Reverted(hash.to_string())),
                Ok(None) => {}
                Err(error) => warn!("receipt poll for {hash} failed: {error}"),
            }
            TimeoutFuture::new(RECEIPT_POLL_INTERVAL).await;
        }

        Err(Error::generic(format!("Timed out waiting for {hash}")))
    }
}

#[async_trait(?Send)]
impl EthCall for JsonRpcClient {
    async fn call(&self, to: &str, data: &str) -> Result<String, Error> {
        let result: Option<String> = self
            .request("eth_call", json!([{ "to": to, "data": data }, "latest"]))
            .await?;
        result.ok_or_else(|| Error::Rpc("empty eth_call result".to_string()))
    }
}
