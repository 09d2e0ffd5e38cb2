mod error;

pub use error::Error;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;
use wasm_bindgen::{prelude::*, JsCast};
use wasm_bindgen_futures::JsFuture;

#[wasm_bindgen]
extern "C" {
    /// The object a browser wallet injects as `window.ethereum`.
    #[wasm_bindgen(extends = js_sys::Object)]
    #[derive(Clone, Debug)]
    pub type EthereumProvider;

    #[wasm_bindgen(method, catch)]
    fn request(this: &EthereumProvider, args: &JsValue) -> Result<js_sys::Promise, JsValue>;

    #[wasm_bindgen(method)]
    fn on(this: &EthereumProvider, event: &str, listener: &js_sys::Function);
}

const NO_PARAMS: [u8; 0] = [];

#[derive(Serialize)]
struct RequestArguments<'a, P: Serialize> {
    method: &'a str,
    params: P,
}

/// An `eth_sendTransaction` payload. Quantities are 0x-prefixed hex.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    pub from: String,
    pub to: String,
    pub data: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

pub struct Ethereum {
    provider: EthereumProvider,
}

impl Ethereum {
    pub fn is_available() -> bool {
        provider().is_some()
    }

    pub fn get() -> Result<Self, Error> {
        provider()
            .map(|provider| Self { provider })
            .ok_or(Error::ProviderUnavailable)
    }

    /// Prompts the user to connect and returns the authorized accounts.
    pub async fn request_accounts(&self) -> Result<Vec<String>, Error> {
        self.request("eth_requestAccounts", NO_PARAMS).await
    }

    /// Accounts already authorized for this site, without prompting.
    pub async fn accounts(&self) -> Result<Vec<String>, Error> {
        self.request("eth_accounts", NO_PARAMS).await
    }

    pub async fn chain_id(&self) -> Result<u64, Error> {
        let chain_id: String = self.request("eth_chainId", NO_PARAMS).await?;
        parse_chain_id(&chain_id)
    }

    /// Signs and broadcasts a transaction, returning its hash.
    pub async fn send_transaction(&self, tx: &TransactionRequest) -> Result<String, Error> {
        debug!("eth_sendTransaction to {}", tx.to);
        self.request("eth_sendTransaction", [tx]).await
    }

    pub fn on_accounts_changed(&self, callback: impl Fn(Vec<String>) + 'static) {
        let closure = Closure::<dyn Fn(JsValue)>::new(move |accounts: JsValue| {
            match serde_wasm_bindgen::from_value::<Vec<String>>(accounts) {
                Ok(accounts) => callback(accounts),
                Err(error) => debug!("ignoring malformed accountsChanged payload: {error}"),
            }
        });
        self.provider
            .on("accountsChanged", closure.as_ref().unchecked_ref());
        // listeners live for the whole page
        closure.forget();
    }

    pub fn on_chain_changed(&self, callback: impl Fn(u64) + 'static) {
        let closure = Closure::<dyn Fn(JsValue)>::new(move |chain_id: JsValue| {
            match chain_id.as_string().map(|id| parse_chain_id(&id)) {
                Some(Ok(chain_id)) => callback(chain_id),
                _ => debug!("ignoring malformed chainChanged payload"),
            }
        });
        self.provider
            .on("chainChanged", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    async fn request<P, T>(&self, method: &str, params: P) -> Result<T, Error>
    where
        P: Serialize,
        T: DeserializeOwned,
    {
        let args = serde_wasm_bindgen::to_value(&RequestArguments { method, params })?;
        let promise = self.provider.request(&args)?;
        let response = JsFuture::from(promise).await?;
        Ok(serde_wasm_bindgen::from_value(response)?)
    }
}

fn provider() -> Option<EthereumProvider> {
    let window = web_sys::window()?;
    let ethereum = js_sys::Reflect::get(&window, &JsValue::from_str("ethereum")).ok()?;
    if ethereum.is_undefined() || ethereum.is_null() {
        return None;
    }
    Some(ethereum.unchecked_into())
}

/// Parses a chain id given as 0x-prefixed hex.
pub fn parse_chain_id(value: &str) -> Result<u64, Error> {
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .ok_or_else(|| Error::generic(format!("chain id is not hex: {value}")))?;
    u64::from_str_radix(digits, 16).map_err(Error::generic)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_chain_id() {
        assert_eq!(parse_chain_id("0x1"), Ok(1));
        assert_eq!(parse_chain_id("0x7a69"), Ok(31337));
        assert!(parse_chain_id("1").is_err());
        assert!(parse_chain_id("0xzz").is_err());
    }

    #[test]
    fn test_transaction_request_omits_missing_value() {
        let tx = TransactionRequest {
            from: "0xabc".to_string(),
            to: "0xdef".to_string(),
            data: "0x".to_string(),
            value: None,
        };
        assert_eq!(
            serde_json::to_string(&tx).unwrap(),
            r#"{"from":"0xabc","to":"0xdef","data":"0x"}"#
        );
    }
}
