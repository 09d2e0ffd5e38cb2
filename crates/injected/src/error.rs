use serde::{Deserialize, Serialize};
use wasm_bindgen::{JsCast, JsValue};

/// EIP-1193 code for a request the user declined.
const USER_REJECTED: f64 = 4001.0;

#[derive(thiserror::Error, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("No Ethereum wallet found!")]
    ProviderUnavailable,

    #[error("Request rejected by the user")]
    UserRejected,

    #[error("Wallet error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("{0}")]
    Js(String),

    #[error("Serialization Error: {0}")]
    Serialization(String),

    #[error("{0}")]
    Generic(String),
}

impl Error {
    pub fn generic(value: impl std::fmt::Display) -> Self {
        Self::Generic(value.to_string())
    }
}

impl From<JsValue> for Error {
    fn from(error: JsValue) -> Self {
        // provider errors are plain objects carrying `code` and `message`
        let code = js_sys::Reflect::get(&error, &JsValue::from_str("code"))
            .ok()
            .and_then(|code| code.as_f64());
        let message = js_sys::Reflect::get(&error, &JsValue::from_str("message"))
            .ok()
            .and_then(|message| message.as_string())
            .or_else(|| error.as_string())
            .or_else(|| {
                error
                    .dyn_ref::<js_sys::Error>()
                    .and_then(|error| error.message().as_string())
            })
            .unwrap_or_else(|| "unknown JS error".to_string());

        match code {
            Some(code) if code == USER_REJECTED => Error::UserRejected,
            Some(code) => Error::Rpc {
                code: code as i64,
                message,
            },
            None => Error::Js(message),
        }
    }
}

impl From<serde_wasm_bindgen::Error> for Error {
    fn from(error: serde_wasm_bindgen::Error) -> Self {
        Error::Serialization(error.to_string())
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Self::Generic(value.to_string())
    }
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Self::Generic(value)
    }
}
