// The Serialize and Deserialize traits are derived to ensure that Errors can be
// stored inside signals and resources.
#[derive(thiserror::Error, serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("{0}")]
    Generic(String),

    #[error("Token not found in the map!")]
    UnknownToken,

    #[error("Serde Error: {0}")]
    Serde(String),

    #[error("RPC error: {0}")]
    Rpc(String),

    #[error("Wallet error: {0}")]
    Wallet(String),

    #[error("Wallet is not connected!")]
    WalletDisconnected,

    #[error("SDK error: {0}")]
    Sdk(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("ABI decoding failed: {0}")]
    Abi(String),

    #[error("Transaction reverted: {0}")]
    Reverted(String),

    #[error("Another transaction is still pending")]
    Busy,
}

impl Error {
    pub fn generic(message: impl ToString) -> Self {
        let message = message.to_string();
        Error::Generic(message)
    }
    pub fn serde(message: impl ToString) -> Self {
        let message = message.to_string();
        Error::Serde(message)
    }
    pub fn abi(message: impl ToString) -> Self {
        Error::Abi(message.to_string())
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

impl From<std::num::ParseIntError> for Error {
    fn from(error: std::num::ParseIntError) -> Self {
        Self::Generic(error.to_string())
    }
}

impl From<std::num::ParseFloatError> for Error {
    fn from(error: std::num::ParseFloatError) -> Self {
        Self::Generic(error.to_string())
    }
}

impl From<gloo_net::Error> for Error {
    fn from(error: gloo_net::Error) -> Self {
        Error::Rpc(error.to_string())
    }
}

impl From<injected::Error> for Error {
    fn from(error: injected::Error) -> Self {
        Error::Wallet(error.to_string())
    }
}

impl From<soku_sdk::Error> for Error {
    fn from(error: soku_sdk::Error) -> Self {
        Error::Sdk(error.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::Serde(error.to_string())
    }
}
