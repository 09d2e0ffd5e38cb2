#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Insufficient reserves")]
    InsufficientReserves,

    #[error("Insufficient input amount")]
    InsufficientInputAmount,

    #[error("Tokens are on different chains")]
    ChainMismatch,

    #[error("Currencies do not match")]
    CurrencyMismatch,

    #[error("Token is not part of the pair")]
    InvalidToken,

    #[error("Tokens must be different")]
    IdenticalAddresses,

    #[error("Invalid route: {0}")]
    InvalidRoute(&'static str),

    #[error("Amount overflows 256 bits")]
    Overflow,
}
