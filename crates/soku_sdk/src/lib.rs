pub mod amount;
pub mod constants;
pub mod currency;
mod error;
pub mod fraction;
pub mod math;
pub mod pair;
pub mod price;
pub mod route;
pub mod trade;

pub use amount::CurrencyAmount;
pub use constants::{ChainId, Rounding, TradeType};
pub use currency::{Currency, Token};
pub use error::Error;
pub use fraction::{Fraction, Percent};
pub use pair::Pair;
pub use price::Price;
pub use route::Route;
pub use trade::{BestTradeOptions, Trade};

pub type Result<T> = core::result::Result<T, Error>;
