pub mod approval;
pub mod constants;
mod error;
pub mod prices;
pub mod state;
pub mod submission;
pub mod support;
pub mod theme;
pub mod utils;
pub mod wallet;

pub use approval::ApprovalState;
pub use constants::{CHAIN_ID, NODE, TOKEN_MAP};
pub use error::Error;
pub use state::{ChainId, Endpoint, TokenMap, UserSettings, WalletSignals};
pub use submission::Submission;
pub use theme::Theme;

pub const BASE_URL: &str = "/sokuswap-leptos";
