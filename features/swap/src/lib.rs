mod confirm_swap_modal;
mod routes;
pub mod state;
mod swap;
mod swap_details;
mod swap_settings;

pub use confirm_swap_modal::ConfirmSwapModal;
pub use routes::SwapRoutes;
pub use swap::Swap;
pub use swap_details::{SwapDetails, TradePrice};
pub use swap_settings::SwapSettings;
