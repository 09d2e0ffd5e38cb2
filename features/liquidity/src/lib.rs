mod add_liquidity;
mod confirm_add_modal_bottom;
mod routes;
pub mod state;

pub use add_liquidity::AddLiquidity;
pub use confirm_add_modal_bottom::ConfirmAddModalBottom;
pub use routes::LiquidityRoutes;
