mod farm;
mod input_group;
mod routes;
pub mod state;

pub use farm::Yield;
pub use input_group::InputGroup;
pub use routes::YieldRoutes;
