pub mod api;
pub mod error;
pub mod simulator;
pub mod state;

pub use api::app;
