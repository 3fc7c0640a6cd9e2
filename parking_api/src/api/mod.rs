mod api_models;
mod error;
mod extractors;
mod handlers;
mod router;

pub use api_models::{HEALTH_MESSAGE, SENSOR_SIMULATED_MESSAGE};
pub use error::{ApiError, NOT_FOUND_MESSAGE, UNSUPPORTED_MESSAGE};
pub use router::app;
