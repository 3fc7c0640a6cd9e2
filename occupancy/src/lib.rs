//! In-memory parking occupancy simulation.
//!
//! [`OccupancyStore`] owns every [`Facility`] for the lifetime of the process. Ambient facilities
//! drift randomly on a timer driven by the caller, while detailed facilities only change through
//! [`OccupancyStore::simulate_sensor`]. Read projections live in [`query`].

pub mod dataset;
pub mod error;
pub mod model;
pub mod query;
pub mod store;

pub use error::{DatasetError, OccupancyError};
pub use model::{Facility, FacilityType, OccupancyLevel, Space};
pub use query::{Snapshot, Summary, SummaryFilter};
pub use store::{DriftReport, OccupancyStore};
