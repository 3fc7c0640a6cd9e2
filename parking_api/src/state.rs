use axum::extract::FromRef;
use occupancy::OccupancyStore;
use parking_lot::RwLock;
use std::sync::Arc;

/// The one store instance for the process. Every mutation holds the write guard for its whole
/// pass; the guard is never held across an `.await`.
pub type SharedStore = Arc<RwLock<OccupancyStore>>;

#[derive(Clone, FromRef)]
pub struct AppState {
    pub store: SharedStore,
}

impl AppState {
    pub fn new(store: OccupancyStore) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }
}
