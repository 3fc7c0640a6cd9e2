use crate::api::handlers::health::health;
use crate::api::handlers::parking::{
    get_areas, get_facilities, get_facilities_by_area, get_facilities_by_type, get_facility,
    get_summary,
};
use crate::api::handlers::sensor::simulate_sensor;
use crate::state::AppState;
use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

fn router() -> Router<AppState> {
    Router::<AppState>::new()
        .route("/health", get(health))
        .route("/parking", get(get_facilities))
        .route("/parking/areas", get(get_areas))
        .route("/parking/summary", get(get_summary))
        .route("/parking/{id}", get(get_facility))
        .route("/parking/area/{area}", get(get_facilities_by_area))
        .route("/parking/type/{type}", get(get_facilities_by_type))
        .route("/simulate-sensor", post(simulate_sensor))
}

/// Full application: every route under `/api`, with request tracing and permissive CORS for the
/// map client.
pub fn app(state: AppState) -> Router {
    Router::new()
        .nest("/api", router())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
