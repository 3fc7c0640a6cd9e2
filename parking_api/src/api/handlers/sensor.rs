use crate::api::api_models::{FacilityDto, SENSOR_SIMULATED_MESSAGE, SuccessResponse};
use crate::api::error::ApiError;
use crate::api::extractors::params::SimulateSensorRequest;
use crate::state::SharedStore;
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use tracing::info;

/// Toggles a few spaces of a detailed facility and returns the facility as it now stands.
pub async fn simulate_sensor(
    State(store): State<SharedStore>,
    payload: Result<Json<SimulateSensorRequest>, JsonRejection>,
) -> Result<Json<SuccessResponse<FacilityDto>>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::InvalidInput(e.body_text()))?;
    let facility_id = request.parking_id.into_id()?;

    let facility = store.write().simulate_sensor(facility_id)?;
    info!(
        name: "sensor.simulated",
        facility_id,
        available = facility.available,
        total = facility.total,
        "simulated sensor event"
    );

    Ok(Json(
        SuccessResponse::new(FacilityDto::from(&facility)).with_message(SENSOR_SIMULATED_MESSAGE),
    ))
}
