use crate::api::api_models::{FacilityDto, SuccessResponse, SummaryDto};
use crate::api::error::ApiError;
use crate::api::extractors::params::{FacilityId, PathText, SummaryQuery};
use crate::state::SharedStore;
use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use chrono::Utc;
use occupancy::SummaryFilter;

/// Every facility in insertion order, stamped with the time the snapshot was read.
pub async fn get_facilities(
    State(store): State<SharedStore>,
) -> Json<SuccessResponse<Vec<FacilityDto>>> {
    let snapshot = store.read().snapshot();
    let data = snapshot.facilities.iter().map(FacilityDto::from).collect();
    Json(SuccessResponse::new(data).with_timestamp(snapshot.captured_at))
}

pub async fn get_facility(
    State(store): State<SharedStore>,
    FacilityId(id): FacilityId,
) -> Result<Json<SuccessResponse<FacilityDto>>, ApiError> {
    let facility = store.read().by_id(id).map(FacilityDto::from)?;
    Ok(Json(SuccessResponse::new(facility)))
}

pub async fn get_facilities_by_area(
    State(store): State<SharedStore>,
    PathText(area): PathText,
) -> Json<SuccessResponse<Vec<FacilityDto>>> {
    let data = store
        .read()
        .by_area(&area)
        .into_iter()
        .map(FacilityDto::from)
        .collect();
    Json(SuccessResponse::new(data))
}

pub async fn get_facilities_by_type(
    State(store): State<SharedStore>,
    PathText(kind): PathText,
) -> Json<SuccessResponse<Vec<FacilityDto>>> {
    let data = store
        .read()
        .by_type(&kind)
        .into_iter()
        .map(FacilityDto::from)
        .collect();
    Json(SuccessResponse::new(data))
}

pub async fn get_areas(State(store): State<SharedStore>) -> Json<SuccessResponse<Vec<String>>> {
    let data = store
        .read()
        .areas()
        .into_iter()
        .map(str::to_string)
        .collect();
    Json(SuccessResponse::new(data))
}

/// Counts and capacity totals, optionally narrowed by `?type=` and `?area=`.
pub async fn get_summary(
    State(store): State<SharedStore>,
    query: Result<Query<SummaryQuery>, QueryRejection>,
) -> Result<Json<SuccessResponse<SummaryDto>>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::InvalidInput(e.body_text()))?;
    let filter = SummaryFilter {
        kind: query.kind,
        area: query.area,
    };
    let summary = store.read().summary(&filter);
    Ok(Json(
        SuccessResponse::new(SummaryDto::from(summary)).with_timestamp(Utc::now()),
    ))
}
