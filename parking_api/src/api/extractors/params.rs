use crate::api::error::ApiError;
use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use serde::Deserialize;

/// A facility id taken from the single path parameter of the route.
///
/// Non-numeric input is rejected with [`ApiError::InvalidInput`] instead of axum's plain-text path
/// rejection. Integers that cannot name a facility surface as not found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FacilityId(pub u32);

impl<S> FromRequestParts<S> for FacilityId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let PathText(raw) = PathText::from_request_parts(parts, state).await?;
        parse_facility_id(&raw).map(FacilityId)
    }
}

/// The single path parameter of the route as text, such as an area or a facility type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathText(pub String);

impl<S> FromRequestParts<S> for PathText
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::InvalidInput(e.body_text()))?;
        Ok(PathText(raw))
    }
}

/// Parses a facility id written as a decimal integer.
///
/// `0` passes through and misses in the store. Negative or oversized integers become
/// [`ApiError::UnknownFacility`].
pub fn parse_facility_id(raw: &str) -> Result<u32, ApiError> {
    let trimmed = raw.trim();
    let digits = trimmed.strip_prefix('-').unwrap_or(trimmed);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ApiError::InvalidInput(format!(
            "parking id must be an integer, got '{raw}'"
        )));
    }
    trimmed
        .parse::<u32>()
        .map_err(|_| ApiError::UnknownFacility(trimmed.to_string()))
}

/// `parkingId` as sent by clients, either a JSON number or a numeric string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawFacilityId {
    Number(i64),
    Text(String),
}

impl RawFacilityId {
    pub fn into_id(self) -> Result<u32, ApiError> {
        match self {
            RawFacilityId::Number(n) => {
                u32::try_from(n).map_err(|_| ApiError::UnknownFacility(n.to_string()))
            }
            RawFacilityId::Text(s) => parse_facility_id(&s),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulateSensorRequest {
    pub parking_id: RawFacilityId,
}

#[derive(Debug, Default, Deserialize)]
pub struct SummaryQuery {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub area: Option<String>,
}
