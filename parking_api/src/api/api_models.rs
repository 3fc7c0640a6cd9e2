use chrono::{DateTime, Utc};
use occupancy::{Facility, FacilityType, OccupancyLevel, Space, Summary};
use serde::Serialize;

pub const SENSOR_SIMULATED_MESSAGE: &str = "Sensor data simulated successfully";
pub const HEALTH_MESSAGE: &str = "Park INC API is running";

/// `{success: true, ...}` envelope shared by every successful response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuccessResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    pub data: T,
}

impl<T> SuccessResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            timestamp: None,
            message: None,
            data,
        }
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn with_message(mut self, message: &'static str) -> Self {
        self.message = Some(message);
        self
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacilityDto {
    pub id: u32,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(rename = "type")]
    pub kind: FacilityType,
    pub total: u32,
    pub available: u32,
    pub area: String,
    pub occupancy_level: OccupancyLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detailed_view: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spaces: Option<Vec<Space>>,
}

impl From<&Facility> for FacilityDto {
    fn from(facility: &Facility) -> Self {
        Self {
            id: facility.id,
            name: facility.name.clone(),
            lat: facility.lat,
            lng: facility.lng,
            kind: facility.kind,
            total: facility.total,
            available: facility.available,
            area: facility.area.clone(),
            occupancy_level: facility.occupancy_level(),
            detailed_view: facility.is_detailed().then_some(true),
            spaces: facility.spaces.clone(),
        }
    }
}

#[derive(Serialize)]
pub struct SummaryDto {
    pub facilities: usize,
    pub total: u64,
    pub available: u64,
}

impl From<Summary> for SummaryDto {
    fn from(summary: Summary) -> Self {
        Self {
            facilities: summary.facilities,
            total: summary.total,
            available: summary.available,
        }
    }
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub timestamp: DateTime<Utc>,
}
