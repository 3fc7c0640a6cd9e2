use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacilityType {
    Public,
    Private,
}

impl FacilityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FacilityType::Public => "public",
            FacilityType::Private => "private",
        }
    }
}

impl Display for FacilityType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Occupancy bands used by the map client to colour markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OccupancyLevel {
    /// Less than 50% of the capacity is occupied.
    Low,
    /// At least 50% but less than 80% occupied.
    Medium,
    /// 80% occupied or more.
    High,
}

/// An individually tracked stall inside a detailed facility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Space {
    pub id: u32,
    pub occupied: bool,
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Facility {
    pub id: u32,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(rename = "type")]
    pub kind: FacilityType,
    pub total: u32,
    pub available: u32,
    pub area: String,
    /// Present only for detailed facilities. When set, `available` is always the number of
    /// unoccupied spaces.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spaces: Option<Vec<Space>>,
}

impl Facility {
    pub fn is_detailed(&self) -> bool {
        self.spaces.is_some()
    }

    pub fn occupied(&self) -> u32 {
        self.total - self.available
    }

    pub fn occupancy_percent(&self) -> f64 {
        f64::from(self.occupied()) / f64::from(self.total) * 100.0
    }

    pub fn occupancy_level(&self) -> OccupancyLevel {
        let percent = self.occupancy_percent();
        if percent < 50.0 {
            OccupancyLevel::Low
        } else if percent < 80.0 {
            OccupancyLevel::Medium
        } else {
            OccupancyLevel::High
        }
    }
}

/// Number of unoccupied spaces. Validation caps `spaces.len()` at `total`, so this fits a `u32`.
pub(crate) fn free_spaces(spaces: &[Space]) -> u32 {
    spaces
        .iter()
        .fold(0, |free, space| free + u32::from(!space.occupied))
}
