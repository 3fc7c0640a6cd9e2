//! Read-only projections over [`OccupancyStore`]. Nothing here mutates the store.
//!
//! String comparisons are whole-value equality, ignoring case.

use crate::error::OccupancyError;
use crate::model::Facility;
use crate::store::OccupancyStore;
use chrono::{DateTime, Utc};

/// Every facility in insertion order, as observed at `captured_at`.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub captured_at: DateTime<Utc>,
    pub facilities: Vec<Facility>,
}

/// Optional filters for [`OccupancyStore::summary`]. Absent fields match everything.
#[derive(Debug, Clone, Default)]
pub struct SummaryFilter {
    pub kind: Option<String>,
    pub area: Option<String>,
}

impl SummaryFilter {
    fn matches(&self, facility: &Facility) -> bool {
        let kind_match = self
            .kind
            .as_deref()
            .is_none_or(|kind| eq_ignore_case(facility.kind.as_str(), kind));
        let area_match = self
            .area
            .as_deref()
            .is_none_or(|area| eq_ignore_case(&facility.area, area));
        kind_match && area_match
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub facilities: usize,
    pub total: u64,
    pub available: u64,
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

impl<R> OccupancyStore<R> {
    pub fn facilities(&self) -> &[Facility] {
        &self.facilities
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            captured_at: Utc::now(),
            facilities: self.facilities.clone(),
        }
    }

    pub fn by_id(&self, id: u32) -> Result<&Facility, OccupancyError> {
        self.facilities
            .iter()
            .find(|f| f.id == id)
            .ok_or(OccupancyError::NotFound(id))
    }

    pub fn by_area(&self, area: &str) -> Vec<&Facility> {
        self.facilities
            .iter()
            .filter(|f| eq_ignore_case(&f.area, area))
            .collect()
    }

    /// Unknown type names yield an empty result rather than an error.
    pub fn by_type(&self, kind: &str) -> Vec<&Facility> {
        self.facilities
            .iter()
            .filter(|f| eq_ignore_case(f.kind.as_str(), kind))
            .collect()
    }

    /// Distinct area names in order of first appearance.
    pub fn areas(&self) -> Vec<&str> {
        let mut areas: Vec<&str> = Vec::new();
        for facility in &self.facilities {
            if !areas.contains(&facility.area.as_str()) {
                areas.push(&facility.area);
            }
        }
        areas
    }

    pub fn summary(&self, filter: &SummaryFilter) -> Summary {
        self.facilities
            .iter()
            .filter(|f| filter.matches(f))
            .fold(
                Summary {
                    facilities: 0,
                    total: 0,
                    available: 0,
                },
                |acc, f| Summary {
                    facilities: acc.facilities + 1,
                    total: acc.total + u64::from(f.total),
                    available: acc.available + u64::from(f.available),
                },
            )
    }
}
