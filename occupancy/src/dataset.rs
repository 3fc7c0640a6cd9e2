use crate::error::DatasetError;
use crate::model::{Facility, FacilityType, Space, free_spaces};
use std::collections::HashSet;
use std::path::Path;
use tracing::{info, instrument};

/// Id of the detailed alley facility in the built-in dataset.
pub const DETAILED_ALLEY_ID: u32 = 17;

fn lot(
    id: u32,
    name: &str,
    (lat, lng): (f64, f64),
    kind: FacilityType,
    (available, total): (u32, u32),
    area: &str,
) -> Facility {
    Facility {
        id,
        name: name.to_string(),
        lat,
        lng,
        kind,
        total,
        available,
        area: area.to_string(),
        spaces: None,
    }
}

fn space(id: u32, occupied: bool, lat: f64, lng: f64) -> Space {
    Space {
        id,
        occupied,
        lat,
        lng,
    }
}

/// Montreal seed data: 16 ambient facilities and the detailed alley behind
/// 3520 Boulevard Édouard-Montpetit.
pub fn montreal() -> Vec<Facility> {
    use FacilityType::{Private, Public};

    let alley_spaces = vec![
        space(1, false, 45.50435, -73.61755),
        space(2, false, 45.50432, -73.61752),
        space(3, true, 45.50429, -73.61749),
        space(4, false, 45.50426, -73.61746),
        space(5, true, 45.50423, -73.61743),
        space(6, false, 45.50420, -73.61740),
        space(7, false, 45.50435, -73.61765),
        space(8, true, 45.50432, -73.61762),
        space(9, false, 45.50429, -73.61759),
        space(10, true, 45.50426, -73.61756),
        space(11, false, 45.50423, -73.61753),
        space(12, true, 45.50420, -73.61750),
    ];

    vec![
        // Downtown
        lot(1, "Place Ville Marie Parking", (45.5017, -73.5673), Private, (23, 50), "Downtown"),
        lot(2, "Central Station Parking", (45.4958, -73.5656), Private, (45, 80), "Downtown"),
        lot(3, "Bell Centre Parking", (45.4961, -73.5693), Private, (78, 100), "Downtown"),
        lot(4, "Rue Sainte-Catherine", (45.5048, -73.5698), Public, (12, 30), "Downtown"),
        lot(5, "Rue Sherbrooke", (45.5088, -73.5710), Public, (8, 25), "Downtown"),
        lot(6, "Boulevard René-Lévesque", (45.4990, -73.5700), Public, (20, 35), "Downtown"),
        // Old Montreal
        lot(7, "Old Port Parking", (45.5086, -73.5541), Private, (67, 120), "Old Montreal"),
        lot(8, "Rue Saint-Paul", (45.5066, -73.5547), Public, (5, 20), "Old Montreal"),
        lot(9, "Place Jacques-Cartier", (45.5086, -73.5531), Public, (3, 15), "Old Montreal"),
        // Plateau Mont-Royal
        lot(10, "Mont-Royal Parking", (45.5200, -73.5830), Private, (42, 60), "Plateau"),
        lot(11, "Avenue Mont-Royal", (45.5230, -73.5900), Public, (18, 40), "Plateau"),
        lot(12, "Rue Saint-Denis", (45.5190, -73.5640), Public, (14, 35), "Plateau"),
        // Quartier Latin
        lot(13, "UQAM Parking", (45.5140, -73.5635), Private, (55, 90), "Quartier Latin"),
        lot(14, "Rue Berri", (45.5170, -73.5625), Public, (11, 28), "Quartier Latin"),
        // Westmount
        lot(15, "Westmount Square", (45.4875, -73.5892), Private, (50, 75), "Westmount"),
        lot(16, "Avenue Greene", (45.4830, -73.5870), Public, (9, 22), "Westmount"),
        Facility {
            id: DETAILED_ALLEY_ID,
            name: "Ruelle 3520 Édouard-Montpetit".to_string(),
            lat: 45.5043,
            lng: -73.6175,
            kind: Public,
            total: 12,
            available: 7,
            area: "Côte-des-Neiges".to_string(),
            spaces: Some(alley_spaces),
        },
    ]
}

/// Reads a JSON array of facilities in the same shape the API serves.
#[instrument]
pub fn load(path: &Path) -> Result<Vec<Facility>, DatasetError> {
    let raw = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let facilities: Vec<Facility> = serde_json::from_str(&raw)?;
    info!(name: "dataset.loaded", count = facilities.len(), "loaded facilities from file");
    Ok(facilities)
}

/// Checks every facility invariant and derives `available` for detailed facilities.
pub fn validate(facilities: &mut [Facility]) -> Result<(), DatasetError> {
    let mut ids = HashSet::with_capacity(facilities.len());

    for facility in facilities.iter_mut() {
        if facility.id == 0 {
            return Err(DatasetError::ZeroFacilityId);
        }
        if !ids.insert(facility.id) {
            return Err(DatasetError::DuplicateFacilityId(facility.id));
        }
        if facility.total == 0 {
            return Err(DatasetError::ZeroCapacity(facility.id));
        }

        if let Some(spaces) = facility.spaces.as_deref() {
            if spaces.is_empty() {
                return Err(DatasetError::EmptySpaces(facility.id));
            }
            if spaces.len() != facility.total as usize {
                return Err(DatasetError::SpaceCountMismatch {
                    id: facility.id,
                    spaces: spaces.len(),
                    total: facility.total,
                });
            }
            let mut space_ids = HashSet::with_capacity(spaces.len());
            if let Some(dup) = spaces.iter().find(|s| !space_ids.insert(s.id)) {
                return Err(DatasetError::DuplicateSpaceId {
                    facility_id: facility.id,
                    space_id: dup.id,
                });
            }
            facility.available = free_spaces(spaces);
        } else if facility.available > facility.total {
            return Err(DatasetError::AvailableExceedsTotal {
                id: facility.id,
                available: facility.available,
                total: facility.total,
            });
        }
    }

    Ok(())
}
