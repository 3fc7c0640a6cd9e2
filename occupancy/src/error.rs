use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OccupancyError {
    #[error("parking facility {0} not found")]
    NotFound(u32),
    #[error("parking facility {0} does not support detailed simulation")]
    UnsupportedOperation(u32),
}

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse dataset: {0}")]
    Json(#[from] serde_json::Error),
    #[error("facility ids must be positive")]
    ZeroFacilityId,
    #[error("duplicate facility id {0}")]
    DuplicateFacilityId(u32),
    #[error("facility {0} has zero capacity")]
    ZeroCapacity(u32),
    #[error("facility {id} has {available} available spots but a capacity of {total}")]
    AvailableExceedsTotal { id: u32, available: u32, total: u32 },
    #[error("facility {0} has an empty spaces list")]
    EmptySpaces(u32),
    #[error("facility {id} lists {spaces} spaces but a capacity of {total}")]
    SpaceCountMismatch { id: u32, spaces: usize, total: u32 },
    #[error("facility {facility_id} has duplicate space id {space_id}")]
    DuplicateSpaceId { facility_id: u32, space_id: u32 },
}
