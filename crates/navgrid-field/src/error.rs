use navgrid_core::{GridError, Location};
use navgrid_paths::SearchError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    #[error("invalid cell count range [{min}, {max}]")]
    InvalidCellRange { min: i32, max: i32 },

    #[error("cell size must be positive and finite, got {0}")]
    InvalidCellSize(f32),

    #[error("location {0} is outside the field")]
    OutsideField(Location),

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Search(#[from] SearchError),
}
