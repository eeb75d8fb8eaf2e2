use thiserror::Error;

/// Errors raised when constructing a [`SquareGrid`](crate::SquareGrid).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("width must be greater than 0, got {0}")]
    InvalidWidth(i32),

    #[error("height must be greater than 0, got {0}")]
    InvalidHeight(i32),

    #[error("{width}x{height} grid exceeds the limit of {max} cells", max = crate::grid::MAX_CELLS)]
    TooLarge { width: i32, height: i32 },
}
