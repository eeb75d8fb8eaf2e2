use navgrid_core::Location;
use thiserror::Error;

/// Caller contract violations detected before a search starts.
///
/// An unreachable goal is not an error; see
/// [`SearchResult::found`](crate::SearchResult::found).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("grid does not contain start location {0}")]
    StartOutOfBounds(Location),

    #[error("grid does not contain goal location {0}")]
    GoalOutOfBounds(Location),

    #[error("start location {0} is impassable")]
    StartImpassable(Location),
}
