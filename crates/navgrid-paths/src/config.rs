/// How the terminus of a partial path is chosen when the goal is unreachable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PartialPolicy {
    /// The visited cell with the smallest accumulated cost. Edge costs are
    /// positive, so this is the start cell.
    #[default]
    LowestCost,
    /// The visited cell with the smallest heuristic distance to the goal,
    /// then the smallest accumulated cost.
    ClosestToGoal,
}

/// Tunables for a [`Pathfinder`](crate::Pathfinder).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    pub partial: PartialPolicy,
}

impl SearchConfig {
    /// Config with the given partial-path policy.
    pub const fn with_partial(partial: PartialPolicy) -> Self {
        Self { partial }
    }
}
