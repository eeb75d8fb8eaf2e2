use navgrid_core::{Location, SquareGrid};

use crate::distance::octile;

/// Minimal pathfinding interface — provides neighbor enumeration.
pub trait Pather {
    /// Append neighbors of `p` into `buf`. The caller clears `buf` before calling.
    fn neighbors(&self, p: Location, buf: &mut Vec<Location>);
}

/// Pather with weighted (non-negative) edges.
pub trait WeightedPather: Pather {
    /// Cost of moving from `from` to adjacent `to`.
    fn cost(&self, from: Location, to: Location) -> i32;
}

/// Full A* pather with an admissible heuristic.
pub trait AstarPather: WeightedPather {
    /// Heuristic estimate of distance from `from` to `to`.
    /// Must never overestimate the true cost (admissible).
    fn estimate(&self, from: Location, to: Location) -> i32;
}

impl Pather for SquareGrid {
    fn neighbors(&self, p: Location, buf: &mut Vec<Location>) {
        buf.extend(SquareGrid::neighbors(self, p));
    }
}

impl WeightedPather for SquareGrid {
    fn cost(&self, from: Location, to: Location) -> i32 {
        SquareGrid::cost_to_neighbor(from, to)
    }
}

impl AstarPather for SquareGrid {
    fn estimate(&self, from: Location, to: Location) -> i32 {
        octile(from, to)
    }
}
