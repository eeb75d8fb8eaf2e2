//! A bounded square lattice with a mutable set of walls.
//!
//! [`SquareGrid`] stores its walls densely, one flag per cell in row-major
//! order, so passability checks are a bounds test plus an index.

use crate::error::GridError;
use crate::geom::Location;

/// Cost of an orthogonal step.
pub const ORTHOGONAL_COST: i32 = 10;

/// Cost of a diagonal step (√2 scaled by 10 and truncated).
pub const DIAGONAL_COST: i32 = 14;

/// Largest number of cells a grid may hold (a 4096 × 4096 board).
///
/// Grids and the search caches built for them store one entry per cell, so
/// this bounds their memory use.
pub const MAX_CELLS: usize = 1 << 24;

/// A `width × height` grid of cells, some of which are walls.
///
/// Every wall lies within `[0, width) × [0, height)`. The grid never changes
/// its own walls; callers add and remove them between searches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SquareGrid {
    width: i32,
    height: i32,
    walls: Vec<bool>,
    wall_count: usize,
}

impl SquareGrid {
    /// Create an empty grid.
    ///
    /// Both dimensions must be positive and `width * height` must not exceed
    /// [`MAX_CELLS`].
    pub fn new(width: i32, height: i32) -> Result<Self, GridError> {
        if width <= 0 {
            return Err(GridError::InvalidWidth(width));
        }
        if height <= 0 {
            return Err(GridError::InvalidHeight(height));
        }
        let len = (width as usize) * (height as usize);
        if len > MAX_CELLS {
            return Err(GridError::TooLarge { width, height });
        }
        Ok(Self {
            width,
            height,
            walls: vec![false; len],
            wall_count: 0,
        })
    }

    /// Create a grid with an initial set of walls.
    ///
    /// Walls outside the grid are dropped.
    pub fn with_walls(
        width: i32,
        height: i32,
        walls: impl IntoIterator<Item = Location>,
    ) -> Result<Self, GridError> {
        let mut grid = Self::new(width, height)?;
        let mut dropped = 0usize;
        for w in walls {
            if grid.in_bounds(w) {
                grid.add_wall(w);
            } else {
                dropped += 1;
            }
        }
        if dropped > 0 {
            log::debug!("dropped {dropped} out-of-bounds walls for {width}x{height} grid");
        }
        Ok(grid)
    }

    /// Grid width in cells.
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Grid height in cells.
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.walls.len()
    }

    /// Always `false`: a grid has at least one cell.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.walls.is_empty()
    }

    /// Whether `loc` lies within `[0, width) × [0, height)`.
    #[inline]
    pub fn in_bounds(&self, loc: Location) -> bool {
        0 <= loc.x && loc.x < self.width && 0 <= loc.y && loc.y < self.height
    }

    /// Whether `loc` is in bounds and not a wall.
    #[inline]
    pub fn passable(&self, loc: Location) -> bool {
        match self.index(loc) {
            Some(i) => !self.walls[i],
            None => false,
        }
    }

    /// Whether `loc` is currently a wall. Out-of-bounds cells are not walls.
    #[inline]
    pub fn is_wall(&self, loc: Location) -> bool {
        self.index(loc).is_some_and(|i| self.walls[i])
    }

    /// Mark `loc` impassable. Returns whether the wall set changed.
    pub fn add_wall(&mut self, loc: Location) -> bool {
        let Some(i) = self.index(loc) else {
            return false;
        };
        if self.walls[i] {
            return false;
        }
        self.walls[i] = true;
        self.wall_count += 1;
        true
    }

    /// Make `loc` passable again. Returns whether the wall set changed.
    pub fn remove_wall(&mut self, loc: Location) -> bool {
        let Some(i) = self.index(loc) else {
            return false;
        };
        if !self.walls[i] {
            return false;
        }
        self.walls[i] = false;
        self.wall_count -= 1;
        true
    }

    /// Number of walls.
    #[inline]
    pub fn wall_count(&self) -> usize {
        self.wall_count
    }

    /// Iterate over the walls in row-major order.
    pub fn walls(&self) -> impl Iterator<Item = Location> + '_ {
        self.walls
            .iter()
            .enumerate()
            .filter(|&(_, &w)| w)
            .map(|(i, _)| self.location(i))
    }

    /// Row-major iterator over every cell of the grid.
    pub fn locations(&self) -> impl Iterator<Item = Location> + use<> {
        let (w, h) = (self.width, self.height);
        (0..h).flat_map(move |y| (0..w).map(move |x| Location::new(x, y)))
    }

    /// Passable cells among the eight adjacent to `loc`, in the order
    /// N, NE, E, SE, S, SW, W, NW.
    ///
    /// Any location is accepted; one lying far outside the grid simply has
    /// no passable neighbours.
    pub fn neighbors(&self, loc: Location) -> impl Iterator<Item = Location> + '_ {
        Location::DIRS_8
            .into_iter()
            .filter_map(move |d| loc.checked_add(d))
            .filter(|&n| self.passable(n))
    }

    /// Cost of stepping from `a` to the adjacent cell `b`: 14 for a
    /// diagonal step, 10 otherwise.
    ///
    /// Adjacency is not checked.
    #[inline]
    pub fn cost_to_neighbor(a: Location, b: Location) -> i32 {
        if a.is_diagonal_to(b) {
            DIAGONAL_COST
        } else {
            ORTHOGONAL_COST
        }
    }

    // -----------------------------------------------------------------------
    // Coordinate helpers
    // -----------------------------------------------------------------------

    /// Convert a `Location` to a flat row-major index. Returns `None` if out
    /// of bounds.
    #[inline]
    pub fn index(&self, loc: Location) -> Option<usize> {
        if !self.in_bounds(loc) {
            return None;
        }
        Some(loc.y as usize * self.width as usize + loc.x as usize)
    }

    /// Convert a flat index back to a `Location`.
    #[inline]
    pub fn location(&self, idx: usize) -> Location {
        let w = self.width as usize;
        Location::new((idx % w) as i32, (idx / w) as i32)
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::*;

    /// Wire shape of a grid: dimensions plus the wall list.
    #[derive(serde::Serialize, serde::Deserialize)]
    struct GridLayout {
        width: i32,
        height: i32,
        #[serde(default)]
        walls: Vec<Location>,
    }

    impl serde::Serialize for SquareGrid {
        fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            GridLayout {
                width: self.width,
                height: self.height,
                walls: self.walls().collect(),
            }
            .serialize(serializer)
        }
    }

    impl<'de> serde::Deserialize<'de> for SquareGrid {
        fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let layout = GridLayout::deserialize(deserializer)?;
            SquareGrid::with_walls(layout.width, layout.height, layout.walls)
                .map_err(serde::de::Error::custom)
        }
    }
}
