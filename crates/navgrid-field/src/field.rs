//! The board: a square grid of cells laid over world coordinates.
//!
//! World positions are `(x, z)` pairs on the board plane; the cell at
//! `(0, 0)` sits in the corner with the smallest `x` and `z`.

use navgrid_core::{Location, SquareGrid};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::config::FieldConfig;
use crate::error::FieldError;

/// A state change on the board, queued until the caller drains it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEvent {
    Marked(Location),
    Unmarked(Location),
    Blocked(Location),
    Unblocked(Location),
}

impl FieldEvent {
    /// Cell the event is about.
    pub fn location(self) -> Location {
        match self {
            Self::Marked(l) | Self::Unmarked(l) | Self::Blocked(l) | Self::Unblocked(l) => l,
        }
    }
}

/// A square board of cells.
///
/// Blocked cells are walls of the underlying [`SquareGrid`]. Occupied cells
/// (cells with at least one unit on them) cannot be blocked, unblocked,
/// marked or unmarked.
#[derive(Debug, Clone)]
pub struct Field {
    grid: SquareGrid,
    cell_size: f32,
    bottom_left: (f32, f32),
    occupancy: Vec<u32>,
    marked: Vec<Location>,
    events: Vec<FieldEvent>,
}

impl Field {
    /// Build a board whose side is picked at random from the configured range.
    pub fn new(config: &FieldConfig, rng: &mut impl Rng) -> Result<Self, FieldError> {
        config.validate()?;
        let n = rng.random_range(config.min_cell_count..=config.max_cell_count);
        Self::with_cell_count(n, config)
    }

    /// Build a board of `cell_count × cell_count` cells. The configured count
    /// range is ignored.
    pub fn with_cell_count(cell_count: i32, config: &FieldConfig) -> Result<Self, FieldError> {
        if !(config.cell_size.is_finite() && config.cell_size > 0.0) {
            return Err(FieldError::InvalidCellSize(config.cell_size));
        }
        let grid = SquareGrid::new(cell_count, cell_count)?;
        let half = cell_count as f32 * config.cell_size / 2.0;
        let bottom_left = (config.center.0 - half, config.center.1 - half);
        log::debug!("field of {cell_count}x{cell_count} cells, bottom left at {bottom_left:?}");
        Ok(Self {
            occupancy: vec![0; grid.len()],
            grid,
            cell_size: config.cell_size,
            bottom_left,
            marked: Vec::new(),
            events: Vec::new(),
        })
    }

    /// Side of the board in cells.
    #[inline]
    pub fn cell_count(&self) -> i32 {
        self.grid.width()
    }

    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// The grid holding the blocked cells.
    #[inline]
    pub fn grid(&self) -> &SquareGrid {
        &self.grid
    }

    // -----------------------------------------------------------------------
    // World <-> grid
    // -----------------------------------------------------------------------

    /// Cell containing the world position `(x, z)`, if it is on the board.
    pub fn location_by_point(&self, x: f32, z: f32) -> Option<Location> {
        let i = ((x - self.bottom_left.0) / self.cell_size).floor();
        let j = ((z - self.bottom_left.1) / self.cell_size).floor();
        if !(i.is_finite() && j.is_finite()) {
            return None;
        }
        let loc = Location::new(i as i32, j as i32);
        self.grid.in_bounds(loc).then_some(loc)
    }

    /// World position of the center of `loc`.
    pub fn point_by_location(&self, loc: Location) -> Option<(f32, f32)> {
        if !self.grid.in_bounds(loc) {
            return None;
        }
        let half = self.cell_size / 2.0;
        Some((
            self.bottom_left.0 + loc.x as f32 * self.cell_size + half,
            self.bottom_left.1 + loc.y as f32 * self.cell_size + half,
        ))
    }

    // -----------------------------------------------------------------------
    // Occupancy
    // -----------------------------------------------------------------------

    /// Record one more unit standing on `loc`.
    pub fn occupy(&mut self, loc: Location) -> Result<(), FieldError> {
        let i = self.cell_index(loc)?;
        self.occupancy[i] += 1;
        Ok(())
    }

    /// Record one unit leaving `loc`.
    pub fn unoccupy(&mut self, loc: Location) -> Result<(), FieldError> {
        let i = self.cell_index(loc)?;
        self.occupancy[i] = self.occupancy[i].saturating_sub(1);
        Ok(())
    }

    pub fn is_occupied(&self, loc: Location) -> bool {
        self.grid.index(loc).is_some_and(|i| self.occupancy[i] > 0)
    }

    // -----------------------------------------------------------------------
    // Cell state
    // -----------------------------------------------------------------------

    /// Mark `loc`, or unmark it if already marked.
    ///
    /// Returns `Ok(false)` without changing anything if the cell is occupied.
    pub fn toggle_mark(&mut self, loc: Location) -> Result<bool, FieldError> {
        self.cell_index(loc)?;
        if self.is_occupied(loc) {
            return Ok(false);
        }
        if let Some(pos) = self.marked.iter().position(|&m| m == loc) {
            self.marked.remove(pos);
            self.events.push(FieldEvent::Unmarked(loc));
        } else {
            self.marked.push(loc);
            self.events.push(FieldEvent::Marked(loc));
        }
        Ok(true)
    }

    /// Make `loc` impassable. Returns whether the cell changed.
    pub fn block(&mut self, loc: Location) -> Result<bool, FieldError> {
        self.cell_index(loc)?;
        if self.is_occupied(loc) || !self.grid.add_wall(loc) {
            return Ok(false);
        }
        self.events.push(FieldEvent::Blocked(loc));
        Ok(true)
    }

    /// Make `loc` passable again. Returns whether the cell changed.
    pub fn unblock(&mut self, loc: Location) -> Result<bool, FieldError> {
        self.cell_index(loc)?;
        if self.is_occupied(loc) || !self.grid.remove_wall(loc) {
            return Ok(false);
        }
        self.events.push(FieldEvent::Unblocked(loc));
        Ok(true)
    }

    pub fn is_blocked(&self, loc: Location) -> bool {
        self.grid.is_wall(loc)
    }

    pub fn is_marked(&self, loc: Location) -> bool {
        self.marked.contains(&loc)
    }

    /// Take every event queued since the last call, oldest first.
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, FieldEvent> {
        self.events.drain(..)
    }

    /// Discard every queued event.
    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Passable cells in row-major order.
    pub fn unblocked_locations(&self) -> impl Iterator<Item = Location> + '_ {
        self.grid.locations().filter(|&l| self.grid.passable(l))
    }

    /// Marked cells in the order they were marked.
    pub fn marked_locations(&self) -> &[Location] {
        &self.marked
    }

    /// A uniformly chosen passable cell, or `None` if every cell is blocked.
    pub fn pick_random_unblocked(&self, rng: &mut impl Rng) -> Option<Location> {
        let free = self.grid.len() - self.grid.wall_count();
        if free == 0 {
            return None;
        }
        self.unblocked_locations().nth(rng.random_range(0..free))
    }

    /// Marked cells that are not blocked, in random order.
    pub fn unblocked_marked_shuffled(&self, rng: &mut impl Rng) -> Vec<Location> {
        let mut locs: Vec<_> = self
            .marked
            .iter()
            .copied()
            .filter(|&l| self.grid.passable(l))
            .collect();
        locs.shuffle(rng);
        locs
    }

    fn cell_index(&self, loc: Location) -> Result<usize, FieldError> {
        self.grid.index(loc).ok_or(FieldError::OutsideField(loc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn loc(x: i32, y: i32) -> Location {
        Location::new(x, y)
    }

    fn field(n: i32) -> Field {
        Field::with_cell_count(n, &FieldConfig::default()).unwrap()
    }

    #[test]
    fn random_size_within_range() {
        let config = FieldConfig {
            min_cell_count: 3,
            max_cell_count: 6,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let f = Field::new(&config, &mut rng).unwrap();
            assert!((3..=6).contains(&f.cell_count()));
            assert_eq!(f.grid().width(), f.grid().height());
        }
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = FieldConfig {
            cell_size: -1.0,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            Field::new(&config, &mut rng),
            Err(FieldError::InvalidCellSize(_))
        ));
        assert!(matches!(
            Field::with_cell_count(0, &FieldConfig::default()),
            Err(FieldError::Grid(_))
        ));
    }

    #[test]
    fn world_mapping() {
        // 4 cells of size 2 centered on (10, 0): spans x in [6, 14), z in [-4, 4).
        let config = FieldConfig {
            cell_size: 2.0,
            center: (10.0, 0.0),
            ..Default::default()
        };
        let f = Field::with_cell_count(4, &config).unwrap();
        assert_eq!(f.location_by_point(6.0, -4.0), Some(loc(0, 0)));
        assert_eq!(f.location_by_point(13.9, 3.9), Some(loc(3, 3)));
        assert_eq!(f.location_by_point(9.0, 1.0), Some(loc(1, 2)));
        assert_eq!(f.location_by_point(14.0, 0.0), None);
        assert_eq!(f.location_by_point(5.9, 0.0), None);
        assert_eq!(f.location_by_point(f32::NAN, 0.0), None);

        assert_eq!(f.point_by_location(loc(0, 0)), Some((7.0, -3.0)));
        assert_eq!(f.point_by_location(loc(3, 1)), Some((13.0, -1.0)));
        assert_eq!(f.point_by_location(loc(4, 0)), None);

        for l in f.grid().locations() {
            let (x, z) = f.point_by_location(l).unwrap();
            assert_eq!(f.location_by_point(x, z), Some(l));
        }
    }

    #[test]
    fn block_and_unblock_emit_events() {
        let mut f = field(5);
        assert_eq!(f.block(loc(1, 1)), Ok(true));
        assert_eq!(f.block(loc(1, 1)), Ok(false));
        assert!(f.is_blocked(loc(1, 1)));
        assert!(!f.grid().passable(loc(1, 1)));
        assert_eq!(f.unblock(loc(1, 1)), Ok(true));
        assert_eq!(f.unblock(loc(1, 1)), Ok(false));

        let events: Vec<_> = f.drain_events().collect();
        assert_eq!(
            events,
            vec![FieldEvent::Blocked(loc(1, 1)), FieldEvent::Unblocked(loc(1, 1))]
        );
        assert_eq!(f.drain_events().count(), 0);
    }

    #[test]
    fn clear_events_discards_the_queue() {
        let mut f = field(5);
        f.block(loc(0, 0)).unwrap();
        f.toggle_mark(loc(2, 2)).unwrap();
        f.clear_events();
        assert_eq!(f.drain_events().count(), 0);
        // Only the queue is dropped, not the state.
        assert!(f.is_blocked(loc(0, 0)));
        assert!(f.is_marked(loc(2, 2)));

        f.unblock(loc(0, 0)).unwrap();
        assert_eq!(
            f.drain_events().collect::<Vec<_>>(),
            vec![FieldEvent::Unblocked(loc(0, 0))]
        );
    }

    #[test]
    fn occupied_cells_are_locked() {
        let mut f = field(5);
        let c = loc(2, 2);
        f.occupy(c).unwrap();
        f.occupy(c).unwrap();
        assert!(f.is_occupied(c));
        assert_eq!(f.block(c), Ok(false));
        assert_eq!(f.toggle_mark(c), Ok(false));

        f.unoccupy(c).unwrap();
        assert!(f.is_occupied(c));
        f.unoccupy(c).unwrap();
        assert!(!f.is_occupied(c));
        f.unoccupy(c).unwrap();
        assert!(!f.is_occupied(c));

        assert_eq!(f.block(c), Ok(true));
        assert_eq!(f.drain_events().collect::<Vec<_>>(), vec![FieldEvent::Blocked(c)]);
    }

    #[test]
    fn outside_cells_are_errors() {
        let mut f = field(3);
        let out = loc(3, 0);
        assert_eq!(f.block(out), Err(FieldError::OutsideField(out)));
        assert_eq!(f.unblock(out), Err(FieldError::OutsideField(out)));
        assert_eq!(f.toggle_mark(out), Err(FieldError::OutsideField(out)));
        assert_eq!(f.occupy(out), Err(FieldError::OutsideField(out)));
        assert!(!f.is_occupied(out));
    }

    #[test]
    fn toggle_mark() {
        let mut f = field(4);
        assert_eq!(f.toggle_mark(loc(0, 1)), Ok(true));
        assert_eq!(f.toggle_mark(loc(2, 3)), Ok(true));
        assert_eq!(f.marked_locations(), &[loc(0, 1), loc(2, 3)]);
        assert_eq!(f.toggle_mark(loc(0, 1)), Ok(true));
        assert!(!f.is_marked(loc(0, 1)));
        assert!(f.is_marked(loc(2, 3)));
        let events: Vec<_> = f.drain_events().map(FieldEvent::location).collect();
        assert_eq!(events, vec![loc(0, 1), loc(2, 3), loc(0, 1)]);
    }

    #[test]
    fn random_picks_avoid_blocked_cells() {
        let mut f = field(3);
        let cells: Vec<_> = f.grid().locations().collect();
        for l in cells {
            if l != loc(1, 2) {
                f.block(l).unwrap();
            }
        }
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..10 {
            assert_eq!(f.pick_random_unblocked(&mut rng), Some(loc(1, 2)));
        }
        f.block(loc(1, 2)).unwrap();
        assert_eq!(f.pick_random_unblocked(&mut rng), None);
        assert_eq!(f.unblocked_locations().count(), 0);
    }

    #[test]
    fn unblocked_marked_shuffled_filters_blocked() {
        let mut f = field(5);
        for l in [loc(0, 0), loc(1, 1), loc(2, 2), loc(3, 3)] {
            f.toggle_mark(l).unwrap();
        }
        f.block(loc(1, 1)).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let mut got = f.unblocked_marked_shuffled(&mut rng);
        got.sort();
        assert_eq!(got, vec![loc(0, 0), loc(2, 2), loc(3, 3)]);
    }
}
