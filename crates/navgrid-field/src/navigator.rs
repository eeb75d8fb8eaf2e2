//! Per-unit path bookkeeping.
//!
//! The [`Navigator`] remembers the last path handed to each unit so that,
//! when a cell gets blocked, the caller can find out whose remaining route
//! crosses it and ask for a new one.

use std::collections::BTreeMap;

use navgrid_core::Location;
use navgrid_paths::{Pathfinder, SearchConfig};
use rand::Rng;

use crate::error::FieldError;
use crate::field::Field;

/// Opaque identifier of a unit moving on the field.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnitId(pub u32);

/// Hands out paths to units and keeps track of them.
pub struct Navigator {
    pathfinder: Pathfinder,
    paths: BTreeMap<UnitId, Vec<Location>>,
}

impl Navigator {
    pub fn new(field: &Field) -> Self {
        Self::with_config(field, SearchConfig::default())
    }

    pub fn with_config(field: &Field, config: SearchConfig) -> Self {
        Self {
            pathfinder: Pathfinder::with_config(field.grid(), config),
            paths: BTreeMap::new(),
        }
    }

    /// Request a complete path for `unit` from `start` to `goal`.
    ///
    /// The path is stored, and `true` returned, only if it reaches the goal.
    /// A start that is off the field or blocked yields `Ok(false)`.
    pub fn request_path(
        &mut self,
        field: &Field,
        unit: UnitId,
        start: Location,
        goal: Location,
    ) -> Result<bool, FieldError> {
        if !self.can_start(field, unit, start) {
            return Ok(false);
        }
        let result = self.pathfinder.find_path(field.grid(), start, goal)?;
        if !result.found {
            return Ok(false);
        }
        self.paths.insert(unit, result.path);
        Ok(true)
    }

    /// Send `unit` toward a random passable cell.
    ///
    /// A partial path is stored when the chosen cell is unreachable, so this
    /// returns `true` whenever the unit stands on a passable cell and one
    /// exists.
    pub fn request_path_to_random(
        &mut self,
        field: &Field,
        unit: UnitId,
        start: Location,
        rng: &mut impl Rng,
    ) -> Result<bool, FieldError> {
        if !self.can_start(field, unit, start) {
            return Ok(false);
        }
        let Some(goal) = field.pick_random_unblocked(rng) else {
            return Ok(false);
        };
        let result = self.pathfinder.find_path(field.grid(), start, goal)?;
        self.paths.insert(unit, result.path);
        Ok(true)
    }

    /// Re-plan `unit` from `start` toward the end of its stored path.
    ///
    /// On success the stored path is replaced. If the old destination can no
    /// longer be reached the stored path is dropped and `false` returned, so
    /// the caller can pick another destination.
    pub fn replan(
        &mut self,
        field: &Field,
        unit: UnitId,
        start: Location,
    ) -> Result<bool, FieldError> {
        let Some(&goal) = self.paths.get(&unit).and_then(|p| p.last()) else {
            return Ok(false);
        };
        if !self.can_start(field, unit, start) {
            return Ok(false);
        }
        let result = self.pathfinder.find_path(field.grid(), start, goal)?;
        if result.found {
            self.paths.insert(unit, result.path);
        } else {
            log::debug!("{unit:?} can no longer reach {goal}");
            self.paths.remove(&unit);
        }
        Ok(result.found)
    }

    /// Stored path of `unit`.
    pub fn path(&self, unit: UnitId) -> Option<&[Location]> {
        self.paths.get(&unit).map(Vec::as_slice)
    }

    pub fn clear_path(&mut self, unit: UnitId) {
        self.paths.remove(&unit);
    }

    /// Units whose stored path still has `loc` ahead of them.
    ///
    /// `progress` gives the index, within its path, of the next point each
    /// unit is heading to. Results are ordered by unit id.
    pub fn units_affected_by(
        &self,
        loc: Location,
        progress: impl Fn(UnitId) -> usize,
    ) -> Vec<UnitId> {
        self.paths
            .iter()
            .filter(|(unit, path)| {
                path.iter()
                    .position(|&p| p == loc)
                    .is_some_and(|i| progress(**unit) <= i)
            })
            .map(|(&unit, _)| unit)
            .collect()
    }

    fn can_start(&self, field: &Field, unit: UnitId, start: Location) -> bool {
        if !field.grid().in_bounds(start) {
            log::warn!("path requested by {unit:?} which is not on the field ({start})");
            return false;
        }
        field.grid().passable(start)
    }
}
