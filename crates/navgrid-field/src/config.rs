//! Board configuration.

use crate::error::FieldError;

/// Parameters for building a [`Field`](crate::Field).
///
/// The side length of the board, in cells, is picked uniformly from
/// `[min_cell_count, max_cell_count]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FieldConfig {
    pub min_cell_count: i32,
    pub max_cell_count: i32,
    /// Side of one cell in world units.
    pub cell_size: f32,
    /// World position of the board's center.
    pub center: (f32, f32),
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            min_cell_count: 5,
            max_cell_count: 10,
            cell_size: 1.0,
            center: (0.0, 0.0),
        }
    }
}

impl FieldConfig {
    pub fn validate(&self) -> Result<(), FieldError> {
        if self.min_cell_count <= 0 || self.min_cell_count > self.max_cell_count {
            return Err(FieldError::InvalidCellRange {
                min: self.min_cell_count,
                max: self.max_cell_count,
            });
        }
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(FieldError::InvalidCellSize(self.cell_size));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(FieldConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_bad_ranges() {
        let c = FieldConfig {
            min_cell_count: 0,
            ..Default::default()
        };
        assert_eq!(
            c.validate(),
            Err(FieldError::InvalidCellRange { min: 0, max: 10 })
        );

        let c = FieldConfig {
            min_cell_count: 8,
            max_cell_count: 6,
            ..Default::default()
        };
        assert!(matches!(
            c.validate(),
            Err(FieldError::InvalidCellRange { min: 8, max: 6 })
        ));
    }

    #[test]
    fn rejects_bad_cell_size() {
        for size in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let c = FieldConfig {
                cell_size: size,
                ..Default::default()
            };
            assert!(matches!(c.validate(), Err(FieldError::InvalidCellSize(_))));
        }
    }
}
