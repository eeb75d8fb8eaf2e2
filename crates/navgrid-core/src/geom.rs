//! Geometry primitive: [`Location`].
//!
//! Coordinates follow the board convention used across the workspace: X grows
//! to the east and Y grows to the north.

use std::fmt;
use std::ops::{Add, Sub};

/// An integer grid-cell coordinate.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    pub x: i32,
    pub y: i32,
}

impl Location {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Unit offsets to the eight adjacent cells, in the order
    /// N, NE, E, SE, S, SW, W, NW.
    pub const DIRS_8: [Location; 8] = [
        Self::new(0, 1),
        Self::new(1, 1),
        Self::new(1, 0),
        Self::new(1, -1),
        Self::new(0, -1),
        Self::new(-1, -1),
        Self::new(-1, 0),
        Self::new(-1, 1),
    ];

    /// Create a new location.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Return a location shifted by (dx, dy).
    #[inline]
    pub const fn shift(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// All eight neighbours, in [`DIRS_8`](Self::DIRS_8) order. No bounds
    /// filtering is done here, so `self` must not sit on an `i32` limit; see
    /// [`checked_add`](Self::checked_add).
    #[inline]
    pub fn neighbors_8(self) -> [Location; 8] {
        Self::DIRS_8.map(|d| self + d)
    }

    /// `self + other`, or `None` if either coordinate overflows.
    #[inline]
    pub const fn checked_add(self, other: Location) -> Option<Location> {
        match (self.x.checked_add(other.x), self.y.checked_add(other.y)) {
            (Some(x), Some(y)) => Some(Self { x, y }),
            _ => None,
        }
    }

    /// Whether `other` differs from `self` in both coordinates.
    #[inline]
    pub const fn is_diagonal_to(self, other: Location) -> bool {
        self.x != other.x && self.y != other.y
    }
}

// --- trait impls for Location ---

impl PartialOrd for Location {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Location {
    /// Row-major: by `y`, then by `x`.
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Location {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl Add for Location {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Location {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_arithmetic() {
        let a = Location::new(1, 2);
        let b = Location::new(3, 4);
        assert_eq!(a + b, Location::new(4, 6));
        assert_eq!(b - a, Location::new(2, 2));
        assert_eq!(a.shift(-1, 1), Location::new(0, 3));
    }

    #[test]
    fn neighbors_8_order() {
        let n = Location::new(5, 5).neighbors_8();
        assert_eq!(n[0], Location::new(5, 6)); // N
        assert_eq!(n[1], Location::new(6, 6)); // NE
        assert_eq!(n[2], Location::new(6, 5)); // E
        assert_eq!(n[4], Location::new(5, 4)); // S
        assert_eq!(n[7], Location::new(4, 6)); // NW
    }

    #[test]
    fn checked_add_at_the_edges() {
        let d = Location::new(1, -1);
        assert_eq!(Location::new(2, 2).checked_add(d), Some(Location::new(3, 1)));
        assert_eq!(Location::new(i32::MAX, 0).checked_add(d), None);
        assert_eq!(Location::new(0, i32::MIN).checked_add(d), None);
        assert_eq!(
            Location::new(i32::MAX - 1, i32::MIN + 1).checked_add(d),
            Some(Location::new(i32::MAX, i32::MIN))
        );
    }

    #[test]
    fn diagonal_detection() {
        let o = Location::ZERO;
        assert!(o.is_diagonal_to(Location::new(1, -1)));
        assert!(!o.is_diagonal_to(Location::new(0, 1)));
        assert!(!o.is_diagonal_to(o));
    }

    #[test]
    fn ordering_is_row_major() {
        let mut v = vec![
            Location::new(1, 1),
            Location::new(0, 1),
            Location::new(2, 0),
        ];
        v.sort();
        assert_eq!(
            v,
            vec![Location::new(2, 0), Location::new(0, 1), Location::new(1, 1)]
        );
    }

    #[test]
    fn display_and_from_tuple() {
        let l: Location = (3, -7).into();
        assert_eq!(l.to_string(), "(3, -7)");
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn location_round_trip() {
        let l = Location::new(3, 7);
        let json = serde_json::to_string(&l).unwrap();
        assert_eq!(json, r#"{"x":3,"y":7}"#);
        let back: Location = serde_json::from_str(&json).unwrap();
        assert_eq!(l, back);
    }
}
