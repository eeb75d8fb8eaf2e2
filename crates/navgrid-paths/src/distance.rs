//! Distance functions. All of them accept any pair of locations and saturate
//! at `i32::MAX` when the true distance does not fit.

use navgrid_core::Location;

// per-axis differences, never overflowing
#[inline]
fn deltas(a: Location, b: Location) -> (u64, u64) {
    (u64::from(a.x.abs_diff(b.x)), u64::from(a.y.abs_diff(b.y)))
}

#[inline]
fn saturate(d: u64) -> i32 {
    i32::try_from(d).unwrap_or(i32::MAX)
}

/// Manhattan (L1) distance between two locations.
#[inline]
pub fn manhattan(a: Location, b: Location) -> i32 {
    let (dx, dy) = deltas(a, b);
    saturate(dx + dy)
}

/// Chebyshev (L∞) distance between two locations.
#[inline]
pub fn chebyshev(a: Location, b: Location) -> i32 {
    let (dx, dy) = deltas(a, b);
    saturate(dx.max(dy))
}

/// Octile distance scaled by 10, matching the 10/14 step costs of
/// [`SquareGrid`](navgrid_core::SquareGrid).
///
/// Equal to `14 * min(dx, dy) + 10 * (max(dx, dy) - min(dx, dy))`.
#[inline]
pub fn octile(a: Location, b: Location) -> i32 {
    let (dx, dy) = deltas(a, b);
    saturate(10 * dx.max(dy) + 4 * dx.min(dy))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distances() {
        let a = Location::new(1, 1);
        let b = Location::new(4, -1);
        assert_eq!(manhattan(a, b), 5);
        assert_eq!(chebyshev(a, b), 3);
        assert_eq!(octile(a, b), 14 * 2 + 10);
        assert_eq!(octile(b, a), octile(a, b));
        assert_eq!(octile(a, a), 0);
    }

    #[test]
    fn octile_pure_diagonal() {
        assert_eq!(octile(Location::new(0, 0), Location::new(4, 4)), 56);
    }

    #[test]
    fn far_apart_locations_saturate() {
        let lo = Location::new(i32::MIN, i32::MIN);
        let hi = Location::new(i32::MAX, i32::MAX);
        assert_eq!(manhattan(lo, hi), i32::MAX);
        assert_eq!(chebyshev(lo, hi), i32::MAX);
        assert_eq!(octile(lo, hi), i32::MAX);
        assert_eq!(octile(hi, lo), i32::MAX);

        // Large but representable distances are still exact.
        let a = Location::new(-1_000_000, 0);
        let b = Location::new(1_000_000, 500_000);
        assert_eq!(chebyshev(a, b), 2_000_000);
        assert_eq!(manhattan(a, b), 2_500_000);
        assert_eq!(octile(a, b), 22_000_000);
    }
}
