//! Toroidal hex geometry with axial coordinates

use std::fmt;

/// Cells per axis. Both axes wrap at this size.
pub const GRID_SIZE: i8 = 7;

/// Axial hex coordinates, always wrapped into `[0, GRID_SIZE)`
///
/// Ordering is `r` then `q`, which is the order every tie-break in the
/// solver uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Hex {
    r: i8,
    q: i8,
}

impl Hex {
    /// Wrap any integer pair onto the torus (-1 becomes GRID_SIZE - 1)
    pub const fn new(r: i32, q: i32) -> Self {
        let n = GRID_SIZE as i32;
        Self {
            r: r.rem_euclid(n) as i8,
            q: q.rem_euclid(n) as i8,
        }
    }

    pub const fn r(&self) -> i8 {
        self.r
    }

    pub const fn q(&self) -> i8 {
        self.q
    }

    /// Check that a raw pair is already in canonical range
    pub fn in_range(r: i32, q: i32) -> bool {
        let n = GRID_SIZE as i32;
        (0..n).contains(&r) && (0..n).contains(&q)
    }

    /// Every cell on the grid, ordered by `r` then `q`
    pub fn all() -> impl Iterator<Item = Hex> {
        (0..GRID_SIZE as i32).flat_map(|r| (0..GRID_SIZE as i32).map(move |q| Hex::new(r, q)))
    }

    /// Step once in a direction, wrapping at the edges
    pub fn step(&self, direction: Direction) -> Hex {
        Hex::new(
            self.r as i32 + direction.dr as i32,
            self.q as i32 + direction.dq as i32,
        )
    }

    /// The six wrapped neighbors, in `DIRECTIONS` order
    pub fn neighbors(&self) -> [Hex; 6] {
        DIRECTIONS.map(|d| self.step(d))
    }

    /// Hex distance on the torus
    ///
    /// Minimum axial distance over the nine lifts of `other` into the
    /// neighbouring copies of the grid. This is the exact graph distance,
    /// so it never overestimates.
    pub fn distance_to(&self, other: Hex) -> u8 {
        let n = GRID_SIZE as i32;
        let dr = other.r as i32 - self.r as i32;
        let dq = other.q as i32 - self.q as i32;

        let mut best = i32::MAX;
        for kr in -1..=1 {
            for kq in -1..=1 {
                best = best.min(axial_distance(dr + kr * n, dq + kq * n));
            }
        }
        best as u8
    }

    /// Unit direction from this cell to an adjacent one, if adjacent
    ///
    /// Raw deltas of `±(GRID_SIZE - 1)` fold to `∓1` across the seam.
    pub fn direction_to(&self, other: Hex) -> Option<Direction> {
        let dr = fold_delta(other.r as i32 - self.r as i32);
        let dq = fold_delta(other.q as i32 - self.q as i32);
        Direction::from_delta(dr, dq)
    }
}

impl fmt::Display for Hex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.r, self.q)
    }
}

/// Unit hex direction (dr, dq)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Direction {
    dr: i8,
    dq: i8,
}

impl Direction {
    const fn unit(dr: i8, dq: i8) -> Self {
        Self { dr, dq }
    }

    pub const fn dr(&self) -> i8 {
        self.dr
    }

    pub const fn dq(&self) -> i8 {
        self.dq
    }

    /// Look up the direction with this exact delta
    pub fn from_delta(dr: i32, dq: i32) -> Option<Direction> {
        DIRECTIONS
            .iter()
            .copied()
            .find(|d| d.dr as i32 == dr && d.dq as i32 == dq)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.dr, self.dq)
    }
}

/// Direction vectors in axial coordinates (dr, dq)
pub const DIRECTIONS: [Direction; 6] = [
    Direction::unit(0, 1),
    Direction::unit(-1, 1),
    Direction::unit(-1, 0),
    Direction::unit(0, -1),
    Direction::unit(1, -1),
    Direction::unit(1, 0),
];

fn axial_distance(dr: i32, dq: i32) -> i32 {
    (dr.abs() + dq.abs() + (dr + dq).abs()) / 2
}

/// Map a raw coordinate delta to its shortest signed form on the torus
fn fold_delta(delta: i32) -> i32 {
    let n = GRID_SIZE as i32;
    let wrapped = delta.rem_euclid(n);
    if wrapped > n / 2 {
        wrapped - n
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const N: i32 = GRID_SIZE as i32;

    #[test]
    fn test_wrap_normalization() {
        assert_eq!(Hex::new(N, N), Hex::new(0, 0));
        assert_eq!(Hex::new(-1, -1), Hex::new(N - 1, N - 1));
        assert_eq!(Hex::new(-1, -1).r(), 6);
        assert_eq!(Hex::new(-8, 15).q(), 1);
        assert_eq!(Hex::new(-8, 15).r(), 6);
    }

    #[test]
    fn test_wrap_is_idempotent() {
        for hex in Hex::all() {
            assert_eq!(Hex::new(hex.r() as i32, hex.q() as i32), hex);
        }
        assert_eq!(Hex::all().count(), 49);
    }

    #[test]
    fn test_neighbors() {
        for hex in Hex::all() {
            let neighbors = hex.neighbors();
            assert_eq!(neighbors.len(), 6);
            for n in neighbors {
                assert!(Hex::in_range(n.r() as i32, n.q() as i32));
                assert_eq!(hex.distance_to(n), 1);
            }
            let mut unique = neighbors.to_vec();
            unique.sort();
            unique.dedup();
            assert_eq!(unique.len(), 6);
        }
    }

    #[test]
    fn test_neighbors_wrap() {
        let corner = Hex::new(0, 6);
        let neighbors = corner.neighbors();
        assert_eq!(neighbors[0], Hex::new(0, 0)); // q wraps 7 -> 0
        assert_eq!(neighbors[1], Hex::new(6, 0));
        assert_eq!(neighbors[2], Hex::new(6, 6));
    }

    #[test]
    fn test_distance() {
        assert_eq!(Hex::new(0, 0).distance_to(Hex::new(0, 0)), 0);
        assert_eq!(Hex::new(0, 0).distance_to(Hex::new(3, 1)), 4);
        // Shorter across the seam than through the middle
        assert_eq!(Hex::new(0, 0).distance_to(Hex::new(6, 6)), 2);
        assert_eq!(Hex::new(0, 0).distance_to(Hex::new(3, 3)), 4);
        assert_eq!(Hex::new(3, 3).distance_to(Hex::new(3, 5)), 2);
    }

    #[test]
    fn test_distance_is_symmetric() {
        for a in Hex::all() {
            for b in Hex::all() {
                assert_eq!(a.distance_to(b), b.distance_to(a));
            }
        }
    }

    #[test]
    fn test_direction_to() {
        let from = Hex::new(5, 6);
        assert_eq!(from.direction_to(Hex::new(4, 0)), Direction::from_delta(-1, 1));
        assert_eq!(Hex::new(0, 0).direction_to(Hex::new(0, 6)), Direction::from_delta(0, -1));
        assert_eq!(Hex::new(6, 0).direction_to(Hex::new(0, 0)), Direction::from_delta(1, 0));
        assert_eq!(Hex::new(0, 0).direction_to(Hex::new(2, 0)), None);
        assert_eq!(Hex::new(0, 0).direction_to(Hex::new(1, 1)), None);
    }

    #[test]
    fn test_step_matches_direction_to() {
        for hex in Hex::all() {
            for d in DIRECTIONS {
                assert_eq!(hex.direction_to(hex.step(d)), Some(d));
            }
        }
    }
}
