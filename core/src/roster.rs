//! Roster partitioning for the two-square formation.
//!
//! Everything here is a pure function of roster position, so any step can
//! recompute the split without another step having stored it.

use crate::{drone::Drone, types::DroneIndex};
use std::f32::consts::FRAC_PI_2;

/// Cars per square side.
pub const SQUARE_SIDE: usize = 4;
/// Cars per square.
pub const SQUARE_SIZE: usize = SQUARE_SIDE * SQUARE_SIDE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Square {
    /// First half of the roster, starts on the negative-y side.
    A,
    /// Second half of the roster, starts on the positive-y side.
    B,
}

impl Square {
    /// +1 for A, -1 for B. B's layout is A's mirrored through the origin.
    pub fn sign(self) -> f32 {
        match self {
            Square::A => 1.0,
            Square::B => -1.0,
        }
    }

    /// Heading that points the square at the other one across midfield.
    pub fn yaw(self) -> f32 {
        self.sign() * FRAC_PI_2
    }
}

/// Split the roster into (square A, square B), order preserved.
///
/// With fewer than 32 drones the halves come out unequal (B may be empty);
/// with more, B takes every drone past the first square.
pub fn split_squares(drones: &[Drone]) -> (&[Drone], &[Drone]) {
    drones.split_at(drones.len().min(SQUARE_SIZE))
}

/// Row (0..4) a drone occupies inside its square.
pub fn row_in_square(index: DroneIndex) -> usize {
    index % SQUARE_SIZE / SQUARE_SIDE
}

/// Column (0..4) a position occupies inside its square.
pub fn column_in_square(position: usize) -> usize {
    position % SQUARE_SIDE
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(n: usize) -> Vec<Drone> {
        (0..n).map(Drone::new).collect()
    }

    #[test]
    fn full_roster_splits_into_two_sixteens() {
        let drones = roster(32);
        let (a, b) = split_squares(&drones);
        assert_eq!(a.len(), 16);
        assert_eq!(b.len(), 16);

        let a_idx: Vec<_> = a.iter().map(|d| d.index).collect();
        let b_idx: Vec<_> = b.iter().map(|d| d.index).collect();
        assert_eq!(a_idx, (0..16).collect::<Vec<_>>());
        assert_eq!(b_idx, (16..32).collect::<Vec<_>>());
        assert!(a_idx.iter().all(|i| !b_idx.contains(i)));
    }

    #[test]
    fn short_roster_leaves_square_b_empty() {
        let drones = roster(10);
        let (a, b) = split_squares(&drones);
        assert_eq!(a.len(), 10);
        assert!(b.is_empty());
    }

    #[test]
    fn squares_face_each_other() {
        assert_eq!(Square::A.sign(), -Square::B.sign());
        assert_eq!(Square::A.yaw(), FRAC_PI_2);
        assert_eq!(Square::B.yaw(), -FRAC_PI_2);
    }

    #[test]
    fn rows_repeat_per_square() {
        assert_eq!(row_in_square(0), 0);
        assert_eq!(row_in_square(3), 0);
        assert_eq!(row_in_square(4), 1);
        assert_eq!(row_in_square(15), 3);
        assert_eq!(row_in_square(16), 0);
        assert_eq!(row_in_square(29), 3);
    }
}
