//! Vehicle trajectories and the pairwise conflict predicate.
//!
//! # Collision rule
//!
//! Two trajectories `a` and `b` may share the intersection unless all of
//! the following fail, checked in this order:
//!
//! 1. same origin — vehicles from one approach never collide;
//! 2. exact opposites — `a` goes where `b` came from and vice versa;
//! 3. different destinations and at least one of them turns right.
//!
//! Anything that falls through all three is a conflict.  The rule is
//! symmetric in `a` and `b`.

use std::fmt;

use crate::{Direction, Turn};

/// `true` for exactly (N,W), (S,E), (E,N), (W,S).
#[inline]
pub fn is_right_turn(origin: Direction, destination: Direction) -> bool {
    use Direction::*;
    matches!(
        (origin, destination),
        (North, West) | (South, East) | (East, North) | (West, South)
    )
}

/// `true` if `a` and `b` may **not** occupy the intersection together.
#[allow(clippy::if_same_then_else, clippy::needless_bool)]
pub fn conflicts(a: Trajectory, b: Trajectory) -> bool {
    if a.origin == b.origin {
        false
    } else if a.origin == b.destination && a.destination == b.origin {
        false
    } else if a.destination != b.destination && (a.is_right_turn() || b.is_right_turn()) {
        false
    } else {
        true
    }
}

/// One vehicle's planned path through the intersection.
///
/// Immutable once built.  Two vehicles may hold equal trajectories at the
/// same time, so a `Trajectory` is not an identity.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trajectory {
    origin:      Direction,
    destination: Direction,
}

impl Trajectory {
    /// Any of the 16 combinations is accepted, including `origin == destination`.
    #[inline]
    pub const fn new(origin: Direction, destination: Direction) -> Self {
        Self { origin, destination }
    }

    #[inline]
    pub fn origin(self) -> Direction {
        self.origin
    }

    #[inline]
    pub fn destination(self) -> Direction {
        self.destination
    }

    #[inline]
    pub fn is_right_turn(self) -> bool {
        is_right_turn(self.origin, self.destination)
    }

    #[inline]
    pub fn turn(self) -> Turn {
        Turn::classify(self.origin, self.destination)
    }

    /// Method form of [`conflicts`].
    #[inline]
    pub fn conflicts_with(self, other: Trajectory) -> bool {
        conflicts(self, other)
    }

    /// Every trajectory, origin-major in compass order.
    pub fn all() -> impl Iterator<Item = Trajectory> {
        Direction::ALL
            .into_iter()
            .flat_map(|o| Direction::ALL.into_iter().map(move |d| Trajectory::new(o, d)))
    }
}

impl fmt::Display for Trajectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.origin, self.destination)
    }
}
