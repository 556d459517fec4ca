//! Compass approaches of a four-way intersection and turn classification.
//!
//! Every approach is both an entry (a vehicle's *origin*) and an exit (its
//! *destination*).  A vehicle arriving from `North` is heading south, so
//! `North → West` is a right turn, `North → South` goes straight through,
//! `North → East` is a left turn, and `North → North` is a U-turn.

use std::fmt;

/// One of the four approaches to the intersection.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// All approaches in clockwise compass order.  `ALL[d.index()] == d`.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Clockwise compass index: N = 0, E = 1, S = 2, W = 3.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::East  => 1,
            Direction::South => 2,
            Direction::West  => 3,
        }
    }

    /// Inverse of [`index`](Self::index); wraps modulo 4.
    #[inline]
    pub fn from_index(i: usize) -> Direction {
        Self::ALL[i % 4]
    }

    /// Lowercase label, used for display and report tables.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::East  => "east",
            Direction::South => "south",
            Direction::West  => "west",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Turn ──────────────────────────────────────────────────────────────────────

/// Manoeuvre implied by an (origin, destination) pair.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Turn {
    Right,
    Straight,
    Left,
    /// Origin and destination are the same approach.
    UTurn,
}

impl Turn {
    /// Classify the manoeuvre from `origin` to `destination`.
    ///
    /// Counting clockwise from the origin: the approach three steps round
    /// is the right turn, two steps is straight ahead, one step is the left
    /// turn.
    pub fn classify(origin: Direction, destination: Direction) -> Turn {
        match (destination.index() + 4 - origin.index()) % 4 {
            0 => Turn::UTurn,
            1 => Turn::Left,
            2 => Turn::Straight,
            _ => Turn::Right,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Turn::Right    => "right",
            Turn::Straight => "straight",
            Turn::Left     => "left",
            Turn::UTurn    => "u-turn",
        }
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
