//! `OccupancyRegistry` — the trajectories currently inside the intersection.
//!
//! A plain `Vec`: occupancy stays small in practice, so a linear conflict
//! scan is cheaper than maintaining any index.

use ix_core::Trajectory;

/// Unordered multiset of occupying trajectories.
///
/// Invariant (maintained by the controller, checked by
/// [`is_consistent`](Self::is_consistent)): no two entries conflict.
#[derive(Clone, Debug, Default)]
pub struct OccupancyRegistry {
    entries: Vec<Trajectory>,
}

impl OccupancyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `trajectory`.  Does not check for conflicts.
    #[inline]
    pub fn insert(&mut self, trajectory: Trajectory) {
        self.entries.push(trajectory);
    }

    /// Remove one entry equal to `trajectory`.
    ///
    /// Returns `false` if there was none.  Which of several equal entries
    /// goes is irrelevant since they are indistinguishable.
    pub fn remove(&mut self, trajectory: Trajectory) -> bool {
        match self.entries.iter().position(|&t| t == trajectory) {
            Some(i) => {
                self.entries.swap_remove(i);
                true
            }
            None => false,
        }
    }

    /// The first occupant that `trajectory` conflicts with, if any.
    pub fn first_conflict(&self, trajectory: Trajectory) -> Option<Trajectory> {
        self.entries.iter().copied().find(|&t| t.conflicts_with(trajectory))
    }

    #[inline]
    pub fn conflicts_with(&self, trajectory: Trajectory) -> bool {
        self.first_conflict(trajectory).is_some()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Trajectory] {
        &self.entries
    }

    /// `true` if no two entries conflict.  O(n²).
    pub fn is_consistent(&self) -> bool {
        self.entries.iter().enumerate().all(|(i, &a)| {
            self.entries[i + 1..].iter().all(|&b| !a.conflicts_with(b))
        })
    }
}
