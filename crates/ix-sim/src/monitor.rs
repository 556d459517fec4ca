//! `SafetyMonitor` — independent check of the occupancy invariant.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use ix_admission::AdmissionObserver;
use ix_core::Trajectory;
use tracing::warn;

/// Re-verifies, at every admission, that no two occupants conflict.
///
/// Attach it through [`SimBuilder::observer`][crate::SimBuilder::observer]
/// (wrapped in an `Arc` to keep a handle) and assert
/// [`is_clean`](Self::is_clean) after the run.
#[derive(Debug, Default)]
pub struct SafetyMonitor {
    admissions:     AtomicU64,
    blocks:         AtomicU64,
    violations:     AtomicU64,
    peak_occupancy: AtomicUsize,
}

impl SafetyMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn admissions(&self) -> u64 {
        self.admissions.load(Ordering::Relaxed)
    }

    pub fn blocks(&self) -> u64 {
        self.blocks.load(Ordering::Relaxed)
    }

    /// Conflicting occupant pairs observed.  Anything but zero is a bug.
    pub fn violations(&self) -> u64 {
        self.violations.load(Ordering::Relaxed)
    }

    pub fn peak_occupancy(&self) -> usize {
        self.peak_occupancy.load(Ordering::Relaxed)
    }

    pub fn is_clean(&self) -> bool {
        self.violations() == 0
    }
}

impl AdmissionObserver for SafetyMonitor {
    fn on_blocked(&self, _trajectory: Trajectory, _blocker: Trajectory) {
        self.blocks.fetch_add(1, Ordering::Relaxed);
    }

    fn on_admitted(&self, trajectory: Trajectory, occupants: &[Trajectory]) {
        self.admissions.fetch_add(1, Ordering::Relaxed);
        self.peak_occupancy.fetch_max(occupants.len(), Ordering::Relaxed);

        for (i, &a) in occupants.iter().enumerate() {
            for &b in &occupants[i + 1..] {
                if a.conflicts_with(b) {
                    self.violations.fetch_add(1, Ordering::Relaxed);
                    warn!(admitted = %trajectory, %a, %b, "conflicting trajectories share the intersection");
                }
            }
        }
    }
}
