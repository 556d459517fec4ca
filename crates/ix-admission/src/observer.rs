//! Admission observer trait for instrumentation and invariant checking.

use std::sync::Arc;

use ix_core::Trajectory;

/// Callbacks invoked by [`Intersection`][crate::Intersection] at each state
/// change.
///
/// Every hook runs **with the intersection lock held**, so the slices passed
/// in are a consistent view of the registry.  Keep implementations short and
/// never call back into the same intersection.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
pub trait AdmissionObserver: Send + Sync {
    /// `trajectory` is about to sleep because it conflicts with `blocker`.
    fn on_blocked(&self, _trajectory: Trajectory, _blocker: Trajectory) {}

    /// `trajectory` was just inserted; `occupants` includes it.
    fn on_admitted(&self, _trajectory: Trajectory, _occupants: &[Trajectory]) {}

    /// `trajectory` was just removed; `remaining` no longer includes it.
    fn on_exited(&self, _trajectory: Trajectory, _remaining: &[Trajectory]) {}
}

/// An [`AdmissionObserver`] that does nothing.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoopObserver;

impl AdmissionObserver for NoopObserver {}

/// Lets a caller keep a handle to an observer it moved into an intersection.
impl<T: AdmissionObserver + ?Sized> AdmissionObserver for Arc<T> {
    fn on_blocked(&self, trajectory: Trajectory, blocker: Trajectory) {
        (**self).on_blocked(trajectory, blocker)
    }

    fn on_admitted(&self, trajectory: Trajectory, occupants: &[Trajectory]) {
        (**self).on_admitted(trajectory, occupants)
    }

    fn on_exited(&self, trajectory: Trajectory, remaining: &[Trajectory]) {
        (**self).on_exited(trajectory, remaining)
    }
}
