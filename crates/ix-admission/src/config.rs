//! Admission policy knobs.

/// Who gets signalled when a vehicle leaves.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum WakePolicy {
    /// Wake a single waiter per exit.  The woken vehicle is not necessarily
    /// the one whose conflict just cleared.
    #[default]
    One,
    /// Wake every waiter per exit; each re-checks and all but the admissible
    /// ones go back to sleep.
    All,
}

/// Ordering among waiting vehicles.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Fairness {
    /// Any admissible request may go first.  A vehicle can starve while
    /// non-conflicting traffic keeps flowing around it.
    #[default]
    Unordered,
    /// Requests are ticketed on arrival.  A request is held back while an
    /// earlier, still-waiting request conflicts with it, so no vehicle is
    /// overtaken indefinitely.  Implies [`WakePolicy::All`].
    Fifo,
}

/// Configuration for an [`Intersection`][crate::Intersection].
///
/// The default reproduces the classic behaviour: wake one waiter per exit,
/// no ordering guarantee.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AdmissionConfig {
    pub wake:     WakePolicy,
    pub fairness: Fairness,
}

impl AdmissionConfig {
    /// Starvation-free configuration.
    pub fn fifo() -> Self {
        Self { wake: WakePolicy::All, fairness: Fairness::Fifo }
    }

    /// `true` if an exit must broadcast rather than signal a single waiter.
    #[inline]
    pub fn wakes_all(&self) -> bool {
        self.wake == WakePolicy::All || self.fairness == Fairness::Fifo
    }
}
