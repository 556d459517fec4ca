//! The `Intersection` admission controller.
//!
//! # Protocol
//!
//! ```text
//! enter(o, d):
//!   lock
//!   while (o, d) conflicts with some occupant:
//!       wait on `cleared`        — releases the lock while asleep
//!       (re-acquire; re-scan the whole registry)
//!   insert (o, d)
//!   unlock
//!
//! exit(o, d):
//!   lock
//!   remove one (o, d)            — missing entry is a caller bug: panic
//!   unlock
//!   signal `cleared`             — one waiter, or all (see WakePolicy)
//! ```
//!
//! A wake-up is only a hint.  The woken vehicle always re-scans, so stale
//! or surplus wake-ups cost a scan, never safety.
//!
//! Liveness in the default mode: every exit signals, and the exit that
//! empties the intersection wakes a vehicle that is then admitted
//! unconditionally.  Individual vehicles can still starve; choose
//! [`Fairness::Fifo`] to rule that out.
//!
//! Observer hooks run under the lock.  A hook that panics unwinds out of
//! `enter` / `exit` without stranding anyone: the exit still signals, a
//! FIFO ticket is withdrawn, and an admission whose `on_admitted` hook
//! panicked is undone.

use std::collections::VecDeque;

use ix_core::{Direction, Trajectory};
use parking_lot::{Condvar, Mutex};
use tracing::{debug, trace};

use crate::{
    AdmissionConfig, AdmissionError, AdmissionObserver, AdmissionResult, Fairness,
    NoopObserver, OccupancyRegistry,
};

// ── Stats ─────────────────────────────────────────────────────────────────────

/// Counters maintained under the intersection lock.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdmissionStats {
    /// Successful `enter` calls.
    pub admitted:       u64,
    /// Successful `exit` calls.
    pub exited:         u64,
    /// Times any vehicle went to sleep.  One `enter` may sleep repeatedly.
    pub blocked_waits:  u64,
    /// Largest registry size observed.
    pub peak_occupancy: usize,
    /// Largest number of simultaneously sleeping vehicles.
    pub peak_waiting:   usize,
}

// ── Shared state ──────────────────────────────────────────────────────────────

#[derive(Default)]
struct State {
    registry: OccupancyRegistry,
    /// Requests currently inside `enter`, in ticket order.  FIFO mode only.
    pending: VecDeque<(u64, Trajectory)>,
    next_ticket: u64,
    /// Vehicles asleep on the condvar right now.
    waiting: usize,
    stats: AdmissionStats,
}

impl State {
    /// What currently stops `trajectory` from entering, if anything.
    ///
    /// Occupants are checked first.  With a ticket, earlier pending requests
    /// that conflict also block so later arrivals cannot overtake them.
    fn blocker(&self, trajectory: Trajectory, ticket: Option<u64>) -> Option<Trajectory> {
        if let Some(occupant) = self.registry.first_conflict(trajectory) {
            return Some(occupant);
        }
        let ticket = ticket?;
        self.pending
            .iter()
            .take_while(|&&(t, _)| t < ticket)
            .map(|&(_, p)| p)
            .find(|&p| p.conflicts_with(trajectory))
    }

    fn take_ticket(&mut self, trajectory: Trajectory) -> u64 {
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.pending.push_back((ticket, trajectory));
        ticket
    }

    fn release_ticket(&mut self, ticket: u64) {
        if let Some(i) = self.pending.iter().position(|&(t, _)| t == ticket) {
            self.pending.remove(i);
        }
    }

    fn begin_wait(&mut self) {
        self.waiting += 1;
        self.stats.blocked_waits += 1;
        self.stats.peak_waiting = self.stats.peak_waiting.max(self.waiting);
    }

    fn end_wait(&mut self) {
        self.waiting -= 1;
    }

    fn admit(&mut self, trajectory: Trajectory) {
        self.registry.insert(trajectory);
        self.stats.admitted += 1;
        self.stats.peak_occupancy = self.stats.peak_occupancy.max(self.registry.len());
        debug_assert!(
            self.registry.is_consistent(),
            "admitting {trajectory} left conflicting occupants: {:?}",
            self.registry.as_slice()
        );
    }

    /// Undo an [`admit`](Self::admit) that never completed.
    fn withdraw(&mut self, trajectory: Trajectory) {
        if self.registry.remove(trajectory) {
            self.stats.admitted -= 1;
        }
    }

    fn release(&mut self, trajectory: Trajectory) -> AdmissionResult<()> {
        if !self.registry.remove(trajectory) {
            return Err(AdmissionError::NotAdmitted(trajectory));
        }
        self.stats.exited += 1;
        Ok(())
    }
}

// ── Intersection ──────────────────────────────────────────────────────────────

/// A four-way intersection guarding concurrent vehicle access.
///
/// Construct one per simulated intersection and share it by reference
/// (`std::thread::scope`) or `Arc`.  There is no global state, so any number
/// of intersections can coexist in one process.
///
/// # Example
///
/// ```rust
/// use ix_admission::Intersection;
/// use ix_core::Direction::*;
///
/// let ix = Intersection::new();
/// ix.enter(North, South);
/// ix.enter(South, North); // opposing straight traffic passes
/// assert_eq!(ix.occupancy(), 2);
/// ix.exit(North, South);
/// ix.exit(South, North);
/// let stats = ix.teardown();
/// assert_eq!(stats.admitted, 2);
/// ```
pub struct Intersection<O: AdmissionObserver = NoopObserver> {
    config:   AdmissionConfig,
    state:    Mutex<State>,
    /// Signalled on every exit.
    cleared:  Condvar,
    observer: O,
}

impl Intersection<NoopObserver> {
    /// An empty intersection with the default configuration.
    pub fn new() -> Self {
        Self::with_config(AdmissionConfig::default())
    }

    pub fn with_config(config: AdmissionConfig) -> Self {
        Self::with_observer(config, NoopObserver)
    }
}

impl Default for Intersection<NoopObserver> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: AdmissionObserver> Intersection<O> {
    pub fn with_observer(config: AdmissionConfig, observer: O) -> Self {
        Self {
            config,
            state: Mutex::new(State::default()),
            cleared: Condvar::new(),
            observer,
        }
    }

    // ── Admission protocol ────────────────────────────────────────────────

    /// Block until `origin → destination` can share the intersection with
    /// every current occupant, then occupy it.
    ///
    /// Any direction pair is accepted, including `origin == destination`.
    /// There is no timeout: the caller waits until the conflicting occupants
    /// have left.
    pub fn enter(&self, origin: Direction, destination: Direction) {
        let trajectory = Trajectory::new(origin, destination);
        let mut settle = Settle::new(self);
        let mut state = self.state.lock();

        let ticket = match self.config.fairness {
            Fairness::Fifo      => Some(state.take_ticket(trajectory)),
            Fairness::Unordered => None,
        };
        settle.ticket = ticket;

        while let Some(blocker) = state.blocker(trajectory, ticket) {
            trace!(%trajectory, %blocker, "blocked");
            self.observer.on_blocked(trajectory, blocker);
            state.begin_wait();
            self.cleared.wait(&mut state);
            state.end_wait();
        }

        if let Some(ticket) = settle.ticket.take() {
            state.release_ticket(ticket);
        }
        state.admit(trajectory);
        settle.admitted = Some(trajectory);
        trace!(%trajectory, occupancy = state.registry.len(), "admitted");
        self.observer.on_admitted(trajectory, state.registry.as_slice());
        settle.admitted = None;
    }

    /// Leave the intersection.
    ///
    /// # Panics
    ///
    /// If no occupant matches `origin → destination`.  That means the caller
    /// never entered with this pair (or already left), and continuing would
    /// corrupt the occupancy invariant.
    pub fn exit(&self, origin: Direction, destination: Direction) {
        if let Err(e) = self.try_exit(origin, destination) {
            panic!("{e}");
        }
    }

    /// [`exit`](Self::exit) that reports the contract violation instead of
    /// panicking.  The registry is untouched and nobody is woken on error.
    pub fn try_exit(&self, origin: Direction, destination: Direction) -> AdmissionResult<()> {
        let trajectory = Trajectory::new(origin, destination);
        let mut settle = Settle::new(self);
        let mut state = self.state.lock();
        state.release(trajectory)?;
        settle.wake = true;
        trace!(%trajectory, occupancy = state.registry.len(), "exited");
        self.observer.on_exited(trajectory, state.registry.as_slice());
        Ok(())
    }

    fn wake(&self) {
        if self.config.wakes_all() {
            self.cleared.notify_all();
        } else {
            self.cleared.notify_one();
        }
    }

    /// Enter and return a guard that exits on drop.
    pub fn pass(&self, origin: Direction, destination: Direction) -> Passage<'_, O> {
        self.enter(origin, destination);
        Passage { intersection: self, trajectory: Trajectory::new(origin, destination) }
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Dispose of the intersection and return its final counters.
    ///
    /// Taking `self` by value means no vehicle can still hold a reference,
    /// so nobody can be waiting: the wait queue is necessarily empty and is
    /// only `debug_assert`ed.  Occupants are another matter.
    ///
    /// # Panics
    ///
    /// If any vehicle never exited.
    pub fn teardown(self) -> AdmissionStats {
        match self.try_teardown() {
            Ok(stats) => stats,
            Err(e) => panic!("{e}"),
        }
    }

    /// [`teardown`](Self::teardown) that returns the leaked occupants as an
    /// error instead of panicking.
    pub fn try_teardown(self) -> AdmissionResult<AdmissionStats> {
        let state = self.state.into_inner();
        debug_assert_eq!(state.waiting, 0);
        if !state.registry.is_empty() {
            return Err(AdmissionError::OccupiedAtTeardown {
                occupants: state.registry.as_slice().to_vec(),
            });
        }
        debug!(
            admitted = state.stats.admitted,
            blocked_waits = state.stats.blocked_waits,
            peak_occupancy = state.stats.peak_occupancy,
            "intersection torn down"
        );
        Ok(state.stats)
    }

    // ── Introspection ─────────────────────────────────────────────────────

    /// Number of vehicles inside right now.
    pub fn occupancy(&self) -> usize {
        self.state.lock().registry.len()
    }

    /// Snapshot of the current occupants.
    pub fn occupants(&self) -> Vec<Trajectory> {
        self.state.lock().registry.as_slice().to_vec()
    }

    /// Number of vehicles asleep waiting for admission.
    pub fn waiting(&self) -> usize {
        self.state.lock().waiting
    }

    pub fn stats(&self) -> AdmissionStats {
        self.state.lock().stats
    }

    pub fn config(&self) -> &AdmissionConfig {
        &self.config
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }
}

// ── Settle ───────────────────────────────────────────────────────────────────

/// Bookkeeping that `enter` / `try_exit` must finish even if an observer
/// hook unwinds.
///
/// Created before the state lock is taken, so it drops after the lock is
/// released.  On drop it withdraws an unfinished FIFO ticket, undoes an
/// admission whose `on_admitted` hook never returned, and signals
/// `cleared` if anything changed.
struct Settle<'a, O: AdmissionObserver> {
    intersection: &'a Intersection<O>,
    ticket:       Option<u64>,
    admitted:     Option<Trajectory>,
    wake:         bool,
}

impl<'a, O: AdmissionObserver> Settle<'a, O> {
    fn new(intersection: &'a Intersection<O>) -> Self {
        Self { intersection, ticket: None, admitted: None, wake: false }
    }
}

impl<O: AdmissionObserver> Drop for Settle<'_, O> {
    fn drop(&mut self) {
        let ix = self.intersection;
        if self.ticket.is_some() || self.admitted.is_some() {
            let mut state = ix.state.lock();
            if let Some(ticket) = self.ticket.take() {
                state.release_ticket(ticket);
            }
            if let Some(trajectory) = self.admitted.take() {
                state.withdraw(trajectory);
                debug!(%trajectory, "admission withdrawn after observer panic");
            }
            self.wake = true;
        }
        if self.wake {
            ix.wake();
        }
    }
}

// ── Passage ───────────────────────────────────────────────────────────────────

/// A vehicle's occupancy of an [`Intersection`], released on drop.
#[must_use = "dropping a Passage immediately exits the intersection"]
pub struct Passage<'a, O: AdmissionObserver> {
    intersection: &'a Intersection<O>,
    trajectory:   Trajectory,
}

impl<O: AdmissionObserver> Passage<'_, O> {
    pub fn trajectory(&self) -> Trajectory {
        self.trajectory
    }
}

impl<O: AdmissionObserver> Drop for Passage<'_, O> {
    fn drop(&mut self) {
        let t = self.trajectory;
        if let Err(e) = self.intersection.try_exit(t.origin(), t.destination()) {
            // A second panic while unwinding would abort the process.
            if !std::thread::panicking() {
                panic!("{e}");
            }
        }
    }
}
