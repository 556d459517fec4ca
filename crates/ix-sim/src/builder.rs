//! Fluent builder for constructing a [`Sim`].

use ix_admission::{AdmissionObserver, Intersection, NoopObserver};

use crate::{Sim, SimConfig, SimResult};

/// Fluent builder for [`Sim<O>`].
///
/// # Optional inputs (have defaults)
///
/// | Method          | Default          |
/// |-----------------|------------------|
/// | `.observer(o)`  | `NoopObserver`   |
///
/// # Example
///
/// ```rust,ignore
/// let monitor = Arc::new(SafetyMonitor::new());
/// let report = SimBuilder::new(config)
///     .observer(monitor.clone())
///     .build()?
///     .run()?;
/// assert!(monitor.is_clean());
/// ```
pub struct SimBuilder<O: AdmissionObserver = NoopObserver> {
    config:   SimConfig,
    observer: O,
}

impl SimBuilder<NoopObserver> {
    pub fn new(config: SimConfig) -> Self {
        Self { config, observer: NoopObserver }
    }
}

impl<O: AdmissionObserver> SimBuilder<O> {
    /// Attach an observer to the intersection.  Replaces any earlier one.
    pub fn observer<P: AdmissionObserver>(self, observer: P) -> SimBuilder<P> {
        SimBuilder { config: self.config, observer }
    }

    /// Validate the configuration and create the intersection.
    pub fn build(self) -> SimResult<Sim<O>> {
        self.config.validate()?;
        let intersection = Intersection::with_observer(self.config.admission, self.observer);
        Ok(Sim { config: self.config, intersection })
    }
}
