//! Simulation configuration.

use ix_admission::AdmissionConfig;

use crate::{SimError, SimResult};

/// Parameters for one simulation run.
///
/// All durations are in microseconds so the struct round-trips through JSON
/// without a custom duration format.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Number of concurrent vehicle threads.
    pub vehicle_count: usize,
    /// Trips each vehicle makes through the intersection.
    pub trips_per_vehicle: usize,
    /// Global RNG seed.  Trip choices are reproducible; interleavings are not.
    pub seed: u64,
    /// Upper bound on time spent inside the intersection per trip.
    /// Each dwell is drawn uniformly from `0..=max_dwell_micros`.
    pub max_dwell_micros: u64,
    /// Upper bound on time between leaving and arriving again.
    pub max_gap_micros: u64,
    /// Whether a vehicle may leave by the approach it came from.
    pub allow_u_turns: bool,
    /// Admission policy for the intersection under test.
    pub admission: AdmissionConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            vehicle_count:     10,
            trips_per_vehicle: 10,
            seed:              42,
            max_dwell_micros:  1_000,
            max_gap_micros:    2_000,
            allow_u_turns:     false,
            admission:         AdmissionConfig::default(),
        }
    }
}

impl SimConfig {
    /// Reject configurations that cannot produce a meaningful run.
    pub fn validate(&self) -> SimResult<()> {
        if self.vehicle_count == 0 {
            return Err(SimError::Config("vehicle_count must be at least 1".into()));
        }
        if u32::try_from(self.vehicle_count).is_err() {
            return Err(SimError::Config(format!(
                "vehicle_count {} exceeds the VehicleId range",
                self.vehicle_count
            )));
        }
        if self.trips_per_vehicle == 0 {
            return Err(SimError::Config("trips_per_vehicle must be at least 1".into()));
        }
        Ok(())
    }

    /// Total number of trips the run will perform.
    pub fn total_trips(&self) -> u64 {
        self.vehicle_count as u64 * self.trips_per_vehicle as u64
    }
}
