//! End-of-run statistics.

use std::fmt;
use std::time::Duration;

use ix_admission::AdmissionStats;
use ix_core::Direction;

/// Wait-time statistics for vehicles arriving from one approach.
///
/// "Wait" is the wall time spent inside `enter`, i.e. from arrival at the
/// intersection until admission.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ApproachStats {
    pub trips:             u64,
    pub total_wait_micros: u64,
    pub max_wait_micros:   u64,
}

impl ApproachStats {
    pub fn record(&mut self, wait: Duration) {
        let micros = u64::try_from(wait.as_micros()).unwrap_or(u64::MAX);
        self.trips += 1;
        self.total_wait_micros = self.total_wait_micros.saturating_add(micros);
        self.max_wait_micros = self.max_wait_micros.max(micros);
    }

    pub fn merge(&mut self, other: &ApproachStats) {
        self.trips += other.trips;
        self.total_wait_micros = self.total_wait_micros.saturating_add(other.total_wait_micros);
        self.max_wait_micros = self.max_wait_micros.max(other.max_wait_micros);
    }

    /// Mean wait in microseconds, `0.0` if there were no trips.
    pub fn mean_wait_micros(&self) -> f64 {
        if self.trips == 0 {
            0.0
        } else {
            self.total_wait_micros as f64 / self.trips as f64
        }
    }
}

/// Per-approach wait statistics, indexed by [`Direction::index`].
pub type ByApproach = [ApproachStats; 4];

/// Summary of a completed [`Sim::run`][crate::Sim::run].
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimReport {
    /// Trips completed across all vehicles.
    pub trips:          u64,
    /// Wall time from first spawn to last join.
    pub elapsed_micros: u64,
    /// Wait statistics keyed by origin approach.
    pub per_origin:     ByApproach,
    /// Counters from the torn-down intersection.
    pub admission:      AdmissionStats,
}

impl SimReport {
    pub fn approach(&self, origin: Direction) -> &ApproachStats {
        &self.per_origin[origin.index()]
    }

    /// Fold one vehicle's per-approach statistics into the report.
    pub fn absorb(&mut self, vehicle: &ByApproach) {
        for (total, v) in self.per_origin.iter_mut().zip(vehicle) {
            total.merge(v);
            self.trips += v.trips;
        }
    }

    /// All approaches combined.
    pub fn overall(&self) -> ApproachStats {
        let mut all = ApproachStats::default();
        for a in &self.per_origin {
            all.merge(a);
        }
        all
    }
}

impl fmt::Display for SimReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} trips in {:.3} s",
            self.trips,
            self.elapsed_micros as f64 / 1e6
        )?;
        writeln!(f, "{:<10} {:>8} {:>14} {:>14}", "Origin", "Trips", "Mean wait µs", "Max wait µs")?;
        writeln!(f, "{}", "-".repeat(49))?;
        for d in Direction::ALL {
            let a = self.approach(d);
            writeln!(
                f,
                "{:<10} {:>8} {:>14.1} {:>14}",
                d.as_str(),
                a.trips,
                a.mean_wait_micros(),
                a.max_wait_micros
            )?;
        }
        let all = self.overall();
        writeln!(
            f,
            "{:<10} {:>8} {:>14.1} {:>14}",
            "all",
            all.trips,
            all.mean_wait_micros(),
            all.max_wait_micros
        )?;
        write!(
            f,
            "admitted {}  blocked waits {}  peak occupancy {}  peak waiting {}",
            self.admission.admitted,
            self.admission.blocked_waits,
            self.admission.peak_occupancy,
            self.admission.peak_waiting
        )
    }
}
