//! Integration tests for ix-sim.

use std::sync::Arc;

use ix_admission::{AdmissionConfig, AdmissionObserver, Fairness, WakePolicy};
use ix_core::{Direction, Trajectory, VehicleId};

use crate::{SafetyMonitor, SimBuilder, SimConfig, SimError};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn test_config(vehicle_count: usize, trips_per_vehicle: usize) -> SimConfig {
    SimConfig {
        vehicle_count,
        trips_per_vehicle,
        seed:             42,
        max_dwell_micros: 200,
        max_gap_micros:   200,
        allow_u_turns:    false,
        admission:        AdmissionConfig::default(),
    }
}

// ── Config / builder validation ───────────────────────────────────────────────

#[cfg(test)]
mod config_tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_vehicles_rejected() {
        let result = SimBuilder::new(test_config(0, 5)).build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn zero_trips_rejected() {
        let result = SimBuilder::new(test_config(3, 0)).build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn total_trips() {
        assert_eq!(test_config(7, 11).total_trips(), 77);
    }
}

// ── Report arithmetic ─────────────────────────────────────────────────────────

#[cfg(test)]
mod report_tests {
    use std::time::Duration;

    use super::*;
    use crate::{ApproachStats, ByApproach, SimReport};

    #[test]
    fn approach_stats_record_and_mean() {
        let mut a = ApproachStats::default();
        assert_eq!(a.mean_wait_micros(), 0.0);
        a.record(Duration::from_micros(10));
        a.record(Duration::from_micros(30));
        assert_eq!(a.trips, 2);
        assert_eq!(a.max_wait_micros, 30);
        assert_eq!(a.mean_wait_micros(), 20.0);
    }

    #[test]
    fn absorb_sums_trips_per_origin() {
        let mut vehicle = ByApproach::default();
        vehicle[Direction::East.index()].record(Duration::from_micros(5));
        vehicle[Direction::West.index()].record(Duration::from_micros(50));

        let mut report = SimReport::default();
        report.absorb(&vehicle);
        report.absorb(&vehicle);

        assert_eq!(report.trips, 4);
        assert_eq!(report.approach(Direction::East).trips, 2);
        assert_eq!(report.approach(Direction::North).trips, 0);
        assert_eq!(report.overall().max_wait_micros, 50);
    }

    #[test]
    fn display_lists_every_approach() {
        let text = SimReport::default().to_string();
        for d in Direction::ALL {
            assert!(text.contains(d.as_str()), "missing {d}");
        }
        assert!(text.contains("peak occupancy"));
    }
}

// ── Runs ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;

    fn run_clean(config: SimConfig) -> crate::SimReport {
        let total = config.total_trips();
        let monitor = Arc::new(SafetyMonitor::new());
        let report = SimBuilder::new(config)
            .observer(monitor.clone())
            .build()
            .unwrap()
            .run()
            .unwrap();

        assert!(monitor.is_clean(), "{} violations", monitor.violations());
        assert_eq!(monitor.admissions(), total);
        assert_eq!(report.trips, total);
        assert_eq!(report.admission.admitted, total);
        assert_eq!(report.admission.exited, total);
        assert_eq!(report.admission.peak_occupancy, monitor.peak_occupancy());
        report
    }

    #[test]
    fn single_vehicle_never_waits() {
        let report = run_clean(test_config(1, 20));
        assert_eq!(report.admission.blocked_waits, 0);
        assert_eq!(report.admission.peak_occupancy, 1);
    }

    #[test]
    fn many_vehicles_wake_one() {
        run_clean(test_config(12, 30));
    }

    #[test]
    fn many_vehicles_wake_all() {
        let mut cfg = test_config(12, 30);
        cfg.admission = AdmissionConfig { wake: WakePolicy::All, fairness: Fairness::Unordered };
        run_clean(cfg);
    }

    #[test]
    fn many_vehicles_fifo() {
        let mut cfg = test_config(12, 30);
        cfg.admission = AdmissionConfig::fifo();
        run_clean(cfg);
    }

    #[test]
    fn u_turns_and_zero_timing() {
        let mut cfg = test_config(8, 50);
        cfg.allow_u_turns = true;
        cfg.max_dwell_micros = 0;
        cfg.max_gap_micros = 0;
        run_clean(cfg);
    }

    #[test]
    fn trip_choices_are_reproducible() {
        let a = run_clean(test_config(6, 15));
        let b = run_clean(test_config(6, 15));
        for d in Direction::ALL {
            assert_eq!(a.approach(d).trips, b.approach(d).trips, "{d}");
        }
    }

    /// Panics on the first exit it sees.
    struct PanicOnExit;

    impl AdmissionObserver for PanicOnExit {
        fn on_exited(&self, _trajectory: Trajectory, _remaining: &[Trajectory]) {
            panic!("observer failure");
        }
    }

    #[test]
    fn vehicle_panic_is_reported() {
        let result = SimBuilder::new(test_config(1, 1))
            .observer(PanicOnExit)
            .build()
            .unwrap()
            .run();
        assert!(matches!(result, Err(SimError::VehiclePanicked(VehicleId(0)))));
    }

    #[test]
    fn vehicle_panics_do_not_strand_other_vehicles() {
        // Every vehicle dies on its first exit; each of those exits must
        // still wake the vehicles queued behind it.
        let mut cfg = test_config(8, 5);
        cfg.max_gap_micros = 0;
        for admission in [AdmissionConfig::default(), AdmissionConfig::fifo()] {
            cfg.admission = admission;
            let result = SimBuilder::new(cfg.clone())
                .observer(PanicOnExit)
                .build()
                .unwrap()
                .run();
            assert!(matches!(result, Err(SimError::VehiclePanicked(VehicleId(0)))));
        }
    }
}

// ── Property: random small workloads stay safe and terminate ─────────────────

#[cfg(test)]
mod properties {
    use proptest::prelude::*;

    use super::*;

    fn arb_admission() -> impl Strategy<Value = AdmissionConfig> {
        prop_oneof![
            Just(AdmissionConfig::default()),
            Just(AdmissionConfig { wake: WakePolicy::All, fairness: Fairness::Unordered }),
            Just(AdmissionConfig::fifo()),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn random_workload_is_safe(
            vehicles in 1usize..8,
            trips in 1usize..12,
            seed in any::<u64>(),
            dwell in 0u64..100,
            u_turns in any::<bool>(),
            admission in arb_admission(),
        ) {
            let config = SimConfig {
                vehicle_count:     vehicles,
                trips_per_vehicle: trips,
                seed,
                max_dwell_micros:  dwell,
                max_gap_micros:    dwell,
                allow_u_turns:     u_turns,
                admission,
            };
            let total = config.total_trips();
            let monitor = Arc::new(SafetyMonitor::new());
            let report = SimBuilder::new(config)
                .observer(monitor.clone())
                .build()
                .unwrap()
                .run()
                .unwrap();
            prop_assert!(monitor.is_clean());
            prop_assert_eq!(report.trips, total);
        }
    }
}
