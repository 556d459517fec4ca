//! The `Sim` struct and its vehicle threads.

use std::thread;
use std::time::{Duration, Instant};

use ix_admission::{AdmissionObserver, Intersection, NoopObserver};
use ix_core::{VehicleId, VehicleRng};
use tracing::{debug, info, trace};

use crate::{ByApproach, SimConfig, SimError, SimReport, SimResult};

/// One intersection plus the configuration of the traffic that will use it.
///
/// Each vehicle runs on its own OS thread and repeats:
///
/// 1. **Gap** — sleep up to `max_gap_micros`.
/// 2. **Arrive** — draw a trajectory and call `enter`, timing the wait.
/// 3. **Dwell** — sleep up to `max_dwell_micros` while occupying.
/// 4. **Leave** — `exit` (via the `Passage` guard, so a panicking vehicle
///    still frees its slot).
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<O: AdmissionObserver = NoopObserver> {
    pub config: SimConfig,
    pub intersection: Intersection<O>,
}

impl<O: AdmissionObserver> Sim<O> {
    /// Run every vehicle to completion, tear the intersection down, and
    /// return the aggregated statistics.
    ///
    /// # Errors
    ///
    /// - [`SimError::VehiclePanicked`] if any vehicle thread panicked.
    /// - [`SimError::Admission`] if the intersection was not empty at
    ///   teardown.
    pub fn run(self) -> SimResult<SimReport> {
        let Sim { config, intersection } = self;
        debug!(
            vehicles = config.vehicle_count,
            trips_per_vehicle = config.trips_per_vehicle,
            admission = ?config.admission,
            "simulation starting"
        );

        let vehicles = (0..config.vehicle_count)
            .map(VehicleId::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| {
                SimError::Config(format!(
                    "vehicle_count {} exceeds the VehicleId range",
                    config.vehicle_count
                ))
            })?;

        let started = Instant::now();
        let outcomes: Vec<Result<ByApproach, VehicleId>> = thread::scope(|s| {
            let handles: Vec<_> = vehicles
                .into_iter()
                .map(|vehicle| {
                    let ix = &intersection;
                    let cfg = &config;
                    (vehicle, s.spawn(move || drive(vehicle, ix, cfg)))
                })
                .collect();

            handles
                .into_iter()
                .map(|(vehicle, h)| h.join().map_err(|_| vehicle))
                .collect()
        });
        let elapsed = started.elapsed();

        let mut report = SimReport {
            elapsed_micros: u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX),
            ..SimReport::default()
        };
        for outcome in outcomes {
            let per_origin = outcome.map_err(SimError::VehiclePanicked)?;
            report.absorb(&per_origin);
        }
        report.admission = intersection.try_teardown()?;

        info!(
            trips = report.trips,
            elapsed_ms = elapsed.as_millis() as u64,
            blocked_waits = report.admission.blocked_waits,
            peak_occupancy = report.admission.peak_occupancy,
            "simulation finished"
        );
        Ok(report)
    }
}

/// Body of one vehicle thread.
fn drive<O: AdmissionObserver>(
    vehicle: VehicleId,
    ix:      &Intersection<O>,
    config:  &SimConfig,
) -> ByApproach {
    let mut rng = VehicleRng::new(config.seed, vehicle);
    let mut stats = ByApproach::default();

    for trip in 0..config.trips_per_vehicle {
        pause(&mut rng, config.max_gap_micros);

        let trajectory = rng.trajectory(config.allow_u_turns);
        let arrived = Instant::now();
        let passage = ix.pass(trajectory.origin(), trajectory.destination());
        let waited = arrived.elapsed();

        pause(&mut rng, config.max_dwell_micros);
        drop(passage);

        stats[trajectory.origin().index()].record(waited);
        trace!(
            %vehicle,
            trip,
            %trajectory,
            turn = %trajectory.turn(),
            waited_us = waited.as_micros() as u64,
            "trip complete"
        );
    }
    stats
}

/// Sleep for a uniformly drawn `0..=max_micros` microseconds.
fn pause(rng: &mut VehicleRng, max_micros: u64) {
    if max_micros == 0 {
        return;
    }
    let micros = rng.gen_range(0..=max_micros);
    if micros > 0 {
        thread::sleep(Duration::from_micros(micros));
    }
}
