//! quad — drive a single four-way intersection with concurrent vehicles.
//!
//! Usage: `quad [config.json]`
//!
//! Without an argument the built-in constants below are used.  A config file
//! is a JSON `SimConfig`; missing fields fall back to `SimConfig::default()`,
//! e.g.
//!
//! ```json
//! { "vehicle_count": 40, "admission": { "fairness": "fifo" } }
//! ```
//!
//! Set `RUST_LOG=ix_admission=trace` to watch every block / admit / exit.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, ensure};
use tracing::info;
use tracing_subscriber::EnvFilter;

use ix_admission::AdmissionConfig;
use ix_core::Direction;
use ix_sim::{SafetyMonitor, SimBuilder, SimConfig};

// ── Constants ─────────────────────────────────────────────────────────────────

const VEHICLE_COUNT:     usize = 20;
const TRIPS_PER_VEHICLE: usize = 25;
const SEED:              u64   = 42;
const MAX_DWELL_MICROS:  u64   = 2_000;
const MAX_GAP_MICROS:    u64   = 5_000;

fn load_config(path: Option<&Path>) -> Result<SimConfig> {
    let Some(path) = path else {
        return Ok(SimConfig {
            vehicle_count:     VEHICLE_COUNT,
            trips_per_vehicle: TRIPS_PER_VEHICLE,
            seed:              SEED,
            max_dwell_micros:  MAX_DWELL_MICROS,
            max_gap_micros:    MAX_GAP_MICROS,
            allow_u_turns:     false,
            admission:         AdmissionConfig::default(),
        });
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let arg = std::env::args_os().nth(1);
    let config = load_config(arg.as_deref().map(Path::new))?;

    println!("=== quad — four-way intersection ===");
    println!(
        "Vehicles: {}  |  Trips each: {}  |  Seed: {}  |  Policy: {:?}",
        config.vehicle_count, config.trips_per_vehicle, config.seed, config.admission
    );
    println!();

    let monitor = Arc::new(SafetyMonitor::new());
    let report = SimBuilder::new(config)
        .observer(monitor.clone())
        .build()?
        .run()?;

    info!(
        admissions = monitor.admissions(),
        blocks = monitor.blocks(),
        "safety monitor summary"
    );
    ensure!(
        monitor.is_clean(),
        "{} conflicting occupant pair(s) observed",
        monitor.violations()
    );

    println!("{report}");
    println!();

    let busiest = Direction::ALL
        .into_iter()
        .max_by_key(|&d| report.approach(d).max_wait_micros)
        .unwrap_or(Direction::North);
    println!("Longest single wait was at the {busiest} approach.");
    println!();
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
