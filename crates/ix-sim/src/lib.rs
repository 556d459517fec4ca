//! `ix-sim` — multi-threaded traffic driver for the rust_ix framework.
//!
//! Spawns one thread per vehicle against a single
//! [`Intersection`](ix_admission::Intersection), each making a fixed number
//! of randomly chosen trips, and reports how long vehicles waited per
//! approach.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use ix_sim::{SafetyMonitor, SimBuilder, SimConfig};
//!
//! let monitor = Arc::new(SafetyMonitor::new());
//! let report = SimBuilder::new(SimConfig::default())
//!     .observer(monitor.clone())
//!     .build()?
//!     .run()?;
//! assert!(monitor.is_clean());
//! println!("{report}");
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod monitor;
pub mod report;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use config::SimConfig;
pub use error::{SimError, SimResult};
pub use monitor::SafetyMonitor;
pub use report::{ApproachStats, ByApproach, SimReport};
pub use sim::Sim;
