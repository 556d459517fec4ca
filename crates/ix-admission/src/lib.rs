//! `ix-admission` — blocking admission control for a four-way intersection.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                        |
//! |----------------|-----------------------------------------------------------------|
//! | [`registry`]   | `OccupancyRegistry` — trajectories currently inside             |
//! | [`controller`] | `Intersection` — `enter` / `exit` / `teardown`, `Passage` guard |
//! | [`config`]     | `AdmissionConfig`, `WakePolicy`, `Fairness`                     |
//! | [`observer`]   | `AdmissionObserver` hooks, `NoopObserver`                       |
//! | [`error`]      | `AdmissionError`, `AdmissionResult<T>`                          |
//!
//! # Safety invariant
//!
//! At every instant, no two trajectories in the registry
//! [conflict](ix_core::conflicts).  The registry is only touched with the
//! intersection's mutex held, and a vehicle only inserts itself after a
//! full conflict scan under that same lock.
//!
//! # Cargo features
//!
//! | Feature | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Serialize/Deserialize for config and stats types.          |

pub mod config;
pub mod controller;
pub mod error;
pub mod observer;
pub mod registry;


pub use config::{AdmissionConfig, Fairness, WakePolicy};
pub use controller::{AdmissionStats, Intersection, Passage};
pub use error::{AdmissionError, AdmissionResult};
pub use observer::{AdmissionObserver, NoopObserver};
pub use registry::OccupancyRegistry;
