//! `ix-core` — foundational types for the `rust_ix` intersection framework.
//!
//! This crate is a dependency of every other `ix-*` crate.  It intentionally
//! has no `ix-*` dependencies and minimal external ones (only `rand`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`direction`]   | `Direction` (compass approach), `Turn`                |
//! | [`trajectory`]  | `Trajectory`, `is_right_turn`, `conflicts`            |
//! | [`ids`]         | `VehicleId`                                           |
//! | [`rng`]         | `VehicleRng` (per-vehicle, deterministic)             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod direction;
pub mod ids;
pub mod rng;
pub mod trajectory;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use direction::{Direction, Turn};
pub use ids::VehicleId;
pub use rng::VehicleRng;
pub use trajectory::{Trajectory, conflicts, is_right_turn};
