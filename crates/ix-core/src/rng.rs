//! Deterministic per-vehicle RNG.
//!
//! Each vehicle gets its own independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (vehicle_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive vehicle IDs uniformly across the seed space.
//! Vehicle threads never share RNG state, so trip choices are reproducible
//! for a given seed even though admission order is not.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::{Direction, Trajectory, VehicleId};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Per-vehicle deterministic RNG.
///
/// Moved into the vehicle's thread at spawn time.
pub struct VehicleRng(SmallRng);

impl VehicleRng {
    /// Seed deterministically from the run's global seed and a vehicle ID.
    pub fn new(global_seed: u64, vehicle: VehicleId) -> Self {
        let seed = global_seed ^ (vehicle.0 as u64).wrapping_mul(MIXING_CONSTANT);
        VehicleRng(SmallRng::seed_from_u64(seed))
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// A uniformly chosen approach.
    #[inline]
    pub fn direction(&mut self) -> Direction {
        Direction::from_index(self.0.gen_range(0..4))
    }

    /// A random trajectory.
    ///
    /// With `allow_u_turns == false` the destination is drawn from the three
    /// approaches other than the origin.
    pub fn trajectory(&mut self, allow_u_turns: bool) -> Trajectory {
        let origin = self.direction();
        let destination = if allow_u_turns {
            self.direction()
        } else {
            Direction::from_index(origin.index() + self.0.gen_range(1..4))
        };
        Trajectory::new(origin, destination)
    }
}
