//! Strongly typed vehicle identifier.
//!
//! `VehicleId` is `Copy + Ord + Hash` so it can key maps and be sorted
//! without ceremony.  The inner integer is `pub` for direct indexing into
//! per-vehicle `Vec`s, but callers should prefer [`VehicleId::index`].

use std::fmt;

/// Index of a simulated vehicle.  Max ~4.3 billion vehicles.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleId(pub u32);

impl VehicleId {
    /// Cast to `usize` for direct use as a `Vec` index.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VehicleId({})", self.0)
    }
}

impl TryFrom<usize> for VehicleId {
    type Error = std::num::TryFromIntError;
    fn try_from(n: usize) -> Result<VehicleId, Self::Error> {
        u32::try_from(n).map(VehicleId)
    }
}
