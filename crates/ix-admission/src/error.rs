use ix_core::Trajectory;
use thiserror::Error;

/// Caller contract violations.
///
/// None of these is a runtime condition: each one means the registry's
/// bookkeeping no longer matches what the vehicles believe.  The plain
/// entry points ([`Intersection::exit`][crate::Intersection::exit],
/// [`Intersection::teardown`][crate::Intersection::teardown]) panic on them;
/// the `try_*` variants return them.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AdmissionError {
    #[error("exit for {0} which is not in the intersection")]
    NotAdmitted(Trajectory),

    #[error("teardown with {} vehicle(s) still in the intersection", .occupants.len())]
    OccupiedAtTeardown { occupants: Vec<Trajectory> },
}

pub type AdmissionResult<T> = Result<T, AdmissionError>;
