use ix_admission::AdmissionError;
use ix_core::VehicleId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("vehicle thread {0} panicked")]
    VehiclePanicked(VehicleId),

    #[error("intersection contract violated: {0}")]
    Admission(#[from] AdmissionError),
}

pub type SimResult<T> = Result<T, SimError>;
