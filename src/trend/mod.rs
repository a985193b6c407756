use thiserror::Error;

pub mod profile;
pub mod reconstruct;

pub use profile::{ProfileAccumulator, ProfileParams};
pub use reconstruct::{SeriesAccumulator, reconstruct, repair_edges};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeriesError {
    #[error("series has no samples")]
    Empty,
    #[error("step {step} lies outside a domain of {domain} steps")]
    StepOutOfDomain { step: u64, domain: usize },
    #[error("step {step} follows step {previous}; steps must not decrease")]
    DecreasingStep { previous: u64, step: u64 },
    #[error("series is zero everywhere; edges left unrepaired")]
    AllZero,
    #[error("step {step} cannot be rounded up to a multiple of {bucket}")]
    StepOverflow { step: u64, bucket: u64 },
}
