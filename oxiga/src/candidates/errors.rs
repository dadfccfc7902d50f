use super::Genes;

use std::error::Error;
use std::fmt;

/// Rejected run configuration. Always detected
/// before any candidate is created.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    ZeroPopulationSize,
    OddPopulationSize(usize),
    MutationRateOutOfRange(f64),
    InvalidDomainBounds(f64, f64),
    InvalidMutationStep(f64),
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroPopulationSize => write!(f, "population size must be positive"),
            Self::OddPopulationSize(size) => {
                write!(f, "population size must be even, got {}", size)
            }
            Self::MutationRateOutOfRange(rate) => {
                write!(f, "mutation rate {} is outside [0, 1]", rate)
            }
            Self::InvalidDomainBounds(low, high) => {
                write!(f, "invalid domain bounds [{}, {}]", low, high)
            }
            Self::InvalidMutationStep(step) => {
                write!(f, "mutation step must be finite and positive, got {}", step)
            }
        }
    }
}

impl Error for ConfigurationError {}

/// The objective returned a non-finite value.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainError {
    pub genes: Genes,
    pub value: f64,
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "objective returned non-finite value {} at {:?}",
            self.value, self.genes
        )
    }
}

impl Error for DomainError {}
