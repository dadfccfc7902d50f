use crate::candidates::{ConfigurationError, DomainError};

use std::error::Error as StdError;
use std::fmt;

/// Replacement generation of the wrong size.
#[derive(Debug, Clone, PartialEq)]
pub struct SizeMismatchError {
    pub expected: usize,
    pub found: usize,
}

impl fmt::Display for SizeMismatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "replacement generation has {} candidates, population size is {}",
            self.found, self.expected
        )
    }
}

impl StdError for SizeMismatchError {}

/// Any error produced while setting up or running an evolution.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    Configuration(ConfigurationError),
    Domain(DomainError),
    SizeMismatch(SizeMismatchError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration(e) => write!(f, "configuration error: {}", e),
            Self::Domain(e) => write!(f, "domain error: {}", e),
            Self::SizeMismatch(e) => write!(f, "size mismatch: {}", e),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Configuration(e) => Some(e),
            Self::Domain(e) => Some(e),
            Self::SizeMismatch(e) => Some(e),
        }
    }
}

impl From<ConfigurationError> for Error {
    fn from(e: ConfigurationError) -> Error {
        Error::Configuration(e)
    }
}

impl From<DomainError> for Error {
    fn from(e: DomainError) -> Error {
        Error::Domain(e)
    }
}

impl From<SizeMismatchError> for Error {
    fn from(e: SizeMismatchError) -> Error {
        Error::SizeMismatch(e)
    }
}
