use crate::candidates::ConfigurationError;

use serde::{Deserialize, Serialize};

/// Configuration data for population generation
/// and evolution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationConfig {
    /// Size of the population. Must be positive
    /// and even, as offspring are produced in pairs.
    pub size: usize,
    /// Number of generations to evolve for.
    pub generations: usize,
    /// Seed of the run's random number generator.
    /// Runs without a seed are not reproducible.
    pub random_seed: Option<u64>,
}

impl PopulationConfig {
    /// Checks that the population size is usable.
    ///
    /// # Errors
    /// Returns an error if the size is zero or odd.
    ///
    /// # Examples
    /// ```
    /// use oxiga::PopulationConfig;
    ///
    /// let config = PopulationConfig {
    ///     size: 5,
    ///     ..PopulationConfig::default()
    /// };
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        validate_size(self.size)
    }
}

impl Default for PopulationConfig {
    fn default() -> PopulationConfig {
        PopulationConfig {
            size: 100,
            generations: 100,
            random_seed: None,
        }
    }
}

pub(super) fn validate_size(size: usize) -> Result<(), ConfigurationError> {
    if size == 0 {
        Err(ConfigurationError::ZeroPopulationSize)
    } else if size % 2 != 0 {
        Err(ConfigurationError::OddPopulationSize(size))
    } else {
        Ok(())
    }
}
