use super::ConfigurationError;

use serde::{Deserialize, Serialize};

/// Configuration data for candidate generation
/// and inter-candidate operations.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneticConfig {
    /// Closed interval every gene is confined to,
    /// as `(low, high)`.
    pub domain_bounds: (f64, f64),
    /// Chance of each gene being mutated
    /// in a child. Must be in [0.0, 1.0].
    pub mutation_rate: f64,
    /// Magnitude of bound on the mutation uniform
    /// distribution. Never adapted during a run.
    pub mutation_step: f64,
}

impl GeneticConfig {
    /// Checks that all values are usable.
    ///
    /// # Errors
    /// Returns an error if the mutation rate is not
    /// in [0.0, 1.0], the bounds are not a non-empty
    /// interval of finite width, or the mutation step
    /// is not positive with a finite `2 * step` width.
    ///
    /// # Examples
    /// ```
    /// use oxiga::GeneticConfig;
    ///
    /// assert!(GeneticConfig::default().validate().is_ok());
    ///
    /// let config = GeneticConfig {
    ///     mutation_rate: 1.5,
    ///     ..GeneticConfig::default()
    /// };
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(ConfigurationError::MutationRateOutOfRange(self.mutation_rate));
        }
        let (low, high) = self.domain_bounds;
        if !low.is_finite() || !high.is_finite() || low >= high || !(high - low).is_finite() {
            return Err(ConfigurationError::InvalidDomainBounds(low, high));
        }
        // Sampling draws from [-step, step], whose width must stay finite.
        if !(2.0 * self.mutation_step).is_finite() || self.mutation_step <= 0.0 {
            return Err(ConfigurationError::InvalidMutationStep(self.mutation_step));
        }
        Ok(())
    }

    /// Clamps `value` into the domain bounds.
    pub(crate) fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.domain_bounds.0, self.domain_bounds.1)
    }
}

impl Default for GeneticConfig {
    /// The [-5, 5] square, a 5% mutation
    /// rate and a unit mutation step.
    fn default() -> GeneticConfig {
        GeneticConfig {
            domain_bounds: (-5.0, 5.0),
            mutation_rate: 0.05,
            mutation_step: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_nan_rate() {
        let config = GeneticConfig {
            mutation_rate: f64::NAN,
            ..GeneticConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::MutationRateOutOfRange(_))
        ));
    }

    #[test]
    fn rejects_empty_domain() {
        let config = GeneticConfig {
            domain_bounds: (5.0, -5.0),
            ..GeneticConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigurationError::InvalidDomainBounds(5.0, -5.0))
        );
    }

    #[test]
    fn rejects_zero_step() {
        let config = GeneticConfig {
            mutation_step: 0.0,
            ..GeneticConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigurationError::InvalidMutationStep(0.0))
        );
    }

    #[test]
    fn rejects_domain_wider_than_f64() {
        let config = GeneticConfig {
            domain_bounds: (-1e308, 1e308),
            ..GeneticConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigurationError::InvalidDomainBounds(-1e308, 1e308))
        );
    }

    #[test]
    fn rejects_step_whose_range_overflows() {
        let config = GeneticConfig {
            mutation_rate: 1.0,
            mutation_step: f64::MAX,
            ..GeneticConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigurationError::InvalidMutationStep(f64::MAX))
        );

        let config = GeneticConfig {
            mutation_step: 1e300,
            ..GeneticConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_config_deserializes_with_defaults() {
        let config: GeneticConfig = serde_json::from_str(r#"{"mutation_rate": 0.2}"#).unwrap();
        assert_eq!(config.mutation_rate, 0.2);
        assert_eq!(config.domain_bounds, (-5.0, 5.0));
        assert_eq!(config.mutation_step, 1.0);
    }
}
