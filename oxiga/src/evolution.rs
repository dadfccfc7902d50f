//! The generational control loop.
use crate::logging::GenerationReport;
use crate::rng::seeded_rng;
use crate::{
    Candidate, ConfigurationError, Error, GeneticConfig, Objective, Population, PopulationConfig,
};

use log::{debug, info};
use rand::rngs::StdRng;
use rand::Rng;

/// Stage of an [`Evolution`] run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EvolutionState {
    /// No population exists yet.
    Initializing,
    /// Generations remain to be evolved.
    Evolving,
    /// All configured generations have been evolved.
    Done,
}

enum Stage {
    Initializing,
    Evolving(Population),
    Done(Population),
}

/// A single optimization run: owns the configuration,
/// the objective, the run's random number generator
/// and, once initialized, the population.
///
/// # Examples
/// ```
/// use oxiga::{himmelblau, Evolution, GeneticConfig, PopulationConfig};
///
/// let population_config = PopulationConfig {
///     size: 50,
///     generations: 40,
///     random_seed: Some(42),
/// };
/// let genetic_config = GeneticConfig {
///     mutation_rate: 0.1,
///     ..GeneticConfig::default()
/// };
///
/// let mut evolution = Evolution::new(population_config, genetic_config, himmelblau).unwrap();
/// let best = evolution.run().unwrap();
///
/// assert!(best.fitness() < 26.0);
/// assert!(best.genes().iter().all(|g| (-5.0..=5.0).contains(g)));
/// ```
pub struct Evolution<O, R = StdRng> {
    stage: Stage,
    population_config: PopulationConfig,
    genetic_config: GeneticConfig,
    objective: O,
    rng: R,
}

impl<O: Objective> Evolution<O, StdRng> {
    /// Creates a run whose generator is seeded from
    /// [`random_seed`], or from OS entropy if unset.
    ///
    /// # Errors
    /// Returns an error if either configuration is invalid.
    ///
    /// [`random_seed`]: PopulationConfig::random_seed
    pub fn new(
        population_config: PopulationConfig,
        genetic_config: GeneticConfig,
        objective: O,
    ) -> Result<Evolution<O, StdRng>, ConfigurationError> {
        let rng = seeded_rng(population_config.random_seed);
        Evolution::with_rng(population_config, genetic_config, objective, rng)
    }
}

impl<O: Objective, R: Rng> Evolution<O, R> {
    /// Creates a run drawing from the given generator.
    /// [`random_seed`] is ignored.
    ///
    /// # Errors
    /// Returns an error if either configuration is invalid.
    ///
    /// [`random_seed`]: PopulationConfig::random_seed
    pub fn with_rng(
        population_config: PopulationConfig,
        genetic_config: GeneticConfig,
        objective: O,
        rng: R,
    ) -> Result<Evolution<O, R>, ConfigurationError> {
        population_config.validate()?;
        genetic_config.validate()?;
        Ok(Evolution {
            stage: Stage::Initializing,
            population_config,
            genetic_config,
            objective,
            rng,
        })
    }

    /// Performs one transition: initializes the population,
    /// or evolves it by one generation. Does nothing once
    /// the run is done. Returns the new state.
    ///
    /// # Errors
    /// Returns an error if the objective yields a non-finite
    /// value for some candidate.
    pub fn step(&mut self) -> Result<EvolutionState, Error> {
        match &mut self.stage {
            Stage::Initializing => {
                let population = Population::new(
                    self.population_config.size,
                    &self.genetic_config,
                    &self.objective,
                    &mut self.rng,
                )?;
                info!(
                    "initialized {} candidates, best fitness {:.4}",
                    population.size(),
                    population.best_ever().fitness()
                );
                self.stage = Stage::Evolving(population);
            }
            Stage::Evolving(population) => {
                population.evolve(&self.genetic_config, &self.objective, &mut self.rng)?;
                debug!("{}", GenerationReport::from(&*population));
            }
            Stage::Done(_) => {}
        }
        self.finish_if_complete();
        Ok(self.state())
    }

    fn finish_if_complete(&mut self) {
        let generations = self.population_config.generations;
        if matches!(&self.stage, Stage::Evolving(p) if p.generation() >= generations) {
            if let Stage::Evolving(population) =
                std::mem::replace(&mut self.stage, Stage::Initializing)
            {
                info!(
                    "finished after {} generations, best fitness {:.4} found in generation {}",
                    population.generation(),
                    population.best_ever().fitness(),
                    population.best_ever().generation()
                );
                self.stage = Stage::Done(population);
            }
        }
    }

    /// Runs to completion and returns the best candidate
    /// ever seen.
    ///
    /// # Errors
    /// Returns an error if the objective yields a non-finite
    /// value for some candidate.
    pub fn run(&mut self) -> Result<Candidate, Error> {
        self.run_with(|_| {})
    }

    /// Runs to completion, passing the population to
    /// `reporter` after every evolved generation, and
    /// returns the best candidate ever seen.
    ///
    /// # Errors
    /// Returns an error if the objective yields a non-finite
    /// value for some candidate.
    ///
    /// # Examples
    /// ```
    /// use oxiga::{himmelblau, Evolution, GeneticConfig, PopulationConfig};
    /// use oxiga::logging::GenerationReport;
    ///
    /// let population_config = PopulationConfig {
    ///     size: 10,
    ///     generations: 5,
    ///     random_seed: Some(1),
    /// };
    /// let mut evolution =
    ///     Evolution::new(population_config, GeneticConfig::default(), himmelblau).unwrap();
    ///
    /// let mut reports = vec![];
    /// evolution
    ///     .run_with(|population| reports.push(GenerationReport::from(population)))
    ///     .unwrap();
    ///
    /// assert_eq!(reports.len(), 5);
    /// assert_eq!(reports[4].generation, 5);
    /// ```
    pub fn run_with<P>(&mut self, mut reporter: P) -> Result<Candidate, Error>
    where
        P: FnMut(&Population),
    {
        loop {
            let evolving = self.state() == EvolutionState::Evolving;
            self.step()?;
            match &self.stage {
                Stage::Evolving(population) if evolving => reporter(population),
                Stage::Done(population) => {
                    if evolving {
                        reporter(population);
                    }
                    return Ok(population.best_ever().clone());
                }
                _ => {}
            }
        }
    }

    /// Returns the run's current state.
    pub fn state(&self) -> EvolutionState {
        match self.stage {
            Stage::Initializing => EvolutionState::Initializing,
            Stage::Evolving(_) => EvolutionState::Evolving,
            Stage::Done(_) => EvolutionState::Done,
        }
    }

    /// Returns the population, unless the run
    /// is still initializing.
    pub fn population(&self) -> Option<&Population> {
        match &self.stage {
            Stage::Initializing => None,
            Stage::Evolving(population) | Stage::Done(population) => Some(population),
        }
    }

    /// Returns the best candidate seen so far, unless
    /// the run is still initializing.
    pub fn best_ever(&self) -> Option<&Candidate> {
        self.population().map(Population::best_ever)
    }

    /// Returns the run's population configuration.
    pub fn population_config(&self) -> &PopulationConfig {
        &self.population_config
    }

    /// Returns the run's genetic configuration.
    pub fn genetic_config(&self) -> &GeneticConfig {
        &self.genetic_config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::himmelblau;

    fn population_config(size: usize, generations: usize) -> PopulationConfig {
        PopulationConfig {
            size,
            generations,
            random_seed: Some(1234),
        }
    }

    #[test]
    fn states_progress_in_order() {
        let mut evolution =
            Evolution::new(population_config(4, 2), GeneticConfig::default(), himmelblau).unwrap();
        assert_eq!(evolution.state(), EvolutionState::Initializing);
        assert!(evolution.population().is_none());

        assert_eq!(evolution.step().unwrap(), EvolutionState::Evolving);
        assert_eq!(evolution.population().unwrap().generation(), 0);
        assert_eq!(evolution.step().unwrap(), EvolutionState::Evolving);
        assert_eq!(evolution.step().unwrap(), EvolutionState::Done);
        assert_eq!(evolution.population().unwrap().generation(), 2);
        assert_eq!(evolution.step().unwrap(), EvolutionState::Done);
        assert_eq!(evolution.population().unwrap().generation(), 2);
    }

    #[test]
    fn zero_generations_reports_initial_best() {
        let mut evolution =
            Evolution::new(population_config(8, 0), GeneticConfig::default(), himmelblau).unwrap();
        let mut reports = 0;
        let best = evolution.run_with(|_| reports += 1).unwrap();
        assert_eq!(reports, 0);
        assert_eq!(best.generation(), 0);
        assert_eq!(evolution.state(), EvolutionState::Done);
        assert_eq!(
            evolution.best_ever().unwrap(),
            evolution.population().unwrap().champion()
        );
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let run = || {
            let mut evolution =
                Evolution::new(population_config(20, 15), GeneticConfig::default(), himmelblau)
                    .unwrap();
            let best = evolution.run().unwrap();
            let history = evolution.population().unwrap().history().to_vec();
            (best, history)
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn reporter_sees_monotonic_best_ever() {
        let genetic_config = GeneticConfig {
            mutation_rate: 0.3,
            ..GeneticConfig::default()
        };
        let mut evolution =
            Evolution::new(population_config(40, 60), genetic_config, himmelblau).unwrap();
        let mut best_so_far = vec![];
        let best = evolution
            .run_with(|p| best_so_far.push(p.best_ever().fitness()))
            .unwrap();
        assert_eq!(best_so_far.len(), 60);
        assert!(best_so_far.windows(2).all(|w| w[1] <= w[0]));
        assert_eq!(best.fitness(), best_so_far[59]);
        assert!(best.fitness() < 2.0);
    }

    #[test]
    fn invalid_configuration_is_rejected() {
        let odd = Evolution::new(population_config(5, 10), GeneticConfig::default(), himmelblau);
        assert_eq!(odd.err(), Some(ConfigurationError::OddPopulationSize(5)));

        let genetic_config = GeneticConfig {
            mutation_rate: -0.1,
            ..GeneticConfig::default()
        };
        let negative = Evolution::new(population_config(4, 10), genetic_config, himmelblau);
        assert_eq!(
            negative.err(),
            Some(ConfigurationError::MutationRateOutOfRange(-0.1))
        );
    }

    #[test]
    fn unsamplable_ranges_are_rejected_before_the_run() {
        let wide = GeneticConfig {
            domain_bounds: (-1e308, 1e308),
            ..GeneticConfig::default()
        };
        let result = Evolution::new(population_config(4, 3), wide, himmelblau);
        assert_eq!(
            result.err(),
            Some(ConfigurationError::InvalidDomainBounds(-1e308, 1e308))
        );

        let huge_step = GeneticConfig {
            mutation_rate: 1.0,
            mutation_step: f64::MAX,
            ..GeneticConfig::default()
        };
        let result = Evolution::new(population_config(4, 3), huge_step, himmelblau);
        assert_eq!(
            result.err(),
            Some(ConfigurationError::InvalidMutationStep(f64::MAX))
        );
    }

    #[test]
    fn domain_errors_stop_the_run() {
        let pole = |x: f64, y: f64| if x > 0.0 && y > 0.0 { f64::NAN } else { x + y };
        let mut evolution =
            Evolution::new(population_config(50, 10), GeneticConfig::default(), pole).unwrap();
        assert!(matches!(evolution.run(), Err(Error::Domain(_))));
    }
}
