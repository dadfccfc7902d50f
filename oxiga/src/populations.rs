//! A Population is a fixed-size collection of
//! candidates, kept sorted from best to worst.
//! Parents are drawn by roulette-wheel selection,
//! and each generation the whole population is
//! replaced by their offspring.
mod config;
mod errors;
pub mod logging;
mod offspring_factory;

use crate::candidates::{Candidate, ConfigurationError, DomainError, GeneticConfig};
use crate::Objective;
pub use config::PopulationConfig;
pub use errors::*;
use offspring_factory::OffspringFactory;

use log::trace;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A population of candidates.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Population {
    members: Vec<Candidate>,
    size: usize,
    generation: usize,
    best_ever: Candidate,
    history: Vec<Candidate>,
}

impl Population {
    /// Creates a population of `size` randomized candidates
    /// at generation 0.
    ///
    /// # Errors
    /// Returns an error if `size` is zero or odd, or if the
    /// genetic config is invalid; both are checked before any
    /// candidate is created. Also returns an error if the
    /// objective yields a non-finite value for some candidate.
    ///
    /// # Examples
    /// ```
    /// use oxiga::{himmelblau, GeneticConfig, Population};
    ///
    /// let config = GeneticConfig::default();
    /// let mut rng = rand::thread_rng();
    /// let population = Population::new(10, &config, &himmelblau, &mut rng).unwrap();
    ///
    /// assert_eq!(population.members().len(), 10);
    /// assert_eq!(population.generation(), 0);
    ///
    /// assert!(Population::new(5, &config, &himmelblau, &mut rng).is_err());
    /// ```
    pub fn new<O, R>(
        size: usize,
        genetic_config: &GeneticConfig,
        objective: &O,
        rng: &mut R,
    ) -> Result<Population, Error>
    where
        O: Objective + ?Sized,
        R: Rng + ?Sized,
    {
        config::validate_size(size)?;
        genetic_config.validate()?;
        let members = (0..size)
            .map(|_| Candidate::random(0, objective, genetic_config, &mut *rng))
            .collect::<Result<Vec<_>, DomainError>>()?;
        Ok(Population::from_members(members)?)
    }

    /// Creates a population from already-built candidates.
    /// Members are sorted, the best one becomes the best-ever
    /// candidate, and selection weights are computed.
    ///
    /// # Errors
    /// Returns an error if the number of candidates is zero or odd.
    ///
    /// # Examples
    /// ```
    /// use oxiga::{himmelblau, Candidate, GeneticConfig, Population};
    ///
    /// let config = GeneticConfig::default();
    /// let members = [[3.0, 3.0], [3.0, 2.0]]
    ///     .iter()
    ///     .map(|genes| Candidate::new(*genes, 0, &himmelblau, &config).unwrap())
    ///     .collect();
    /// let population = Population::from_members(members).unwrap();
    ///
    /// assert_eq!(population.champion().genes(), [3.0, 2.0]);
    /// assert_eq!(population.best_ever().fitness(), 0.0);
    /// ```
    pub fn from_members(mut members: Vec<Candidate>) -> Result<Population, ConfigurationError> {
        config::validate_size(members.len())?;
        sort_by_increasing_fitness(&mut members);
        assign_weights(&mut members);
        Ok(Population {
            size: members.len(),
            best_ever: members[0].clone(),
            members,
            generation: 0,
            history: vec![],
        })
    }

    /// Assigns each member its selection weight and its
    /// slice of the cumulative probability line.
    ///
    /// Since lower fitness is better, weights are mirrored
    /// by rank: the member at sorted position `i` receives
    /// the fitness of the member at position `size - 1 - i`,
    /// divided by the population's fitness sum. Intervals
    /// are laid out contiguously from 0 in sorted order.
    ///
    /// If some fitness is negative, all values are offset so
    /// the lowest is 0. If the sum is zero (or overflows),
    /// weights are uniform.
    pub fn compute_weights(&mut self) {
        assign_weights(&mut self.members);
    }

    /// Selects a member by roulette wheel: returns the first
    /// member whose selection interval contains a uniformly
    /// drawn number in [0, 1).
    ///
    /// If rounding leaves the number outside every interval,
    /// the last (worst) member is returned.
    ///
    /// # Examples
    /// ```
    /// use oxiga::{himmelblau, GeneticConfig, Population};
    ///
    /// let config = GeneticConfig::default();
    /// let mut rng = rand::thread_rng();
    /// let population = Population::new(10, &config, &himmelblau, &mut rng).unwrap();
    ///
    /// let parent = population.select_one(&mut rng);
    /// assert!(population.members().contains(parent));
    /// ```
    pub fn select_one<R: Rng + ?Sized>(&self, rng: &mut R) -> &Candidate {
        self.select_at(rng.gen::<f64>())
    }

    fn select_at(&self, r: f64) -> &Candidate {
        self.members
            .iter()
            .find(|c| c.interval_low <= r && r < c.interval_high)
            .unwrap_or_else(|| {
                trace!("selection point {} fell outside all intervals", r);
                &self.members[self.members.len() - 1]
            })
    }

    /// Produces a full replacement generation: `size / 2`
    /// parent pairs are selected, and each pair produces
    /// two children, one per parent order. Children are
    /// tagged with `generation`.
    ///
    /// # Errors
    /// Returns an error if the objective yields a non-finite
    /// value for some child.
    pub fn generate_offspring<O, R>(
        &self,
        generation: usize,
        genetic_config: &GeneticConfig,
        objective: &O,
        rng: &mut R,
    ) -> Result<Vec<Candidate>, DomainError>
    where
        O: Objective + ?Sized,
        R: Rng + ?Sized,
    {
        OffspringFactory::new(self, genetic_config, objective).generate_offspring(generation, rng)
    }

    /// Replaces all members with `children`, re-sorts them,
    /// updates the best-ever candidate on strict improvement,
    /// recomputes selection weights and records the new
    /// generation's best in the history.
    ///
    /// # Errors
    /// Returns an error, leaving the population untouched,
    /// if the number of children differs from the population
    /// size.
    pub fn advance(
        &mut self,
        mut children: Vec<Candidate>,
        generation: usize,
    ) -> Result<(), SizeMismatchError> {
        if children.len() != self.size {
            return Err(SizeMismatchError {
                expected: self.size,
                found: children.len(),
            });
        }
        sort_by_increasing_fitness(&mut children);
        self.members = children;
        self.compute_weights();
        if self.members[0].fitness() < self.best_ever.fitness() {
            self.best_ever = self.members[0].clone();
        }
        self.generation = generation;
        self.history.push(self.members[0].clone());
        Ok(())
    }

    /// Evolves the population by one generation, generating
    /// offspring from the current members and advancing
    /// to them.
    ///
    /// # Errors
    /// Returns an error if the objective yields a non-finite
    /// value for some child.
    ///
    /// # Examples
    /// ```
    /// use oxiga::{himmelblau, GeneticConfig, Population};
    ///
    /// let mut rng = rand::thread_rng();
    /// let config = GeneticConfig::default();
    /// let mut population = Population::new(20, &config, &himmelblau, &mut rng).unwrap();
    /// let initial_best = population.best_ever().fitness();
    ///
    /// population.evolve(&config, &himmelblau, &mut rng).unwrap();
    ///
    /// assert_eq!(population.generation(), 1);
    /// assert_eq!(population.history().len(), 1);
    /// assert!(population.best_ever().fitness() <= initial_best);
    /// ```
    pub fn evolve<O, R>(
        &mut self,
        genetic_config: &GeneticConfig,
        objective: &O,
        rng: &mut R,
    ) -> Result<(), Error>
    where
        O: Objective + ?Sized,
        R: Rng + ?Sized,
    {
        let generation = self.generation + 1;
        let offspring = self.generate_offspring(generation, genetic_config, objective, rng)?;
        self.advance(offspring, generation)?;
        Ok(())
    }

    /// Returns the current members, best first.
    pub fn members(&self) -> &[Candidate] {
        &self.members
    }

    /// Returns the current generation's best candidate.
    pub fn champion(&self) -> &Candidate {
        &self.members[0]
    }

    /// Returns the best candidate seen in any generation.
    pub fn best_ever(&self) -> &Candidate {
        &self.best_ever
    }

    /// Returns the best candidate of each generation
    /// produced since initialization, oldest first.
    pub fn history(&self) -> &[Candidate] {
        &self.history
    }

    /// Returns the current generation number.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Returns the population size.
    pub fn size(&self) -> usize {
        self.size
    }
}

fn assign_weights(members: &mut [Candidate]) {
    let offset = members.iter().map(Candidate::fitness).fold(0.0, f64::min);
    let scores: Vec<f64> = members.iter().map(|c| c.fitness() - offset).collect();
    let total: f64 = scores.iter().sum();
    let uniform = !(total.is_finite() && total > 0.0);
    let count = members.len();

    let mut cumulative = 0.0;
    for (i, member) in members.iter_mut().enumerate() {
        member.selection_weight = if uniform {
            1.0 / count as f64
        } else {
            scores[count - 1 - i] / total
        };
        member.interval_low = cumulative;
        cumulative += member.selection_weight;
        member.interval_high = cumulative;
    }
}

/// Stable sort, so equal-fitness members keep their relative order.
fn sort_by_increasing_fitness(candidates: &mut [Candidate]) {
    candidates.sort_by(|c1, c2| c1.fitness().total_cmp(&c2.fitness()));
}
