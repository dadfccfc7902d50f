//! Candidates are the individual solutions
//! being evolved: a point of the search domain
//! together with the objective's value there.
mod config;
mod errors;

pub use config::GeneticConfig;
pub use errors::*;

use crate::rng::gen_bool;
use crate::Objective;

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Number of genes in a chromosome.
pub const GENE_COUNT: usize = 2;

/// A candidate's chromosome: its `(x, y)` coordinates.
pub type Genes = [f64; GENE_COUNT];

/// A single solution of the search domain.
///
/// Fitness is computed once, on creation, and
/// genes are never modified afterwards; mutation
/// and recombination produce new gene arrays
/// from which new candidates are created.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Candidate {
    genes: Genes,
    fitness: f64,
    generation: usize,
    pub(crate) selection_weight: f64,
    pub(crate) interval_low: f64,
    pub(crate) interval_high: f64,
}

impl Candidate {
    /// Creates a candidate with randomized genes, each drawn
    /// uniformly from the configured [domain bounds].
    ///
    /// # Errors
    /// Returns an error if the objective's value at the
    /// drawn point is not finite.
    ///
    /// [domain bounds]: GeneticConfig::domain_bounds
    ///
    /// # Examples
    /// ```
    /// use oxiga::{himmelblau, Candidate, GeneticConfig};
    ///
    /// let config = GeneticConfig::default();
    /// let mut rng = rand::thread_rng();
    /// let candidate = Candidate::random(0, &himmelblau, &config, &mut rng).unwrap();
    ///
    /// assert!(candidate.genes().iter().all(|g| (-5.0..=5.0).contains(g)));
    /// assert_eq!(candidate.generation(), 0);
    /// ```
    pub fn random<O, R>(
        generation: usize,
        objective: &O,
        config: &GeneticConfig,
        rng: &mut R,
    ) -> Result<Candidate, DomainError>
    where
        O: Objective + ?Sized,
        R: Rng + ?Sized,
    {
        let (low, high) = config.domain_bounds;
        let mut genes = [0.0; GENE_COUNT];
        for gene in &mut genes {
            *gene = rng.gen_range(low..=high);
        }
        Candidate::new(genes, generation, objective, config)
    }

    /// Creates a candidate with the specified genes, clamped
    /// into the configured domain, and evaluates its fitness.
    ///
    /// # Errors
    /// Returns an error if the objective's value is not finite.
    ///
    /// # Examples
    /// ```
    /// use oxiga::{himmelblau, Candidate, GeneticConfig};
    ///
    /// let config = GeneticConfig::default();
    /// let candidate = Candidate::new([3.0, 3.0], 0, &himmelblau, &config).unwrap();
    /// assert_eq!(candidate.fitness(), 26.0);
    ///
    /// let clamped = Candidate::new([7.0, -9.0], 0, &himmelblau, &config).unwrap();
    /// assert_eq!(clamped.genes(), [5.0, -5.0]);
    /// ```
    pub fn new<O>(
        genes: Genes,
        generation: usize,
        objective: &O,
        config: &GeneticConfig,
    ) -> Result<Candidate, DomainError>
    where
        O: Objective + ?Sized,
    {
        let genes = genes.map(|g| config.clamp(g));
        let fitness = objective.evaluate(genes[0], genes[1]);
        if !fitness.is_finite() {
            return Err(DomainError {
                genes,
                value: fitness,
            });
        }
        Ok(Candidate {
            genes,
            fitness,
            generation,
            selection_weight: 0.0,
            interval_low: 0.0,
            interval_high: 0.0,
        })
    }

    /// Mutates each gene with probability [`mutation_rate`],
    /// displacing it by a uniformly distributed amount in
    /// ±[`mutation_step`] and clamping it back into the domain.
    ///
    /// [`mutation_rate`]: GeneticConfig::mutation_rate
    /// [`mutation_step`]: GeneticConfig::mutation_step
    ///
    /// # Examples
    /// ```
    /// use oxiga::{Candidate, GeneticConfig};
    ///
    /// let config = GeneticConfig {
    ///     mutation_rate: 1.0,
    ///     ..GeneticConfig::default()
    /// };
    /// let genes = Candidate::mutate([5.0, 0.0], &config, &mut rand::thread_rng());
    ///
    /// assert!(genes[0] <= 5.0 && genes[0] >= 4.0);
    /// assert!(genes[1].abs() <= 1.0);
    /// ```
    pub fn mutate<R: Rng + ?Sized>(
        mut genes: Genes,
        config: &GeneticConfig,
        rng: &mut R,
    ) -> Genes {
        let step = config.mutation_step;
        for gene in &mut genes {
            if gen_bool(rng, config.mutation_rate) {
                *gene = config.clamp(*gene + rng.gen_range(-step..=step));
            }
        }
        genes
    }

    /// Single-point crossover. The cut is drawn from {0, 1}:
    /// at 0 the child keeps this candidate's first gene and
    /// `other`'s second, at 1 it takes `other`'s first gene
    /// and this candidate's second.
    ///
    /// # Examples
    /// ```
    /// use oxiga::{himmelblau, Candidate, GeneticConfig};
    ///
    /// let config = GeneticConfig::default();
    /// let a = Candidate::new([1.0, 2.0], 0, &himmelblau, &config).unwrap();
    /// let b = Candidate::new([3.0, 4.0], 0, &himmelblau, &config).unwrap();
    ///
    /// let child = a.recombine(&b, &mut rand::thread_rng());
    /// assert!(child == [1.0, 4.0] || child == [3.0, 2.0]);
    /// ```
    pub fn recombine<R: Rng + ?Sized>(&self, other: &Candidate, rng: &mut R) -> Genes {
        Self::crossover_at(&self.genes, &other.genes, rng.gen_range(0..GENE_COUNT))
    }

    fn crossover_at(own: &Genes, other: &Genes, cut: usize) -> Genes {
        if cut == 0 {
            [own[0], other[1]]
        } else {
            [other[0], own[1]]
        }
    }

    /// Recombines with `other` and mutates the result,
    /// returning the genes of a single child.
    ///
    /// Not symmetric: `a.reproduce(&b, ..)` and
    /// `b.reproduce(&a, ..)` draw independently.
    pub fn reproduce<R: Rng + ?Sized>(
        &self,
        other: &Candidate,
        config: &GeneticConfig,
        rng: &mut R,
    ) -> Genes {
        let child = self.recombine(other, rng);
        Self::mutate(child, config, rng)
    }

    /// Returns the candidate's genes.
    pub fn genes(&self) -> Genes {
        self.genes
    }

    /// Returns the candidate's fitness. Lower is better.
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    /// Returns the generation that produced the candidate.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Returns the candidate's share of the selection
    /// probability in its current generation.
    pub fn selection_weight(&self) -> f64 {
        self.selection_weight
    }

    /// Returns the candidate's slice `[low, high)` of
    /// the cumulative selection probability line.
    pub fn selection_interval(&self) -> (f64, f64) {
        (self.interval_low, self.interval_high)
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Candidate(G{}, fitness: {:.2}, genes: [{:.4}, {:.4}])",
            self.generation, self.fitness, self.genes[0], self.genes[1]
        )
    }
}
