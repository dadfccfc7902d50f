//! A generational genetic algorithm for minimizing
//! a function of two real variables over a bounded
//! square domain, without gradient information.
//!
//! Candidates are points of the domain. Each generation,
//! parent pairs are drawn by roulette-wheel selection,
//! with weights mirrored by rank so that lower fitness
//! means a larger share of the wheel. Every pair produces
//! two children by single-point crossover and clamped
//! uniform mutation, and the children replace the whole
//! population. The best candidate ever seen is kept
//! regardless of replacement.
//!
//! Any `Fn(f64, f64) -> f64` can be minimized; Himmelblau's
//! function is supplied as [`himmelblau`].
//!
//! # Example usage: Minimizing Himmelblau's function
//! ```
//! use oxiga::{himmelblau, Evolution, GeneticConfig, PopulationConfig};
//! use oxiga::logging::{EvolutionLogger, GenerationReport, ReportingLevel};
//!
//! fn main() {
//!     let population_config = PopulationConfig {
//!         size: 100,
//!         generations: 50,
//!         random_seed: Some(7),
//!     };
//!     let genetic_config = GeneticConfig {
//!         domain_bounds: (-5.0, 5.0),
//!         mutation_rate: 0.1,
//!         mutation_step: 1.0,
//!     };
//!
//!     let mut logger = EvolutionLogger::new(ReportingLevel::Champion);
//!     let mut evolution = Evolution::new(population_config, genetic_config, himmelblau).unwrap();
//!     let result = evolution.run_with(|population| {
//!         logger.log(population);
//!         println!("{}", GenerationReport::from(population));
//!     });
//!
//!     match result {
//!         Ok(best) => println!("Best solution: {}", best),
//!         Err(e) => eprintln!("{}", e),
//!     }
//!     assert_eq!(logger.iter().count(), 50);
//! }
//! ```

mod candidates;
mod evolution;
mod objective;
mod populations;
pub mod rng;

pub use candidates::*;
pub use evolution::*;
pub use objective::*;
pub use populations::*;
