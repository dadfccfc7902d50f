use super::Population;
use crate::candidates::{Candidate, Genes};

use std::fmt;

use serde::{Deserialize, Serialize};

/// Defines different possible reporting levels for logging.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportingLevel {
    /// Clones the entire population.
    AllCandidates,
    /// Clones only the generation's champion.
    Champion,
    /// Clones no candidates.
    NoCandidates,
}

/// A snapshot of a population.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Log {
    pub generation_number: usize,
    pub generation_sample: GenerationMemberRecord,
    pub best_ever: Candidate,
    pub fitness: Stats,
}

impl fmt::Display for Log {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Log {{\n\
            \tgeneration_number: {:?}\n\
            \tbest_ever: {}\n\
            \tfitness: {:?}\n\
            }}",
            &self.generation_number, &self.best_ever, &self.fitness,
        )
    }
}

/// A struct for reporting basic statistical data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub maximum: f64,
    pub minimum: f64,
    pub mean: f64,
    pub median: f64,
}

impl Stats {
    /// Returns statistics about numbers in a sequence.
    /// All statistics of an empty sequence are NaN.
    ///
    /// # Examples
    /// ```
    /// use oxiga::logging::Stats;
    ///
    /// let stats = Stats::from([-2.0, -1.0, 0.5, 1.0, 1.5].iter().copied());
    /// assert_eq!(stats.maximum, 1.5);
    /// assert_eq!(stats.minimum, -2.0);
    /// assert_eq!(stats.mean, 0.0);
    /// assert_eq!(stats.median, 0.5);
    /// ```
    pub fn from(data: impl Iterator<Item = f64>) -> Stats {
        let mut data: Vec<f64> = data.collect();
        if data.is_empty() {
            return Stats {
                maximum: f64::NAN,
                minimum: f64::NAN,
                mean: f64::NAN,
                median: f64::NAN,
            };
        }
        data.sort_by(f64::total_cmp);
        let mid = data.len() / 2;
        let median = if data.len() % 2 == 0 {
            (data[mid - 1] + data[mid]) / 2.0
        } else {
            data[mid]
        };
        Stats {
            maximum: data[data.len() - 1],
            minimum: data[0],
            mean: data.iter().sum::<f64>() / data.len() as f64,
            median,
        }
    }
}

/// A reporting-level dependant store
/// of candidates from a population.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum GenerationMemberRecord {
    /// Every member, best first.
    Candidates(Vec<Candidate>),
    /// Only the generation's champion.
    Champion(Candidate),
    /// Empty.
    None,
}

/// A log of the evolution of a population over time.
#[derive(Clone, Debug)]
pub struct EvolutionLogger {
    reporting_level: ReportingLevel,
    logs: Vec<Log>,
}

impl EvolutionLogger {
    /// Returns a logger with the appropiate reporting level.
    ///
    /// # Examples
    /// ```
    /// use oxiga::logging::{EvolutionLogger, ReportingLevel};
    ///
    /// let logger = EvolutionLogger::new(ReportingLevel::NoCandidates);
    /// ```
    pub fn new(reporting_level: ReportingLevel) -> EvolutionLogger {
        EvolutionLogger {
            reporting_level,
            logs: vec![],
        }
    }

    /// Store a snapshot of a population.
    ///
    /// # Examples
    /// ```
    /// use oxiga::{himmelblau, GeneticConfig, Population};
    /// use oxiga::logging::{EvolutionLogger, ReportingLevel};
    ///
    /// let mut logger = EvolutionLogger::new(ReportingLevel::Champion);
    /// let config = GeneticConfig::default();
    /// let mut rng = rand::thread_rng();
    /// let mut population = Population::new(10, &config, &himmelblau, &mut rng).unwrap();
    ///
    /// // Do something with the population...
    /// population.evolve(&config, &himmelblau, &mut rng).unwrap();
    /// // Then log a snapshot.
    /// logger.log(&population);
    ///
    /// assert_eq!(logger.iter().count(), 1);
    /// ```
    pub fn log(&mut self, population: &Population) {
        self.logs.push(Log {
            generation_number: population.generation(),
            generation_sample: match self.reporting_level {
                ReportingLevel::AllCandidates => {
                    GenerationMemberRecord::Candidates(population.members().to_vec())
                }
                ReportingLevel::Champion => {
                    GenerationMemberRecord::Champion(population.champion().clone())
                }
                ReportingLevel::NoCandidates => GenerationMemberRecord::None,
            },
            best_ever: population.best_ever().clone(),
            fitness: Stats::from(population.members().iter().map(Candidate::fitness)),
        })
    }

    /// Iterate over all logged snapshots.
    ///
    /// # Examples
    /// ```
    /// use oxiga::logging::{EvolutionLogger, ReportingLevel};
    ///
    /// let logger = EvolutionLogger::new(ReportingLevel::AllCandidates);
    /// // Log some stuff... then
    /// for log in logger.iter() {
    ///     println!("{}", log);
    /// }
    /// ```
    pub fn iter(&self) -> impl Iterator<Item = &Log> {
        self.logs.iter()
    }

    /// Returns the most recent snapshot, if any.
    pub fn latest(&self) -> Option<&Log> {
        self.logs.last()
    }
}

/// One line of progress: the best candidate of a
/// generation, and the best fitness found so far.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerationReport {
    pub generation: usize,
    pub best_fitness: f64,
    pub best_genes: Genes,
    pub best_ever_fitness: f64,
}

impl From<&Population> for GenerationReport {
    fn from(population: &Population) -> GenerationReport {
        let champion = population.champion();
        GenerationReport {
            generation: population.generation(),
            best_fitness: champion.fitness(),
            best_genes: champion.genes(),
            best_ever_fitness: population.best_ever().fitness(),
        }
    }
}

impl fmt::Display for GenerationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "G:{} -> fitness: {:.2} coordinates: [{:.4}, {:.4}]",
            self.generation, self.best_fitness, self.best_genes[0], self.best_genes[1]
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{himmelblau, rng::seeded_rng, GeneticConfig};

    #[test]
    fn even_length_median() {
        let stats = Stats::from([4.0, 1.0, 3.0, 2.0].iter().copied());
        assert_eq!(stats.median, 2.5);
        assert_eq!(stats.mean, 2.5);
        let pair = Stats::from([1.0, 2.0].iter().copied());
        assert_eq!(pair.median, 1.5);
    }

    #[test]
    fn empty_stats_are_nan() {
        let stats = Stats::from(std::iter::empty());
        assert!(stats.maximum.is_nan() && stats.median.is_nan());
    }

    #[test]
    fn report_formatting() {
        let report = GenerationReport {
            generation: 7,
            best_fitness: 0.123456,
            best_genes: [3.0, 2.00004],
            best_ever_fitness: 0.1,
        };
        assert_eq!(
            report.to_string(),
            "G:7 -> fitness: 0.12 coordinates: [3.0000, 2.0000]"
        );
    }

    #[test]
    fn logs_follow_reporting_level() {
        let mut rng = seeded_rng(Some(9));
        let config = GeneticConfig::default();
        let mut population = Population::new(6, &config, &himmelblau, &mut rng).unwrap();

        let mut full = EvolutionLogger::new(ReportingLevel::AllCandidates);
        let mut bare = EvolutionLogger::new(ReportingLevel::NoCandidates);
        for _ in 0..3 {
            population.evolve(&config, &himmelblau, &mut rng).unwrap();
            full.log(&population);
            bare.log(&population);
        }

        let latest = full.latest().unwrap();
        assert_eq!(latest.generation_number, 3);
        assert_eq!(latest.fitness.minimum, population.champion().fitness());
        match &latest.generation_sample {
            GenerationMemberRecord::Candidates(c) => assert_eq!(c.as_slice(), population.members()),
            other => panic!("unexpected sample {:?}", other),
        }
        assert!(matches!(
            bare.latest().unwrap().generation_sample,
            GenerationMemberRecord::None
        ));
        let generations: Vec<usize> = bare.iter().map(|l| l.generation_number).collect();
        assert_eq!(generations, [1, 2, 3]);
    }
}
