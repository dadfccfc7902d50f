use oxiga::logging::{EvolutionLogger, GenerationReport, ReportingLevel, Stats};
use oxiga::{himmelblau, Candidate, Evolution, GeneticConfig, PopulationConfig};

use std::error::Error;
use std::fs;

use log::{error, info};
use rayon::prelude::*;
use ron::ser::PrettyConfig;
use serde::{Deserialize, Serialize};

/// Everything needed to set up a run, as read from a RON file.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct RunConfig {
    population: PopulationConfig,
    genetics: GeneticConfig,
}

/// What the command line asked for.
#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Run(Option<&'a str>),
    Stress(usize, Option<&'a str>),
    Example,
    Help,
    /// Unrecognised flag or malformed arguments.
    Usage,
}

impl<'a> Command<'a> {
    fn parse(args: &'a [String]) -> Command<'a> {
        let arg = |i: usize| args.get(i).map(String::as_str);
        match arg(1) {
            Some("--example") => Command::Example,
            Some("--help") | Some("-h") => Command::Help,
            Some("--stress") => match arg(2).map(str::parse::<usize>) {
                Some(Ok(runs)) => Command::Stress(runs, arg(3)),
                _ => Command::Usage,
            },
            Some(flag) if flag.starts_with("--") => Command::Usage,
            path => Command::Run(path),
        }
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("himmelblau");
    let result = match Command::parse(&args) {
        Command::Run(path) => load_config(path).and_then(|c| single_run(&c)),
        Command::Stress(runs, path) => load_config(path).and_then(|c| stress_test(&c, runs)),
        Command::Example => print_example_config(),
        Command::Help => {
            print_usage(program);
            Ok(())
        }
        Command::Usage => {
            print_usage(program);
            std::process::exit(2);
        }
    };

    if let Err(e) = result {
        error!("{}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} [config.ron]", program);
    eprintln!("       {} --stress <runs> [config.ron]", program);
    eprintln!("       {} --example", program);
    eprintln!();
    eprintln!("Minimize Himmelblau's function with a genetic algorithm.");
    eprintln!("Without a configuration file, defaults are used.");
}

fn load_config<S: AsRef<str>>(path: Option<S>) -> Result<RunConfig, Box<dyn Error>> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path.as_ref())?;
            let config: RunConfig = ron::from_str(&text)?;
            info!("loaded configuration from {}", path.as_ref());
            Ok(config)
        }
        None => Ok(RunConfig::default()),
    }
}

fn print_example_config() -> Result<(), Box<dyn Error>> {
    let example = RunConfig {
        population: PopulationConfig {
            size: 100,
            generations: 100,
            random_seed: Some(42),
        },
        genetics: GeneticConfig {
            mutation_rate: 0.1,
            ..GeneticConfig::default()
        },
    };
    println!("{}", ron::ser::to_string_pretty(&example, PrettyConfig::default())?);
    Ok(())
}

fn single_run(config: &RunConfig) -> Result<(), Box<dyn Error>> {
    let mut logger = EvolutionLogger::new(ReportingLevel::NoCandidates);
    let mut evolution = Evolution::new(
        config.population.clone(),
        config.genetics.clone(),
        himmelblau,
    )?;

    let best = evolution.run_with(|population| {
        logger.log(population);
        println!("{}", GenerationReport::from(population));
    })?;

    if let Some(log) = logger.latest() {
        info!("final generation fitness: {:?}", log.fitness);
    }
    print_best(&best);
    println!("{}", ron::to_string(&best)?);
    Ok(())
}

fn print_best(best: &Candidate) {
    let genes = best.genes();
    println!(
        "\nBest solution -> G: {} fitness: {:.2} coordinates: [{:.4}, {:.4}]",
        best.generation(),
        best.fitness(),
        genes[0],
        genes[1]
    );
}

/// Runs independent, differently-seeded evolutions in parallel
/// and summarizes the best fitness each one reached.
fn stress_test(config: &RunConfig, runs: usize) -> Result<(), Box<dyn Error>> {
    let base_seed = config.population.random_seed.unwrap_or(0);
    let results: Vec<Result<Candidate, oxiga::Error>> = (0..runs)
        .into_par_iter()
        .map(|i| {
            let population_config = PopulationConfig {
                random_seed: Some(base_seed.wrapping_add(i as u64)),
                ..config.population.clone()
            };
            Evolution::new(population_config, config.genetics.clone(), himmelblau)?.run()
        })
        .collect();

    let mut best = Vec::with_capacity(runs);
    for result in results {
        best.push(result?);
    }

    println!(
        "Best fitness over {} runs: {:?}",
        runs,
        Stats::from(best.iter().map(Candidate::fitness))
    );
    println!(
        "{}% of runs reached fitness below 0.01",
        best.iter().filter(|c| c.fitness() < 0.01).count() as f64 * 100.0 / runs.max(1) as f64
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("himmelblau")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn unknown_flags_print_usage() {
        assert_eq!(Command::parse(&args(&["--foo"])), Command::Usage);
        assert_eq!(Command::parse(&args(&["--foo", "config.ron"])), Command::Usage);
        assert_eq!(Command::parse(&args(&["--stress", "many"])), Command::Usage);
        assert_eq!(Command::parse(&args(&["--stress"])), Command::Usage);
    }

    #[test]
    fn known_commands() {
        assert_eq!(Command::parse(&args(&[])), Command::Run(None));
        assert_eq!(
            Command::parse(&args(&["config.ron"])),
            Command::Run(Some("config.ron"))
        );
        assert_eq!(
            Command::parse(&args(&["--stress", "8", "config.ron"])),
            Command::Stress(8, Some("config.ron"))
        );
        assert_eq!(Command::parse(&args(&["--stress", "3"])), Command::Stress(3, None));
        assert_eq!(Command::parse(&args(&["--example"])), Command::Example);
        assert_eq!(Command::parse(&args(&["-h"])), Command::Help);
    }

    #[test]
    fn missing_config_file_defaults() {
        let config = load_config(None::<&str>).unwrap();
        assert_eq!(config.population, PopulationConfig::default());
        assert_eq!(config.genetics, GeneticConfig::default());
    }
}
