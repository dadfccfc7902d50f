use super::*;

/// Auxiliary type for offspring generation.
/// Handles selecting parent pairs from a population
/// and mating them into a replacement generation.
pub(super) struct OffspringFactory<'a, O: ?Sized> {
    population: &'a Population,
    genetic_config: &'a GeneticConfig,
    objective: &'a O,
}

impl<'a, O> OffspringFactory<'a, O>
where
    O: Objective + ?Sized,
{
    pub(super) fn new(
        population: &'a Population,
        genetic_config: &'a GeneticConfig,
        objective: &'a O,
    ) -> OffspringFactory<'a, O> {
        OffspringFactory {
            population,
            genetic_config,
            objective,
        }
    }

    /// Generate a full generation of offspring,
    /// two children per selected parent pair.
    pub(super) fn generate_offspring<R: Rng + ?Sized>(
        &self,
        generation: usize,
        rng: &mut R,
    ) -> Result<Vec<Candidate>, DomainError> {
        let size = self.population.size();
        let mut offspring = Vec::with_capacity(size);
        for _ in 0..size / 2 {
            let (parent1, parent2) = self.choose_parents(rng);
            offspring.push(self.mate(parent1, parent2, generation, rng)?);
            offspring.push(self.mate(parent2, parent1, generation, rng)?);
        }
        Ok(offspring)
    }

    /// Draw two independent parents. A candidate
    /// may be drawn twice and mate with itself.
    fn choose_parents<R: Rng + ?Sized>(&self, rng: &mut R) -> (&'a Candidate, &'a Candidate) {
        let population: &'a Population = self.population;
        (population.select_one(rng), population.select_one(rng))
    }

    fn mate<R: Rng + ?Sized>(
        &self,
        parent1: &Candidate,
        parent2: &Candidate,
        generation: usize,
        rng: &mut R,
    ) -> Result<Candidate, DomainError> {
        let genes = parent1.reproduce(parent2, self.genetic_config, rng);
        Candidate::new(genes, generation, self.objective, self.genetic_config)
    }
}
