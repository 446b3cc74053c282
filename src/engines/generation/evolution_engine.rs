use crate::config::{ConfigSection, EvolutionConfig};
use crate::engines::generation::{
    genome::Chromosome,
    individual::FitnessFunction,
    population::Population,
};
use crate::error::Result;

pub trait ProgressCallback {
    fn on_generation_start(&mut self, generation: usize);
    fn on_generation_complete(&mut self, generation: usize, best_fitness: f64, avg_fitness: f64);
}

/// Result of an evolution run
#[derive(Debug, Clone)]
pub struct EvolutionOutcome<P> {
    pub generations: usize,
    pub best_chromosome: Chromosome,
    pub best_fitness: f64,
    pub best_phenotype: Option<P>,
    pub reached_target: bool,
}

/// Drives a [`Population`] through the configured number of generations
pub struct EvolutionEngine<F: FitnessFunction> {
    config: EvolutionConfig,
    population: Population<F>,
}

impl<F: FitnessFunction> EvolutionEngine<F> {
    pub fn new(config: EvolutionConfig, fitness_fn: F) -> Result<Self> {
        config.validate()?;
        let population = Population::from_config(&config, fitness_fn)?;
        Ok(Self { config, population })
    }

    /// Wrap an existing population, e.g. one seeded with known chromosomes
    pub fn with_population(config: EvolutionConfig, population: Population<F>) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, population })
    }

    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    pub fn population(&self) -> &Population<F> {
        &self.population
    }

    pub fn population_mut(&mut self) -> &mut Population<F> {
        &mut self.population
    }

    /// Run the evolution process.
    ///
    /// Stops after `num_generations` steps, or earlier once the best fitness
    /// reaches `target_fitness`.
    pub fn run<C: ProgressCallback>(
        &mut self,
        mut callback: C,
    ) -> Result<EvolutionOutcome<F::Phenotype>> {
        for step in 0..self.config.num_generations {
            if self.target_reached() {
                log::debug!("Target fitness reached after {} generations", step);
                break;
            }

            callback.on_generation_start(step);
            self.population
                .next_gen(self.config.crossover_rate, self.config.mutation_rate)?;

            let stats = self.population.stats();
            callback.on_generation_complete(step, stats.top_fitness, stats.avg_fitness);
        }

        let best = self.population.best_individual();
        Ok(EvolutionOutcome {
            generations: self.population.generation(),
            best_chromosome: best.chromosome().to_vec(),
            best_fitness: best.fitness(),
            best_phenotype: best.phenotype().cloned(),
            reached_target: self.target_reached(),
        })
    }

    fn target_reached(&self) -> bool {
        self.config
            .target_fitness
            .is_some_and(|target| self.population.best_individual().fitness() >= target)
    }
}
