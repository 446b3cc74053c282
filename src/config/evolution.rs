use super::traits::ConfigSection;
use crate::engines::generation::population::MIN_POPULATION_SIZE;
use crate::error::GaCoreError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    pub population_size: usize,
    pub chromosome_length: usize,
    pub num_generations: usize,
    pub crossover_rate: f64,
    pub mutation_rate: f64,
    pub target_fitness: Option<f64>, // Stop early once reached
    pub seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            chromosome_length: 64,
            num_generations: 50,
            crossover_rate: 0.8,
            mutation_rate: 0.05,
            target_fitness: None,
            seed: None,
        }
    }
}

impl ConfigSection for EvolutionConfig {
    fn section_name() -> &'static str {
        "evolution"
    }

    fn validate(&self) -> Result<(), GaCoreError> {
        if self.population_size < MIN_POPULATION_SIZE {
            return Err(GaCoreError::Configuration(format!(
                "Population size must be at least {}",
                MIN_POPULATION_SIZE
            )));
        }
        if self.chromosome_length == 0 {
            return Err(GaCoreError::Configuration(
                "Chromosome length must be at least 1".to_string()
            ));
        }
        if self.mutation_rate < 0.0 || self.mutation_rate > 1.0 {
            return Err(GaCoreError::Configuration(
                "Mutation rate must be between 0 and 1".to_string()
            ));
        }
        if self.crossover_rate < 0.0 || self.crossover_rate > 1.0 {
            return Err(GaCoreError::Configuration(
                "Crossover rate must be between 0 and 1".to_string()
            ));
        }
        Ok(())
    }
}
