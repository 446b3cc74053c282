use crate::engines::generation::{genome::Chromosome, operators};
use rand::Rng;
use std::fmt;
use std::sync::Arc;

/// Scores a chromosome.
///
/// Must be pure: the same chromosome always yields the same fitness. While
/// scoring, the function may hand the decoded phenotype to `set_pheno` so it
/// can be inspected later without decoding twice.
pub trait FitnessFunction {
    type Phenotype: Clone + fmt::Debug;

    fn fitness(&self, chromosome: &[u32], set_pheno: &mut dyn FnMut(Self::Phenotype)) -> f64;
}

/// A chromosome together with its memoised fitness and phenotype.
///
/// Fitness is computed once when the individual is created and again only
/// when a mutation actually changes a gene.
pub struct Individual<F: FitnessFunction> {
    chromosome: Chromosome,
    fitness_fn: Arc<F>,
    fitness: f64,
    phenotype: Option<F::Phenotype>,
}

impl<F: FitnessFunction> Individual<F> {
    /// Create from `chromosome`, or a random one of `chrom_len` genes when `None`
    pub fn new<R: Rng + ?Sized>(
        chrom_len: usize,
        fitness_fn: Arc<F>,
        chromosome: Option<Chromosome>,
        rng: &mut R,
    ) -> Self {
        let chromosome =
            chromosome.unwrap_or_else(|| operators::random_chromosome(chrom_len, rng));
        Self::from_chromosome(chromosome, fitness_fn)
    }

    pub fn from_chromosome(chromosome: Chromosome, fitness_fn: Arc<F>) -> Self {
        let mut individual = Self {
            chromosome,
            fitness_fn,
            fitness: 0.0,
            phenotype: None,
        };
        individual.evaluate();
        individual
    }

    /// New individual sharing this one's fitness function
    pub fn offspring(&self, chromosome: Chromosome) -> Self {
        Self::from_chromosome(chromosome, Arc::clone(&self.fitness_fn))
    }

    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    pub fn chromosome(&self) -> &[u32] {
        &self.chromosome
    }

    pub fn phenotype(&self) -> Option<&F::Phenotype> {
        self.phenotype.as_ref()
    }

    pub fn fitness_fn(&self) -> &Arc<F> {
        &self.fitness_fn
    }

    /// Mutate genes in place with probability `rate` each.
    /// Returns whether the chromosome changed.
    pub fn mutate<R: Rng + ?Sized>(&mut self, rate: f64, rng: &mut R) -> bool {
        let changed = operators::mutate(&mut self.chromosome, rate, rng);
        if changed {
            self.evaluate();
        }
        changed
    }

    fn evaluate(&mut self) {
        let mut phenotype = None;
        self.fitness = self
            .fitness_fn
            .fitness(&self.chromosome, &mut |p: F::Phenotype| phenotype = Some(p));
        self.phenotype = phenotype;
    }
}

impl<F: FitnessFunction> Clone for Individual<F> {
    fn clone(&self) -> Self {
        Self {
            chromosome: self.chromosome.clone(),
            fitness_fn: Arc::clone(&self.fitness_fn),
            fitness: self.fitness,
            phenotype: self.phenotype.clone(),
        }
    }
}

impl<F: FitnessFunction> fmt::Debug for Individual<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Individual")
            .field("fitness", &self.fitness)
            .field("phenotype", &self.phenotype)
            .field("chromosome", &self.chromosome)
            .finish()
    }
}
