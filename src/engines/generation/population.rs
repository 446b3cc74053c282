use crate::config::EvolutionConfig;
use crate::engines::generation::{
    genome::Chromosome,
    individual::{FitnessFunction, Individual},
    operators::{binary_tournament, single_point_crossover},
};
use crate::error::{GaCoreError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use std::mem;
use std::sync::Arc;

pub const MIN_POPULATION_SIZE: usize = 4;

type CrossoverFn = dyn Fn(&[u32], &[u32]) -> (Chromosome, Chromosome);

/// How two parent chromosomes are recombined
#[derive(Default)]
pub enum CrossoverStrategy {
    #[default]
    SinglePoint,
    /// Caller-supplied recombination; children must keep the chromosome length
    Custom(Box<CrossoverFn>),
}

impl CrossoverStrategy {
    pub fn custom<C>(crossover: C) -> Self
    where
        C: Fn(&[u32], &[u32]) -> (Chromosome, Chromosome) + 'static,
    {
        CrossoverStrategy::Custom(Box::new(crossover))
    }
}

impl fmt::Debug for CrossoverStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrossoverStrategy::SinglePoint => write!(f, "SinglePoint"),
            CrossoverStrategy::Custom(_) => write!(f, "Custom"),
        }
    }
}

/// Summary of a generation, computed by a full scan on every request
#[derive(Debug)]
pub struct Stats<'a, F: FitnessFunction> {
    pub top_fitness: f64,
    pub avg_fitness: f64,
    pub leader: &'a Individual<F>,
}

/// Fixed-size population evolved by elitist binary-tournament selection,
/// crossover and per-gene mutation.
pub struct Population<F: FitnessFunction> {
    pop_size: usize,
    chrom_len: usize,
    fitness_fn: Arc<F>,
    generation: usize,
    individuals: Vec<Individual<F>>,
    previous_individuals: Vec<Individual<F>>,
    best_index: usize,
    crossover: CrossoverStrategy,
    rng: StdRng,
}

impl<F: FitnessFunction> Population<F> {
    pub fn new(pop_size: usize, chrom_len: usize, fitness_fn: F, seed: Option<u64>) -> Result<Self> {
        Self::with_chromosomes(pop_size, chrom_len, fitness_fn, seed, Vec::new())
    }

    pub fn from_config(config: &EvolutionConfig, fitness_fn: F) -> Result<Self> {
        Self::new(
            config.population_size,
            config.chromosome_length,
            fitness_fn,
            config.seed,
        )
    }

    /// Seed the first individuals with known chromosomes; the rest are random
    pub fn with_chromosomes(
        pop_size: usize,
        chrom_len: usize,
        fitness_fn: F,
        seed: Option<u64>,
        seeds: Vec<Chromosome>,
    ) -> Result<Self> {
        if pop_size < MIN_POPULATION_SIZE {
            return Err(GaCoreError::Configuration(format!(
                "Population size must be at least {}, got {}",
                MIN_POPULATION_SIZE, pop_size
            )));
        }
        if chrom_len == 0 {
            return Err(GaCoreError::Configuration(
                "Chromosome length must be at least 1".to_string(),
            ));
        }
        if seeds.len() > pop_size {
            return Err(GaCoreError::Configuration(format!(
                "{} seed chromosomes exceed population size {}",
                seeds.len(),
                pop_size
            )));
        }
        if let Some(bad) = seeds.iter().find(|c| c.len() != chrom_len) {
            return Err(GaCoreError::ChromosomeLength {
                expected: chrom_len,
                actual: bad.len(),
            });
        }

        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let fitness_fn = Arc::new(fitness_fn);

        let mut individuals: Vec<Individual<F>> = seeds
            .into_iter()
            .map(|c| Individual::from_chromosome(c, Arc::clone(&fitness_fn)))
            .collect();
        while individuals.len() < pop_size {
            individuals.push(Individual::new(chrom_len, Arc::clone(&fitness_fn), None, &mut rng));
        }

        let best_index = best_index(&individuals);
        Ok(Self {
            pop_size,
            chrom_len,
            fitness_fn,
            generation: 0,
            individuals,
            previous_individuals: Vec::new(),
            best_index,
            crossover: CrossoverStrategy::default(),
            rng,
        })
    }

    pub fn set_crossover_strategy(&mut self, crossover: CrossoverStrategy) {
        self.crossover = crossover;
    }

    pub fn pop_size(&self) -> usize {
        self.pop_size
    }

    pub fn chromosome_length(&self) -> usize {
        self.chrom_len
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn individuals(&self) -> &[Individual<F>] {
        &self.individuals
    }

    /// The generation replaced by the last `next_gen`, empty before the first one
    pub fn previous_individuals(&self) -> &[Individual<F>] {
        &self.previous_individuals
    }

    /// Fittest individual of the current generation (first one wins ties)
    pub fn best_individual(&self) -> &Individual<F> {
        &self.individuals[self.best_index]
    }

    pub fn fitness_fn(&self) -> &Arc<F> {
        &self.fitness_fn
    }

    /// Binary tournament selection of `amount` individuals from the current generation.
    ///
    /// Selecting the whole population returns it verbatim, in order.
    pub fn select(&mut self, amount: usize) -> Result<Vec<Individual<F>>> {
        let Population {
            ref individuals,
            ref mut rng,
            ..
        } = *self;

        if amount > individuals.len() {
            return Err(GaCoreError::Selection {
                requested: amount,
                available: individuals.len(),
            });
        }
        if amount == individuals.len() {
            return Ok(individuals.clone());
        }

        let fitness: Vec<f64> = individuals.iter().map(Individual::fitness).collect();
        Ok((0..amount)
            .map(|_| individuals[binary_tournament(&fitness, &mut *rng)].clone())
            .collect())
    }

    /// Perform `floor(len * rate)` crossover events on `generation` in place.
    ///
    /// Each event picks two positions independently (they may coincide) and
    /// replaces both with the children of their chromosomes.
    pub fn crossover(&mut self, rate: f64, generation: &mut [Individual<F>]) -> Result<()> {
        let size = generation.len();
        if size == 0 {
            return Ok(());
        }
        let events = (size as f64 * rate).floor() as usize;

        for _ in 0..events {
            let p1 = self.rng.gen_range(0..size);
            let p2 = self.rng.gen_range(0..size);

            let (child1, child2) = {
                let par1 = generation[p1].chromosome();
                let par2 = generation[p2].chromosome();
                match &self.crossover {
                    CrossoverStrategy::SinglePoint => {
                        single_point_crossover(par1, par2, &mut self.rng)
                    }
                    CrossoverStrategy::Custom(cross) => cross(par1, par2),
                }
            };
            for child in [&child1, &child2] {
                if child.len() != self.chrom_len {
                    return Err(GaCoreError::ChromosomeLength {
                        expected: self.chrom_len,
                        actual: child.len(),
                    });
                }
            }

            generation[p1] = Individual::from_chromosome(child1, Arc::clone(&self.fitness_fn));
            generation[p2] = Individual::from_chromosome(child2, Arc::clone(&self.fitness_fn));
        }
        Ok(())
    }

    /// Mutate every individual of `generation` with per-gene probability `rate`
    pub fn mutate(&mut self, rate: f64, generation: &mut [Individual<F>]) {
        for individual in generation.iter_mut() {
            individual.mutate(rate, &mut self.rng);
        }
    }

    /// Advance one generation.
    ///
    /// The new generation is two copies of the current best, `pop_size - 3`
    /// tournament winners, crossover and mutation over all of those, and finally
    /// one more untouched copy of the best.
    pub fn next_gen(&mut self, crossover_rate: f64, mutation_rate: f64) -> Result<()> {
        check_rate("Crossover", crossover_rate)?;
        check_rate("Mutation", mutation_rate)?;

        let elite = self.best_individual().clone();

        let mut next_gen = Vec::with_capacity(self.pop_size);
        next_gen.push(elite.clone());
        next_gen.push(elite.clone());
        next_gen.extend(self.select(self.pop_size - 3)?);

        self.crossover(crossover_rate, &mut next_gen)?;
        self.mutate(mutation_rate, &mut next_gen);

        // Protected from crossover and mutation
        next_gen.push(elite);

        self.previous_individuals = mem::replace(&mut self.individuals, next_gen);
        self.generation += 1;
        self.best_index = best_index(&self.individuals);

        log::debug!(
            "Generation {} installed, best fitness {:.4}",
            self.generation,
            self.best_individual().fitness()
        );
        Ok(())
    }

    pub fn stats(&self) -> Stats<'_, F> {
        let mut leader = &self.individuals[0];
        let mut total = 0.0;
        for individual in &self.individuals {
            if leader.fitness() < individual.fitness() {
                leader = individual;
            }
            total += individual.fitness();
        }
        Stats {
            top_fitness: leader.fitness(),
            avg_fitness: total / self.individuals.len() as f64,
            leader,
        }
    }

    /// Log a one-line summary of the current generation
    pub fn glance(&self) {
        let stats = self.stats();
        log::info!(
            "Generation: {}  Avg fitness: {:.4}  Top fitness: {:.4}",
            self.generation,
            stats.avg_fitness,
            stats.top_fitness
        );
    }

    /// Log the summary followed by every individual
    pub fn look(&self) {
        self.glance();
        for individual in &self.individuals {
            log::info!("{}", describe(individual));
        }
    }

    pub fn look_previous(&self) {
        for individual in &self.previous_individuals {
            log::info!("{}", describe(individual));
        }
    }
}

fn describe<F: FitnessFunction>(individual: &Individual<F>) -> String {
    let phenotype = format!("{:?}", individual.phenotype());
    let genes = &individual.chromosome()[..individual.chromosome().len().min(10)];
    format!(
        "Fitness: {:.4}  Phenotype: {}...  Chromosome: {:?}...",
        individual.fitness(),
        phenotype.chars().take(60).collect::<String>(),
        genes
    )
}

fn best_index<F: FitnessFunction>(individuals: &[Individual<F>]) -> usize {
    let mut best = 0;
    for (i, individual) in individuals.iter().enumerate() {
        if individual.fitness() > individuals[best].fitness() {
            best = i;
        }
    }
    best
}

fn check_rate(name: &str, rate: f64) -> Result<()> {
    if (0.0..=1.0).contains(&rate) {
        Ok(())
    } else {
        Err(GaCoreError::Configuration(format!(
            "{} rate must be between 0 and 1, got {}",
            name, rate
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct GeneSum;

    impl FitnessFunction for GeneSum {
        type Phenotype = u64;

        fn fitness(&self, chromosome: &[u32], set_pheno: &mut dyn FnMut(u64)) -> f64 {
            let sum: u64 = chromosome.iter().map(|&g| g as u64).sum();
            set_pheno(sum);
            sum as f64
        }
    }

    fn population(pop_size: usize, chrom_len: usize, seed: u64) -> Population<GeneSum> {
        Population::new(pop_size, chrom_len, GeneSum, Some(seed)).unwrap()
    }

    #[test]
    fn test_rejects_small_population() {
        assert!(matches!(
            Population::new(3, 8, GeneSum, Some(1)),
            Err(GaCoreError::Configuration(_))
        ));
        assert!(matches!(
            Population::new(10, 0, GeneSum, Some(1)),
            Err(GaCoreError::Configuration(_))
        ));
    }

    #[test]
    fn test_initial_population() {
        let pop = population(12, 20, 1);
        assert_eq!(pop.individuals().len(), 12);
        assert_eq!(pop.generation(), 0);
        assert!(pop.previous_individuals().is_empty());
        assert!(pop.individuals().iter().all(|i| i.chromosome().len() == 20));
        assert_eq!(pop.best_individual().fitness(), pop.stats().top_fitness);
    }

    #[test]
    fn test_select_over_request_fails() {
        let mut pop = population(6, 4, 2);
        assert!(matches!(
            pop.select(7),
            Err(GaCoreError::Selection { requested: 7, available: 6 })
        ));
    }

    #[test]
    fn test_select_whole_population_is_verbatim() {
        let mut pop = population(6, 4, 2);
        let selected = pop.select(6).unwrap();
        let expected: Vec<&[u32]> = pop.individuals().iter().map(|i| i.chromosome()).collect();
        let got: Vec<&[u32]> = selected.iter().map(|i| i.chromosome()).collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn test_select_never_returns_the_weakest() {
        let seeds = vec![vec![0, 0], vec![10, 10], vec![20, 20], vec![30, 30], vec![40, 40]];
        let mut pop = Population::with_chromosomes(5, 2, GeneSum, Some(3), seeds).unwrap();
        let selected = pop.select(4).unwrap();
        assert_eq!(selected.len(), 4);
        assert!(selected.iter().all(|i| i.chromosome() != [0, 0]));
    }

    #[test]
    fn test_crossover_event_count() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let mut pop = population(10, 4, 4);
        pop.set_crossover_strategy(CrossoverStrategy::custom(move |a, b| {
            counter.set(counter.get() + 1);
            (b.to_vec(), a.to_vec())
        }));

        let mut generation = pop.individuals().to_vec();
        pop.crossover(0.55, &mut generation).unwrap();
        assert_eq!(calls.get(), 5);

        calls.set(0);
        pop.crossover(0.0, &mut generation).unwrap();
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_custom_crossover_length_checked() {
        let mut pop = population(6, 4, 5);
        pop.set_crossover_strategy(CrossoverStrategy::custom(|a, b| (a[..2].to_vec(), b.to_vec())));
        let mut generation = pop.individuals().to_vec();
        assert!(matches!(
            pop.crossover(1.0, &mut generation),
            Err(GaCoreError::ChromosomeLength { expected: 4, actual: 2 })
        ));
    }

    #[test]
    fn test_population_size_is_constant() {
        for pop_size in [4, 5, 9, 20] {
            let mut pop = population(pop_size, 10, pop_size as u64);
            for _ in 0..15 {
                pop.next_gen(0.8, 0.1).unwrap();
                assert_eq!(pop.individuals().len(), pop_size);
                assert_eq!(pop.previous_individuals().len(), pop_size);
            }
            assert_eq!(pop.generation(), 15);
        }
    }

    #[test]
    fn test_last_slot_is_previous_best() {
        let mut pop = population(10, 16, 6);
        for _ in 0..10 {
            let best = pop.best_individual().chromosome().to_vec();
            pop.next_gen(1.0, 0.5).unwrap();
            let last = pop.individuals().last().unwrap();
            assert_eq!(last.chromosome(), best.as_slice());
        }
    }

    #[test]
    fn test_best_fitness_never_decreases() {
        let mut pop = population(10, 16, 7);
        let mut previous = pop.stats().top_fitness;
        for _ in 0..20 {
            pop.next_gen(0.9, 0.2).unwrap();
            let top = pop.stats().top_fitness;
            assert!(top >= previous);
            previous = top;
        }
    }

    #[test]
    fn test_zero_rates_keep_genomes() {
        let mut pop = population(10, 16, 8);
        pop.next_gen(0.0, 0.0).unwrap();
        for individual in pop.individuals() {
            assert!(pop
                .previous_individuals()
                .iter()
                .any(|p| p.chromosome() == individual.chromosome()));
        }
    }

    #[test]
    fn test_invalid_rates_rejected() {
        let mut pop = population(6, 4, 9);
        assert!(pop.next_gen(1.5, 0.1).is_err());
        assert!(pop.next_gen(0.5, -0.1).is_err());
        assert_eq!(pop.generation(), 0);
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let mut a = population(8, 12, 42);
        let mut b = population(8, 12, 42);
        for _ in 0..5 {
            a.next_gen(0.7, 0.05).unwrap();
            b.next_gen(0.7, 0.05).unwrap();
        }
        let genomes = |p: &Population<GeneSum>| -> Vec<Vec<u32>> {
            p.individuals().iter().map(|i| i.chromosome().to_vec()).collect()
        };
        assert_eq!(genomes(&a), genomes(&b));
    }

    #[test]
    fn test_stats_average() {
        let seeds = vec![vec![1], vec![2], vec![3], vec![6]];
        let pop = Population::with_chromosomes(4, 1, GeneSum, Some(1), seeds).unwrap();
        let stats = pop.stats();
        assert_eq!(stats.top_fitness, 6.0);
        assert_eq!(stats.avg_fitness, 3.0);
        assert_eq!(stats.leader.chromosome(), &[6]);
        assert_eq!(stats.leader.phenotype(), Some(&6));
    }

    #[test]
    fn test_seed_chromosomes_validated() {
        assert!(matches!(
            Population::with_chromosomes(4, 2, GeneSum, None, vec![vec![1, 2, 3]]),
            Err(GaCoreError::ChromosomeLength { expected: 2, actual: 3 })
        ));
    }

    #[test]
    fn test_reporting_after_next_gen() {
        let mut pop = population(6, 4, 12);
        assert!(pop.previous_individuals().is_empty());
        pop.next_gen(0.5, 0.1).unwrap();
        assert_eq!(pop.previous_individuals().len(), 6);
        pop.glance();
        pop.look();
        pop.look_previous();
    }
}
