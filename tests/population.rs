use gacore::engines::generation::{CrossoverStrategy, FitnessFunction, Population};
use gacore::error::GaCoreError;

/// Rewards large genes; phenotype is the gene total
struct GeneSum;

impl FitnessFunction for GeneSum {
    type Phenotype = u64;

    fn fitness(&self, chromosome: &[u32], set_pheno: &mut dyn FnMut(u64)) -> f64 {
        let total: u64 = chromosome.iter().map(|&g| g as u64).sum();
        set_pheno(total);
        total as f64
    }
}

#[test]
fn test_population_size_is_invariant() {
    for pop_size in [4, 5, 17, 40] {
        let mut population = Population::new(pop_size, 12, GeneSum, Some(pop_size as u64)).unwrap();
        for _ in 0..15 {
            population.next_gen(0.9, 0.1).unwrap();
            assert_eq!(population.individuals().len(), pop_size);
        }
        assert_eq!(population.generation(), 15);
    }
}

#[test]
fn test_last_slot_preserves_previous_best() {
    let mut population = Population::new(20, 16, GeneSum, Some(3)).unwrap();
    for _ in 0..10 {
        let best = population.best_individual().chromosome().to_vec();
        population.next_gen(1.0, 0.5).unwrap();
        let last = population.individuals().last().unwrap();
        assert_eq!(last.chromosome(), best.as_slice());
    }
}

#[test]
fn test_new_generation_opens_and_closes_with_best() {
    let mut population = Population::new(10, 8, GeneSum, Some(13)).unwrap();
    for _ in 0..5 {
        let best = population.best_individual().chromosome().to_vec();
        population.next_gen(0.0, 0.0).unwrap();
        let individuals = population.individuals();
        assert_eq!(individuals[0].chromosome(), best.as_slice());
        assert_eq!(individuals[1].chromosome(), best.as_slice());
        assert_eq!(individuals[9].chromosome(), best.as_slice());
    }
}

#[test]
fn test_zero_mutation_zero_crossover_copies_genomes() {
    let mut population = Population::new(10, 8, GeneSum, Some(9)).unwrap();
    population.next_gen(0.0, 0.0).unwrap();
    let previous: Vec<&[u32]> = population
        .previous_individuals()
        .iter()
        .map(|i| i.chromosome())
        .collect();
    for individual in population.individuals() {
        assert!(previous.contains(&individual.chromosome()));
    }
}

#[test]
fn test_full_selection_preserves_order() {
    let mut population = Population::new(8, 4, GeneSum, Some(1)).unwrap();
    let expected: Vec<Vec<u32>> = population
        .individuals()
        .iter()
        .map(|i| i.chromosome().to_vec())
        .collect();
    let selected = population.select(8).unwrap();
    let actual: Vec<Vec<u32>> = selected.iter().map(|i| i.chromosome().to_vec()).collect();
    assert_eq!(actual, expected);
}

#[test]
fn test_oversized_selection_is_rejected() {
    let mut population = Population::new(8, 4, GeneSum, Some(1)).unwrap();
    assert!(matches!(
        population.select(9),
        Err(GaCoreError::Selection { requested: 9, available: 8 })
    ));
}

#[test]
fn test_custom_crossover_strategy() {
    let mut population = Population::new(6, 4, GeneSum, Some(2)).unwrap();
    population.set_crossover_strategy(CrossoverStrategy::custom(|a: &[u32], b: &[u32]| {
        (b.to_vec(), a.to_vec())
    }));
    population.next_gen(1.0, 0.0).unwrap();
    assert_eq!(population.individuals().len(), 6);

    population.set_crossover_strategy(CrossoverStrategy::custom(|a: &[u32], _: &[u32]| {
        (a[..1].to_vec(), a.to_vec())
    }));
    assert!(matches!(
        population.next_gen(1.0, 0.0),
        Err(GaCoreError::ChromosomeLength { expected: 4, actual: 1 })
    ));
}

#[test]
fn test_too_small_population() {
    assert!(matches!(
        Population::new(3, 4, GeneSum, None),
        Err(GaCoreError::Configuration(_))
    ));
}

#[test]
fn test_phenotype_is_recorded() {
    let population = Population::new(4, 3, GeneSum, Some(0)).unwrap();
    for individual in population.individuals() {
        let total: u64 = individual.chromosome().iter().map(|&g| g as u64).sum();
        assert_eq!(individual.phenotype(), Some(&total));
    }
}
