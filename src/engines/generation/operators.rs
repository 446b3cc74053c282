use crate::engines::generation::genome::{Chromosome, MAX_GENE};
use rand::Rng;

/// Binary tournament: sample two distinct positions, keep the fitter one.
///
/// Exact ties are broken uniformly at random. Returns the winner's index.
/// `fitness` must hold at least two entries.
pub fn binary_tournament<R: Rng + ?Sized>(fitness: &[f64], rng: &mut R) -> usize {
    let first = rng.gen_range(0..fitness.len());
    let mut second = rng.gen_range(0..fitness.len() - 1);
    if second >= first {
        second += 1;
    }

    if fitness[first] > fitness[second] {
        first
    } else if fitness[second] > fitness[first] {
        second
    } else if rng.gen_bool(0.5) {
        first
    } else {
        second
    }
}

/// Single-point crossover at a random point in `0..len`
pub fn single_point_crossover<R: Rng + ?Sized>(
    parent1: &[u32],
    parent2: &[u32],
    rng: &mut R,
) -> (Chromosome, Chromosome) {
    let len = parent1.len().min(parent2.len());
    if len == 0 {
        return (parent1.to_vec(), parent2.to_vec());
    }
    let point = rng.gen_range(0..len);
    crossover_at(parent1, parent2, point)
}

/// Swap chromosome tails from `point` onwards
pub fn crossover_at(parent1: &[u32], parent2: &[u32], point: usize) -> (Chromosome, Chromosome) {
    let mut child1 = parent1[..point].to_vec();
    child1.extend_from_slice(&parent2[point..]);

    let mut child2 = parent2[..point].to_vec();
    child2.extend_from_slice(&parent1[point..]);

    (child1, child2)
}

/// Replace each gene, with probability `rate`, by a fresh uniform gene.
///
/// Returns whether any gene actually changed value.
pub fn mutate<R: Rng + ?Sized>(chromosome: &mut [u32], rate: f64, rng: &mut R) -> bool {
    let mut changed = false;
    for gene in chromosome.iter_mut() {
        if rng.gen::<f64>() < rate {
            let fresh = rng.gen_range(0..=MAX_GENE);
            changed |= fresh != *gene;
            *gene = fresh;
        }
    }
    changed
}

/// Generate random chromosome
pub fn random_chromosome<R: Rng + ?Sized>(length: usize, rng: &mut R) -> Chromosome {
    (0..length).map(|_| rng.gen_range(0..=MAX_GENE)).collect()
}
