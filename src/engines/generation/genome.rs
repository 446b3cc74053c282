/// Chromosome representation for grammatical evolution
///
/// A chromosome is a sequence of integers that deterministically maps to an expression.
/// Each gene is consumed in pre-order by the `GrammarBuilder` as the selector for the
/// next non-terminal expansion:
/// - Which alternative production a rule expands to
/// - Which operator or terminal fills a slot
///
/// # Why evolve chromosomes instead of expressions?
///
/// Genetic operators work best on simple, linear structures:
/// - **Crossover**: Swapping chromosome tails is trivial (slice copies)
/// - **Mutation**: Replacing individual genes is straightforward
/// - **No invalid states**: Any chromosome decodes to some expression
///
/// # Example
///
/// ```
/// use gacore::engines::generation::Chromosome;
///
/// let chromosome: Chromosome = vec![0, 2, 2];
/// // Against an `[op, var, var] | var` grammar this decodes to [add, 2, 0]:
/// // the fourth read wraps back to the first gene.
/// assert_eq!(chromosome.len(), 3);
/// ```
pub type Chromosome = Vec<u32>;

/// Largest value a gene may take; genes are drawn uniformly from `0..=MAX_GENE`
pub const MAX_GENE: u32 = 255;
