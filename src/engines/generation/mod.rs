pub mod evolution_engine;
pub mod gene_consumer;
pub mod genome;
pub mod grammar;
pub mod individual;
pub mod operators;
pub mod population;
pub mod progress;
pub mod semantic_mapper;
pub mod symbols;

pub use evolution_engine::{EvolutionEngine, EvolutionOutcome, ProgressCallback};
pub use gene_consumer::GeneConsumer;
pub use genome::{Chromosome, MAX_GENE};
pub use grammar::GrammarBuilder;
pub use individual::{FitnessFunction, Individual};
pub use population::{CrossoverStrategy, Population, Stats};
pub use progress::{LogProgressCallback, NullProgressCallback};
pub use semantic_mapper::SemanticMapper;
pub use symbols::{Grammar, SymbolTable};
