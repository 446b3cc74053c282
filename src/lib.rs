//! Grammatical evolution: integer chromosomes select productions of a
//! grammar, the resulting prefix expressions are evaluated, and a genetic
//! algorithm breeds the chromosomes towards higher fitness.

pub mod config;
pub mod data;
pub mod engines;
pub mod error;
pub mod functions;
pub mod types;

pub use engines::evaluation::Evaluator;
pub use engines::generation::{
    EvolutionEngine, FitnessFunction, Grammar, GrammarBuilder, Individual, Population,
    SemanticMapper, SymbolTable,
};
pub use error::{EvalError, GaCoreError, Result};
pub use functions::FunctionTable;
pub use types::{Expression, Value};
