use thiserror::Error;

#[derive(Error, Debug)]
pub enum GaCoreError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Cannot select {requested} from population of {available}")]
    Selection { requested: usize, available: usize },

    #[error("Chromosome length mismatch: expected {expected}, got {actual}")]
    ChromosomeLength { expected: usize, actual: usize },

    #[error("Selector sequence must contain at least one value")]
    EmptySelectors,

    #[error("Unknown non-terminal: {0}")]
    UnknownNonTerminal(String),

    #[error("Recursion limit reached at depth {depth}")]
    RecursionLimit { depth: usize },

    #[error("No expression on line {index} ({available} lines available)")]
    MissingExpression { index: usize, available: usize },

    #[error("Evaluation error: {0}")]
    Evaluation(#[from] EvalError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),
}

/// Failures raised while evaluating an expression.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    /// A registered function declared its argument combination invalid.
    #[error("Expression constraint violated: {0}")]
    ExpressionConstraint(String),

    #[error("Unresolvable call: {0}")]
    Unresolvable(String),

    #[error("Function {function} expects {expected} arguments, got {actual}")]
    Arity {
        function: String,
        expected: usize,
        actual: usize,
    },

    #[error("Type error in {function}: {detail}")]
    Type { function: String, detail: String },

    #[error("Expression nesting exceeds depth limit {limit}")]
    DepthExceeded { limit: usize },

    #[error("Cannot evaluate an empty expression")]
    EmptyExpression,
}

impl EvalError {
    pub fn constraint(detail: impl Into<String>) -> Self {
        EvalError::ExpressionConstraint(detail.into())
    }

    pub fn is_constraint(&self) -> bool {
        matches!(self, EvalError::ExpressionConstraint(_))
    }
}

pub type Result<T> = std::result::Result<T, GaCoreError>;
