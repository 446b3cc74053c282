use crate::config::GrammarConfig;
use crate::engines::evaluation::Evaluator;
use crate::engines::generation::{
    grammar::GrammarBuilder, individual::FitnessFunction, symbols::SymbolTable,
};
use crate::error::{EvalError, Result};
use crate::types::{Expression, Value};
use std::collections::HashMap;

/// Turns a grammar, an evaluator and a scoring rule into a fitness function.
///
/// A chromosome is decoded with [`GrammarBuilder::build_list`], the resulting
/// expression is evaluated, and the scoring closure receives both the
/// expression and the outcome of evaluation. Evaluation failures are passed to
/// the closure rather than raised, so it decides how heavily to penalise them.
/// The decoded expression becomes the individual's phenotype.
pub struct SemanticMapper<S, Sc> {
    symbols: S,
    evaluator: Evaluator,
    limits: GrammarConfig,
    variables: HashMap<String, Value>,
    score: Sc,
    failure_fitness: f64,
}

impl<S, Sc> SemanticMapper<S, Sc>
where
    S: SymbolTable,
    Sc: Fn(&Expression, &std::result::Result<Value, EvalError>) -> f64,
{
    pub fn new(symbols: S, evaluator: Evaluator, score: Sc) -> Self {
        Self {
            symbols,
            evaluator,
            limits: GrammarConfig::default(),
            variables: HashMap::new(),
            score,
            failure_fitness: f64::NEG_INFINITY,
        }
    }

    pub fn with_limits(mut self, limits: GrammarConfig) -> Self {
        self.limits = limits;
        self
    }

    /// Bind names the evaluator should treat as variables
    pub fn with_variables(mut self, variables: HashMap<String, Value>) -> Self {
        self.variables = variables;
        self
    }

    /// Fitness given to chromosomes the grammar cannot decode at all
    pub fn with_failure_fitness(mut self, fitness: f64) -> Self {
        self.failure_fitness = fitness;
        self
    }

    pub fn symbols(&self) -> &S {
        &self.symbols
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    pub fn decode(&self, chromosome: &[u32]) -> Result<Expression> {
        GrammarBuilder::from_config(&self.symbols, &self.limits).build_list(chromosome)
    }

    pub fn evaluate(&self, expression: &Expression) -> std::result::Result<Value, EvalError> {
        if self.variables.is_empty() {
            self.evaluator.evaluate(expression)
        } else {
            self.evaluator.evaluate_with(expression, &self.variables)
        }
    }
}

impl<S, Sc> FitnessFunction for SemanticMapper<S, Sc>
where
    S: SymbolTable,
    Sc: Fn(&Expression, &std::result::Result<Value, EvalError>) -> f64,
{
    type Phenotype = Expression;

    fn fitness(&self, chromosome: &[u32], set_pheno: &mut dyn FnMut(Expression)) -> f64 {
        let expression = match self.decode(chromosome) {
            Ok(expression) => expression,
            Err(e) => {
                log::warn!("Failed to decode chromosome: {}", e);
                return self.failure_fitness;
            }
        };

        let outcome = self.evaluate(&expression);
        if let Err(e) = &outcome {
            log::trace!("Evaluation of {} failed: {}", expression, e);
        }

        let fitness = (self.score)(&expression, &outcome);
        set_pheno(expression);
        fitness
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::generation::symbols::Grammar;
    use crate::expr;

    fn arithmetic() -> Grammar {
        Grammar::new("exp")
            .rule("exp", vec![expr!["op", "var", "var"], Expression::symbol("var")])
            .rule("op", vec!["add".into(), "subtract".into(), "divide".into()])
            .rule("var", (0..10i64).map(Expression::from).collect())
    }

    fn closeness(target: f64) -> impl Fn(&Expression, &std::result::Result<Value, EvalError>) -> f64 {
        move |_, outcome| match outcome {
            Ok(value) => value.as_f64().map_or(-1000.0, |v| -(v - target).abs()),
            Err(_) => -1000.0,
        }
    }

    fn run(mapper: &impl FitnessFunction<Phenotype = Expression>, genes: &[u32]) -> (f64, Option<Expression>) {
        let mut pheno = None;
        let fitness = mapper.fitness(genes, &mut |p| pheno = Some(p));
        (fitness, pheno)
    }

    #[test]
    fn test_scores_evaluated_expression() {
        let mapper = SemanticMapper::new(arithmetic(), Evaluator::default(), closeness(10.0));
        let (fitness, pheno) = run(&mapper, &[0, 0, 2, 6]);
        assert_eq!(fitness, -2.0);
        assert_eq!(pheno, Some(expr!["add", 2, 6]));
    }

    #[test]
    fn test_constraint_failure_reaches_scorer() {
        let mapper = SemanticMapper::new(
            arithmetic(),
            Evaluator::default(),
            |_: &Expression, outcome: &std::result::Result<Value, EvalError>| match outcome {
                Err(e) if e.is_constraint() => -500.0,
                _ => 0.0,
            },
        );
        let (fitness, pheno) = run(&mapper, &[0, 2, 4, 0]);
        assert_eq!(fitness, -500.0);
        assert_eq!(pheno, Some(expr!["divide", 4, 0]));
    }

    #[test]
    fn test_variables_are_resolved() {
        let grammar = Grammar::new("exp").rule("exp", vec![expr!["multiply", "x", 3]]);
        let variables = HashMap::from([("x".to_string(), Value::Integer(4))]);
        let mapper = SemanticMapper::new(grammar, Evaluator::default(), closeness(12.0))
            .with_variables(variables);
        assert_eq!(run(&mapper, &[0]).0, 0.0);
    }

    #[test]
    fn test_undecodable_chromosome_gets_failure_fitness() {
        let mapper = SemanticMapper::new(arithmetic(), Evaluator::default(), closeness(1.0))
            .with_failure_fitness(-1.0e6);
        let (fitness, pheno) = run(&mapper, &[]);
        assert_eq!(fitness, -1.0e6);
        assert!(pheno.is_none());
    }

    #[test]
    fn test_limits_apply_to_decoding() {
        let grammar = Grammar::new("exp")
            .rule("exp", vec![expr!["add", "exp", 1], Expression::atom(1)]);
        let mapper = SemanticMapper::new(grammar, Evaluator::default(), closeness(0.0))
            .with_limits(GrammarConfig { max_depth: 3, max_expansions: 100 });
        assert_eq!(mapper.decode(&[0]).unwrap(), expr![0]);
        assert_eq!(mapper.decode(&[0, 0, 1]).unwrap(), expr!["add", expr!["add", 1, 1], 1]);
    }
}
