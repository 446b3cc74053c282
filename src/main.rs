use anyhow::{Context, Result};
use gacore::config::{AppConfig, ConfigManager};
use gacore::engines::evaluation::Evaluator;
use gacore::engines::generation::{EvolutionEngine, Grammar, LogProgressCallback, SemanticMapper};
use gacore::error::EvalError;
use gacore::expr;
use gacore::types::{Expression, Value};

const TARGET: f64 = 42.0;

/// Penalty for expressions that fail to evaluate or yield a non-number
const FAILED_FITNESS: f64 = -1.0e6;

fn arithmetic_grammar() -> Grammar {
    Grammar::new("exp")
        .rule(
            "exp",
            vec![
                expr!["op", "exp", "exp"],
                expr!["op", "var", "var"],
                Expression::symbol("var"),
            ],
        )
        .rule(
            "op",
            vec!["add".into(), "subtract".into(), "multiply".into(), "divide".into()],
        )
        .rule("var", (0..10i64).map(Expression::from).collect())
}

fn closeness(_: &Expression, outcome: &std::result::Result<Value, EvalError>) -> f64 {
    match outcome {
        Ok(value) => value
            .as_f64()
            .map_or(FAILED_FITNESS, |v| -(v - TARGET).abs()),
        Err(_) => FAILED_FITNESS,
    }
}

fn load_config() -> Result<AppConfig> {
    let manager = ConfigManager::new();
    if let Some(path) = std::env::args().nth(1) {
        manager
            .load_from_file(&path)
            .with_context(|| format!("Failed to load configuration from {}", path))?;
    }
    Ok(manager.get())
}

fn main() -> Result<()> {
    env_logger::init();

    let mut config = load_config()?;
    config.evolution.target_fitness.get_or_insert(0.0);

    let grammar = arithmetic_grammar();
    grammar.validate().context("Invalid grammar")?;

    let mapper = SemanticMapper::new(grammar, Evaluator::default(), closeness)
        .with_limits(config.grammar.clone())
        .with_failure_fitness(FAILED_FITNESS);

    log::info!(
        "Evolving {} individuals for up to {} generations towards {}",
        config.evolution.population_size,
        config.evolution.num_generations,
        TARGET
    );

    let mut engine = EvolutionEngine::new(config.evolution.clone(), mapper)?;
    let outcome = engine.run(LogProgressCallback).context("Evolution failed")?;

    match &outcome.best_phenotype {
        Some(expression) => log::info!(
            "Best after {} generations: {} (fitness {:.4}, target reached: {})",
            outcome.generations,
            expression,
            outcome.best_fitness,
            outcome.reached_target
        ),
        None => log::warn!("No individual could be decoded"),
    }
    engine.population().glance();

    Ok(())
}
