use crate::engines::generation::genome::MAX_GENE;
use crate::error::{GaCoreError, Result};
use crate::types::{Expression, Value};
use rand::Rng;
use std::collections::HashMap;

/// Capabilities the grammar builder needs from a set of production rules
pub trait SymbolTable {
    /// Root non-terminal every guided build starts from
    fn start_expression(&self) -> Expression;

    /// Whether `symbol` names a production that can be expanded
    fn is_non_terminal(&self, symbol: &Expression) -> bool;

    /// Expand a non-terminal, letting `selector` pick the production
    fn expand(&self, non_terminal: &Expression, selector: u32) -> Result<Expression>;

    /// Expand a non-terminal without guidance.
    ///
    /// Defaults to a uniformly random selector; rules that make their own
    /// choice override this.
    fn expand_unguided<R: Rng + ?Sized>(
        &self,
        non_terminal: &Expression,
        rng: &mut R,
    ) -> Result<Expression> {
        let selector = rng.gen_range(0..=MAX_GENE);
        self.expand(non_terminal, selector)
    }
}

/// Data-driven symbol table: named rules with ordered alternatives.
///
/// A rule with `n` alternatives expands to alternative `selector % n`.
/// Inside a production, any symbol atom naming a rule is a non-terminal;
/// everything else is a terminal.
#[derive(Debug, Clone)]
pub struct Grammar {
    start: String,
    rules: HashMap<String, Vec<Expression>>,
}

impl Grammar {
    pub fn new(start: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            rules: HashMap::new(),
        }
    }

    /// Add (or replace) a rule
    pub fn rule(mut self, name: impl Into<String>, alternatives: Vec<Expression>) -> Self {
        self.rules.insert(name.into(), alternatives);
        self
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn alternatives(&self, name: &str) -> Option<&[Expression]> {
        self.rules.get(name).map(Vec::as_slice)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.rules.contains_key(&self.start) {
            return Err(GaCoreError::UnknownNonTerminal(self.start.clone()));
        }
        if let Some((name, _)) = self.rules.iter().find(|(_, alts)| alts.is_empty()) {
            return Err(GaCoreError::Configuration(format!(
                "Rule {} has no alternatives",
                name
            )));
        }
        Ok(())
    }

    fn rule_name<'e>(&self, symbol: &'e Expression) -> Option<&'e str> {
        match symbol {
            Expression::Atom(Value::Symbol(name)) if self.rules.contains_key(name) => Some(name),
            _ => None,
        }
    }
}

impl SymbolTable for Grammar {
    fn start_expression(&self) -> Expression {
        Expression::symbol(self.start.clone())
    }

    fn is_non_terminal(&self, symbol: &Expression) -> bool {
        self.rule_name(symbol).is_some()
    }

    fn expand(&self, non_terminal: &Expression, selector: u32) -> Result<Expression> {
        let name = self
            .rule_name(non_terminal)
            .ok_or_else(|| GaCoreError::UnknownNonTerminal(non_terminal.to_string()))?;
        let alternatives = &self.rules[name];
        if alternatives.is_empty() {
            return Err(GaCoreError::Configuration(format!(
                "Rule {} has no alternatives",
                name
            )));
        }
        Ok(alternatives[selector as usize % alternatives.len()].clone())
    }
}
