use crate::config::GrammarConfig;
use crate::engines::generation::{gene_consumer::GeneConsumer, symbols::SymbolTable};
use crate::error::{GaCoreError, Result};
use crate::types::{Expression, Value, MAX_NESTING_DEPTH};
use rand::Rng;

pub const DEFAULT_MAX_DEPTH: usize = 256;
pub const DEFAULT_MAX_EXPANSIONS: usize = 65_536;

#[derive(Default)]
struct WalkState {
    expansions: usize,
}

/// Expands a grammar into a concrete expression.
///
/// Both modes walk the tree pre-order, depth-first, left to right. Every
/// non-terminal met on the way is replaced by its production, which is then
/// walked in turn.
pub struct GrammarBuilder<'a, S: SymbolTable> {
    symbols: &'a S,
    max_depth: usize,
    max_expansions: usize,
}

impl<'a, S: SymbolTable> GrammarBuilder<'a, S> {
    pub fn new(symbols: &'a S) -> Self {
        Self::with_limits(symbols, DEFAULT_MAX_DEPTH, DEFAULT_MAX_EXPANSIONS)
    }

    /// `max_depth` is clamped to [`MAX_NESTING_DEPTH`]
    pub fn with_limits(symbols: &'a S, max_depth: usize, max_expansions: usize) -> Self {
        if max_depth > MAX_NESTING_DEPTH {
            log::debug!(
                "Grammar depth {} clamped to {}",
                max_depth,
                MAX_NESTING_DEPTH
            );
        }
        Self {
            symbols,
            max_depth: max_depth.min(MAX_NESTING_DEPTH),
            max_expansions,
        }
    }

    pub fn from_config(symbols: &'a S, config: &GrammarConfig) -> Self {
        Self::with_limits(symbols, config.max_depth, config.max_expansions)
    }

    pub fn symbols(&self) -> &S {
        self.symbols
    }

    /// Build without guidance: each non-terminal decides its own production.
    ///
    /// Runaway recursion is an error here; only guided builds recover.
    pub fn build<R: Rng + ?Sized>(&self, start: Expression, rng: &mut R) -> Result<Expression> {
        let mut produce = |nt: &Expression| self.symbols.expand_unguided(nt, &mut *rng);
        self.walk(start, 0, &mut WalkState::default(), &mut produce)
            .map(Expression::into_list)
    }

    /// Build guided by `selectors`, one per non-terminal expansion.
    ///
    /// The cursor wraps to the first selector when it runs off the end, so the
    /// same selectors always produce the same expression. A build that recurses
    /// past the configured limits yields `[0]`.
    pub fn build_list(&self, selectors: &[u32]) -> Result<Expression> {
        let mut genes = GeneConsumer::new(selectors).ok_or(GaCoreError::EmptySelectors)?;
        let start = self.symbols.start_expression();
        let mut produce = |nt: &Expression| self.symbols.expand(nt, genes.consume());

        let built = self.walk(start, 0, &mut WalkState::default(), &mut produce);
        match built {
            Ok(expression) => {
                let expression = expression.into_list();
                log::trace!(
                    "Built {} nodes from {} selector reads (wrapped: {})",
                    expression.node_count(),
                    genes.consumed(),
                    genes.has_wrapped()
                );
                Ok(expression)
            }
            Err(GaCoreError::RecursionLimit { depth }) => {
                log::debug!(
                    "Runaway recursion at depth {} ({} selectors), substituting [0]",
                    depth,
                    selectors.len()
                );
                Ok(Expression::List(vec![Expression::Atom(Value::Integer(0))]))
            }
            Err(e) => Err(e),
        }
    }

    fn walk<F>(
        &self,
        node: Expression,
        depth: usize,
        state: &mut WalkState,
        produce: &mut F,
    ) -> Result<Expression>
    where
        F: FnMut(&Expression) -> Result<Expression>,
    {
        if self.symbols.is_non_terminal(&node) {
            return self.descend(&node, depth, state, produce);
        }

        match node {
            Expression::List(items) => {
                let mut built = Vec::with_capacity(items.len());
                for item in items {
                    built.push(self.walk(item, depth, state, produce)?);
                }
                Ok(Expression::List(built))
            }
            terminal => Ok(terminal),
        }
    }

    fn descend<F>(
        &self,
        non_terminal: &Expression,
        depth: usize,
        state: &mut WalkState,
        produce: &mut F,
    ) -> Result<Expression>
    where
        F: FnMut(&Expression) -> Result<Expression>,
    {
        if depth >= self.max_depth || state.expansions >= self.max_expansions {
            return Err(GaCoreError::RecursionLimit { depth });
        }
        state.expansions += 1;

        let production = produce(non_terminal)?;
        self.walk(production, depth + 1, state, produce)
    }
}
