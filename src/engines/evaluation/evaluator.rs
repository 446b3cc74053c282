use crate::{
    error::EvalError,
    functions::{registry::FunctionTable, traits::Primitive},
    types::{Expression, Value, MAX_NESTING_DEPTH},
};
use std::collections::HashMap;
use std::sync::Arc;

/// Runtime lookup for names that are not registered functions
pub trait VariableResolver {
    fn is_variable(&self, name: &str) -> bool;
    fn value_of(&self, name: &str) -> Result<Value, EvalError>;
}

impl VariableResolver for HashMap<String, Value> {
    fn is_variable(&self, name: &str) -> bool {
        self.contains_key(name)
    }

    fn value_of(&self, name: &str) -> Result<Value, EvalError> {
        self.get(name)
            .cloned()
            .ok_or_else(|| EvalError::Unresolvable(name.to_string()))
    }
}

/// Resolved head of a call site
enum Head<'a> {
    Function(&'a Arc<dyn Primitive>),
    Unresolved(&'a str),
}

/// Prefix-notation evaluator: `[name, arg1, ..., argN]`.
///
/// Names found in the function table are invoked with their resolved arguments.
/// Anything else is a literal, unless a [`VariableResolver`] claims it.
/// Evaluation only borrows the expression; it is never rewritten.
pub struct Evaluator {
    functions: FunctionTable,
    max_depth: usize,
}

impl Evaluator {
    pub fn new(functions: FunctionTable) -> Self {
        Self {
            functions,
            max_depth: MAX_NESTING_DEPTH,
        }
    }

    /// Limit call nesting; clamped to [`MAX_NESTING_DEPTH`]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.min(MAX_NESTING_DEPTH);
        self
    }

    pub fn functions(&self) -> &FunctionTable {
        &self.functions
    }

    pub fn evaluate(&self, expr: &Expression) -> Result<Value, EvalError> {
        self.eval_node(expr, None)
    }

    pub fn evaluate_with(
        &self,
        expr: &Expression,
        resolver: &dyn VariableResolver,
    ) -> Result<Value, EvalError> {
        self.eval_node(expr, Some(resolver))
    }

    fn eval_node(
        &self,
        expr: &Expression,
        resolver: Option<&dyn VariableResolver>,
    ) -> Result<Value, EvalError> {
        match expr {
            Expression::List(items) => self.eval_call(items, resolver, 0),
            Expression::Atom(_) => self.eval_call(std::slice::from_ref(expr), resolver, 0),
        }
    }

    fn eval_call(
        &self,
        items: &[Expression],
        resolver: Option<&dyn VariableResolver>,
        depth: usize,
    ) -> Result<Value, EvalError> {
        if depth >= self.max_depth {
            return Err(EvalError::DepthExceeded { limit: self.max_depth });
        }
        let (head, rest) = items.split_first().ok_or(EvalError::EmptyExpression)?;

        let head = match head {
            Expression::Atom(Value::Symbol(name)) => match self.functions.get(name) {
                Some(func) => Head::Function(func),
                None => Head::Unresolved(name),
            },
            // Arity-0 literal shortcut
            Expression::Atom(literal) => return Ok(literal.clone()),
            Expression::List(_) => {
                return Err(EvalError::Unresolvable(format!("non-invocable head {}", head)))
            }
        };

        let args = rest
            .iter()
            .map(|arg| self.resolve_arg(arg, resolver, depth))
            .collect::<Result<Vec<_>, _>>()?;

        match head {
            Head::Function(func) => self.invoke(func.as_ref(), &args),
            Head::Unresolved(name) => match resolver {
                Some(r) if r.is_variable(name) => r.value_of(name),
                _ => {
                    log::warn!("Cannot resolve call to {} with {} args", name, args.len());
                    Err(EvalError::Unresolvable(name.to_string()))
                }
            },
        }
    }

    fn resolve_arg(
        &self,
        arg: &Expression,
        resolver: Option<&dyn VariableResolver>,
        depth: usize,
    ) -> Result<Value, EvalError> {
        match arg {
            Expression::List(items) => self.eval_call(items, resolver, depth + 1),
            Expression::Atom(Value::Symbol(name)) => {
                if let Some(func) = self.functions.get(name).filter(|f| f.arity() == Some(0)) {
                    return self.invoke(func.as_ref(), &[]);
                }
                match resolver {
                    Some(r) if r.is_variable(name) => r.value_of(name),
                    _ => Ok(Value::Symbol(name.clone())),
                }
            }
            Expression::Atom(literal) => Ok(literal.clone()),
        }
    }

    fn invoke(&self, func: &dyn Primitive, args: &[Value]) -> Result<Value, EvalError> {
        if let Some(expected) = func.arity() {
            if expected != args.len() {
                return Err(EvalError::Arity {
                    function: func.alias().to_string(),
                    expected,
                    actual: args.len(),
                });
            }
        }
        func.execute(args)
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(FunctionTable::with_arithmetic())
    }
}
