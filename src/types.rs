use serde::{Deserialize, Serialize};
use std::fmt;

/// Deepest nesting the grammar builder and the evaluator will recurse into.
///
/// Both walk expressions recursively, so this keeps them inside a default
/// thread stack.
pub const MAX_NESTING_DEPTH: usize = 512;

/// Leaf value of an expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Integer(i64),
    Float(f64),
    Bool(bool),
    Symbol(String), // Operator names, variable names, opaque tokens
}

impl Value {
    pub fn symbol(name: impl Into<String>) -> Self {
        Value::Symbol(name.into())
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::Float(_))
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Value::Symbol(s) => Some(s),
            _ => None,
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(value as i64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Symbol(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Symbol(value)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Symbol(s) => write!(f, "{}", s),
        }
    }
}

/// Prefix-notation expression tree.
///
/// A list is a call site `[operator, arg1, ..., argN]`; an atom is a literal or token.
/// The serialized form is a plain JSON array, e.g. `["add", ["subtract", 10, 6], 4]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Expression {
    Atom(Value),
    List(Vec<Expression>),
}

impl Expression {
    pub fn atom(value: impl Into<Value>) -> Self {
        Expression::Atom(value.into())
    }

    pub fn symbol(name: impl Into<String>) -> Self {
        Expression::Atom(Value::Symbol(name.into()))
    }

    pub fn list(items: Vec<Expression>) -> Self {
        Expression::List(items)
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Expression::List(_))
    }

    pub fn as_atom(&self) -> Option<&Value> {
        match self {
            Expression::Atom(v) => Some(v),
            Expression::List(_) => None,
        }
    }

    /// Wrap a bare atom in a single-element list; lists are returned unchanged
    pub fn into_list(self) -> Self {
        if self.is_list() {
            self
        } else {
            Expression::List(vec![self])
        }
    }

    /// Number of nodes (atoms and lists) in the tree
    pub fn node_count(&self) -> usize {
        match self {
            Expression::Atom(_) => 1,
            Expression::List(items) => 1 + items.iter().map(Expression::node_count).sum::<usize>(),
        }
    }
}

impl From<Value> for Expression {
    fn from(value: Value) -> Self {
        Expression::Atom(value)
    }
}

macro_rules! atom_from {
    ($($t:ty),*) => {
        $(impl From<$t> for Expression {
            fn from(value: $t) -> Self {
                Expression::Atom(Value::from(value))
            }
        })*
    };
}

atom_from!(i64, i32, f64, bool, &str, String);

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Atom(v) => write!(f, "{}", v),
            Expression::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}

/// Build an [`Expression`] list from literals, e.g. `expr!["add", 2, 2]`.
/// Nested lists are written as nested `expr![...]` calls.
#[macro_export]
macro_rules! expr {
    ($($item:expr),* $(,)?) => {
        $crate::types::Expression::List(vec![$($crate::types::Expression::from($item)),*])
    };
}
