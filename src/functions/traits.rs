use crate::error::EvalError;
use crate::types::Value;

/// Function callable by name from an expression
pub trait Primitive: Send + Sync {
    /// Name used at the head of a call site
    fn alias(&self) -> &str;

    /// Number of arguments, `None` when variadic
    fn arity(&self) -> Option<usize>;

    /// Execute with already-resolved arguments
    fn execute(&self, args: &[Value]) -> Result<Value, EvalError>;
}

type PrimitiveFn = dyn Fn(&[Value]) -> Result<Value, EvalError> + Send + Sync;

/// Adapts a closure into a [`Primitive`]
pub struct FnPrimitive {
    alias: String,
    arity: Option<usize>,
    func: Box<PrimitiveFn>,
}

impl FnPrimitive {
    pub fn new<F>(alias: impl Into<String>, arity: Option<usize>, func: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, EvalError> + Send + Sync + 'static,
    {
        Self {
            alias: alias.into(),
            arity,
            func: Box::new(func),
        }
    }
}

impl Primitive for FnPrimitive {
    fn alias(&self) -> &str {
        &self.alias
    }

    fn arity(&self) -> Option<usize> {
        self.arity
    }

    fn execute(&self, args: &[Value]) -> Result<Value, EvalError> {
        (self.func)(args)
    }
}

impl std::fmt::Debug for FnPrimitive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnPrimitive")
            .field("alias", &self.alias)
            .field("arity", &self.arity)
            .finish()
    }
}
