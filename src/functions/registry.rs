use super::{
    primitives::{Add, Divide, Multiply, Subtract},
    traits::{FnPrimitive, Primitive},
};
use crate::error::EvalError;
use crate::types::Value;
use std::{collections::HashMap, sync::Arc};

/// Name to function mapping consulted by the evaluator
#[derive(Clone, Default)]
pub struct FunctionTable {
    functions: HashMap<String, Arc<dyn Primitive>>,
}

impl FunctionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table preloaded with `add`, `subtract`, `multiply` and `divide`
    pub fn with_arithmetic() -> Self {
        let mut table = Self::new();
        table.register_arithmetic();
        table
    }

    pub fn register(&mut self, primitive: Arc<dyn Primitive>) -> &mut Self {
        self.functions.insert(primitive.alias().to_string(), primitive);
        self
    }

    pub fn register_fn<F>(&mut self, alias: &str, arity: Option<usize>, func: F) -> &mut Self
    where
        F: Fn(&[Value]) -> Result<Value, EvalError> + Send + Sync + 'static,
    {
        self.register(Arc::new(FnPrimitive::new(alias, arity, func)))
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Primitive>> {
        self.functions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(String::as_str)
    }

    fn register_arithmetic(&mut self) {
        let primitives: Vec<Arc<dyn Primitive>> = vec![
            Arc::new(Add),
            Arc::new(Subtract),
            Arc::new(Multiply),
            Arc::new(Divide),
        ];
        for primitive in primitives {
            self.register(primitive);
        }
    }
}

impl std::fmt::Debug for FunctionTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&str> = self.names().collect();
        names.sort_unstable();
        f.debug_struct("FunctionTable").field("functions", &names).finish()
    }
}
