use crate::error::EvalError;
use crate::functions::traits::Primitive;
use crate::types::Value;

/// Pull a pair of numeric operands out of the argument list
fn operands<'a>(name: &str, args: &'a [Value]) -> Result<(&'a Value, &'a Value), EvalError> {
    match args {
        [a, b] if a.is_number() && b.is_number() => Ok((a, b)),
        [a, b] => Err(EvalError::Type {
            function: name.to_string(),
            detail: format!("expected numbers, got {} and {}", a, b),
        }),
        _ => Err(EvalError::Arity {
            function: name.to_string(),
            expected: 2,
            actual: args.len(),
        }),
    }
}

fn float_pair(a: &Value, b: &Value) -> (f64, f64) {
    (a.as_f64().unwrap_or_default(), b.as_f64().unwrap_or_default())
}

fn finite(name: &str, x: f64) -> Result<Value, EvalError> {
    if x.is_finite() {
        Ok(Value::Float(x))
    } else {
        Err(EvalError::constraint(format!("{} produced a non-finite result", name)))
    }
}

// --- Add ---
pub struct Add;

impl Primitive for Add {
    fn alias(&self) -> &str { "add" }
    fn arity(&self) -> Option<usize> { Some(2) }
    fn execute(&self, args: &[Value]) -> Result<Value, EvalError> {
        match operands(self.alias(), args)? {
            (Value::Integer(a), Value::Integer(b)) => a
                .checked_add(*b)
                .map(Value::Integer)
                .ok_or_else(|| EvalError::constraint("add overflowed")),
            (a, b) => {
                let (a, b) = float_pair(a, b);
                finite(self.alias(), a + b)
            }
        }
    }
}

// --- Subtract ---
pub struct Subtract;

impl Primitive for Subtract {
    fn alias(&self) -> &str { "subtract" }
    fn arity(&self) -> Option<usize> { Some(2) }
    fn execute(&self, args: &[Value]) -> Result<Value, EvalError> {
        match operands(self.alias(), args)? {
            (Value::Integer(a), Value::Integer(b)) => a
                .checked_sub(*b)
                .map(Value::Integer)
                .ok_or_else(|| EvalError::constraint("subtract overflowed")),
            (a, b) => {
                let (a, b) = float_pair(a, b);
                finite(self.alias(), a - b)
            }
        }
    }
}

// --- Multiply ---
pub struct Multiply;

impl Primitive for Multiply {
    fn alias(&self) -> &str { "multiply" }
    fn arity(&self) -> Option<usize> { Some(2) }
    fn execute(&self, args: &[Value]) -> Result<Value, EvalError> {
        match operands(self.alias(), args)? {
            (Value::Integer(a), Value::Integer(b)) => a
                .checked_mul(*b)
                .map(Value::Integer)
                .ok_or_else(|| EvalError::constraint("multiply overflowed")),
            (a, b) => {
                let (a, b) = float_pair(a, b);
                finite(self.alias(), a * b)
            }
        }
    }
}

// --- Divide ---
/// Division by zero is an expression constraint, not a crash.
/// Integer division stays integral only when exact.
pub struct Divide;

impl Primitive for Divide {
    fn alias(&self) -> &str { "divide" }
    fn arity(&self) -> Option<usize> { Some(2) }
    fn execute(&self, args: &[Value]) -> Result<Value, EvalError> {
        let (a, b) = operands(self.alias(), args)?;
        if b.as_f64() == Some(0.0) {
            return Err(EvalError::constraint("division by zero"));
        }
        match (a, b) {
            (Value::Integer(a), Value::Integer(b)) if a.checked_rem(*b) == Some(0) => a
                .checked_div(*b)
                .map(Value::Integer)
                .ok_or_else(|| EvalError::constraint("divide overflowed")),
            (a, b) => {
                let (a, b) = float_pair(a, b);
                finite(self.alias(), a / b)
            }
        }
    }
}
