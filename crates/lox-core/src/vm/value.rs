//! Runtime Value Representation
//!
//! Scalar values manipulated by the VM and stored in constant pools.
//! Values carry no heap data and are copied on push/pop.

use std::fmt;

use crate::memory::GrowableArray;

/// Runtime value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    /// Absence of a value
    Nil,

    /// Boolean value
    Bool(bool),

    /// Numeric value (IEEE 754)
    Number(f64),
}

impl Value {
    /// Numeric payload, if this is a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Kind name used in diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) if n.is_nan() => write!(f, "nan"),
            Value::Number(n) if n.is_infinite() => {
                write!(f, "{}", if *n > 0.0 { "inf" } else { "-inf" })
            }
            Value::Number(n) => write!(f, "{}", n),
        }
    }
}

/// Ordered, append-only sequence of values; a chunk's constant pool
#[derive(Debug, Clone, Default)]
pub struct ValueStore {
    values: GrowableArray<Value>,
}

impl ValueStore {
    pub fn new() -> Self {
        ValueStore {
            values: GrowableArray::new(),
        }
    }

    /// Append a value and return the index it was stored at
    pub fn append(&mut self, value: Value) -> usize {
        self.values.push(value)
    }

    /// Value at `index`, or `None` when `index >= count()`
    pub fn get(&self, index: usize) -> Option<Value> {
        self.values.get(index).copied()
    }

    pub fn count(&self) -> usize {
        self.values.count()
    }

    pub fn capacity(&self) -> usize {
        self.values.capacity()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Release storage; idempotent
    pub fn free(&mut self) {
        self.values.free();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_then_get() {
        let mut store = ValueStore::new();
        let idx = store.append(Value::Number(1.2));
        assert_eq!(idx, 0);
        assert_eq!(store.append(Value::Bool(true)), 1);
        assert_eq!(store.get(idx), Some(Value::Number(1.2)));
        assert_eq!(store.get(2), None);
    }

    #[test]
    fn display_numbers() {
        assert_eq!(Value::Number(3.0).to_string(), "3");
        assert_eq!(Value::Number(-0.5).to_string(), "-0.5");
        assert_eq!(Value::Number(f64::INFINITY).to_string(), "inf");
        assert_eq!(Value::Nil.to_string(), "nil");
        assert_eq!(Value::Bool(false).to_string(), "false");
    }

    #[test]
    fn free_is_idempotent() {
        let mut store = ValueStore::new();
        store.append(Value::Nil);
        store.free();
        store.free();
        assert_eq!(store.count(), 0);
        assert_eq!(store.capacity(), 0);
    }
}
