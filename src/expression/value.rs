//! Operand literal values.

use serde::{Deserialize, Serialize};

/// Literal value filling one operand slot of an operator expression.
///
/// The JSON form is the bare literal (no wrapper object), so persisted
/// documents read naturally: `"operands": ["error", 500]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OperandValue {
    Bool(bool),
    Number(f64),
    String(String),
    List(Vec<String>),
}

impl OperandValue {
    /// Whether this value is the default "nothing entered yet" shape for
    /// its own kind. Filled slots with real user input return false.
    pub fn is_default(&self) -> bool {
        match self {
            OperandValue::Bool(b) => !b,
            OperandValue::Number(n) => *n == 0.0,
            OperandValue::String(s) => s.is_empty(),
            OperandValue::List(items) => items.is_empty(),
        }
    }
}

impl From<&str> for OperandValue {
    fn from(value: &str) -> Self {
        OperandValue::String(value.to_string())
    }
}

impl From<f64> for OperandValue {
    fn from(value: f64) -> Self {
        OperandValue::Number(value)
    }
}

impl From<bool> for OperandValue {
    fn from(value: bool) -> Self {
        OperandValue::Bool(value)
    }
}
