//! Operator definitions and the operator catalog.

use serde::{Deserialize, Serialize};

use crate::catalog::field::FieldType;
use crate::expression::value::OperandValue;

/// Declared type of an operator's operand slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OperandKind {
    Bool,
    Number,
    String,
    StringList,
}

impl OperandKind {
    /// The "nothing entered yet" value for a slot of this kind.
    pub fn default_value(&self) -> OperandValue {
        match self {
            OperandKind::Bool => OperandValue::Bool(false),
            OperandKind::Number => OperandValue::Number(0.0),
            OperandKind::String => OperandValue::String(String::new()),
            OperandKind::StringList => OperandValue::List(Vec::new()),
        }
    }
}

/// One operator the editor can offer: identifier, display label, the field
/// types it applies to, and the shape of its operand slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatorDefinition {
    pub value: String,
    pub label: String,
    pub supported_types: Vec<FieldType>,
    pub operand_kind: OperandKind,
    pub arity: usize,
}

impl OperatorDefinition {
    pub fn new(
        value: impl Into<String>,
        label: impl Into<String>,
        supported_types: Vec<FieldType>,
        operand_kind: OperandKind,
        arity: usize,
    ) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            supported_types,
            operand_kind,
            arity,
        }
    }

    /// Check if this operator applies to a field of the given type
    pub fn supports(&self, field_type: FieldType) -> bool {
        self.supported_types.contains(&field_type)
    }

    /// Default operand slots for this operator's declared arity.
    pub fn default_operands(&self) -> Vec<OperandValue> {
        (0..self.arity).map(|_| self.operand_kind.default_value()).collect()
    }
}

/// Ordered, read-only list of operators.
///
/// Catalog order is the tie-break everywhere an operator is auto-selected,
/// so the order operators are registered in is part of the contract.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OperatorCatalog {
    operators: Vec<OperatorDefinition>,
}

impl OperatorCatalog {
    pub fn new(operators: Vec<OperatorDefinition>) -> Self {
        Self { operators }
    }

    /// The stock Kusto-style comparison operator set.
    pub fn kusto_defaults() -> Self {
        use FieldType::{Boolean, DateTime, Number, String, TimeSpan};

        let equality = vec![String, Number, DateTime, Boolean];
        let ordered = vec![Number, DateTime, TimeSpan];
        let text = vec![String];

        Self::new(vec![
            OperatorDefinition::new("==", "equal to", equality.clone(), OperandKind::String, 1),
            OperatorDefinition::new("!=", "not equal to", equality, OperandKind::String, 1),
            OperatorDefinition::new("<", "less than", ordered.clone(), OperandKind::String, 1),
            OperatorDefinition::new(">", "greater than", ordered.clone(), OperandKind::String, 1),
            OperatorDefinition::new("<=", "less or equal to", ordered.clone(), OperandKind::String, 1),
            OperatorDefinition::new(">=", "greater or equal to", ordered, OperandKind::String, 1),
            OperatorDefinition::new("=~", "equal to (case-insensitive)", text.clone(), OperandKind::String, 1),
            OperatorDefinition::new("!~", "not equal to (case-insensitive)", text.clone(), OperandKind::String, 1),
            OperatorDefinition::new("contains", "contains", text.clone(), OperandKind::String, 1),
            OperatorDefinition::new("!contains", "does not contain", text.clone(), OperandKind::String, 1),
            OperatorDefinition::new("startswith", "starts with", text.clone(), OperandKind::String, 1),
            OperatorDefinition::new("endswith", "ends with", text, OperandKind::String, 1),
            OperatorDefinition::new(
                "in",
                "in (case-sensitive)",
                vec![String, Number],
                OperandKind::StringList,
                1,
            ),
            OperatorDefinition::new(
                "!in",
                "not in (case-sensitive)",
                vec![String, Number],
                OperandKind::StringList,
                1,
            ),
        ])
    }

    pub fn all(&self) -> &[OperatorDefinition] {
        &self.operators
    }

    /// Look up an operator by identifier.
    pub fn find(&self, value: &str) -> Option<&OperatorDefinition> {
        self.operators.iter().find(|op| op.value == value)
    }

    pub fn len(&self) -> usize {
        self.operators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }
}
