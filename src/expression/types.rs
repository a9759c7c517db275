//! Expression node definitions.

use serde::{Deserialize, Serialize};

use crate::catalog::field::{FieldDefinition, FieldType};
use crate::catalog::operator::OperatorDefinition;
use crate::expression::value::OperandValue;

/// Discriminant identifying an expression node's kind at runtime.
///
/// Exactly one concrete node shape matches each kind; consumers match on
/// the [`Expression`] union exhaustively rather than probing shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExpressionKind {
    Property,
    Operator,
    FieldAndOperator,
    And,
    Or,
    Reduce,
    GroupBy,
    Columns,
}

impl ExpressionKind {
    /// Get the display string for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpressionKind::Property => "property",
            ExpressionKind::Operator => "operator",
            ExpressionKind::FieldAndOperator => "fieldAndOperator",
            ExpressionKind::And => "and",
            ExpressionKind::Or => "or",
            ExpressionKind::Reduce => "reduce",
            ExpressionKind::GroupBy => "groupBy",
            ExpressionKind::Columns => "columns",
        }
    }
}

/// Reference to a catalog field together with its declared type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldExpression {
    #[serde(rename = "fieldType")]
    pub field_type: FieldType,
    #[serde(rename = "value")]
    pub name: String,
}

impl FieldExpression {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            field_type,
            name: name.into(),
        }
    }

    /// A freshly appended predicate starts with no field chosen.
    pub fn empty() -> Self {
        Self {
            field_type: FieldType::String,
            name: String::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }
}

impl Default for FieldExpression {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<&FieldDefinition> for FieldExpression {
    fn from(def: &FieldDefinition) -> Self {
        Self {
            field_type: def.field_type,
            name: def.name.clone(),
        }
    }
}

/// A chosen operator plus its operand slots.
///
/// `operator: None` is the "no operator currently applicable" shape the
/// resolver hands back when a field has zero compatible operators; the UI
/// renders it as an unset picker, never as an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OperatorExpression {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<OperatorDefinition>,
    #[serde(default)]
    pub operands: Vec<OperandValue>,
}

impl OperatorExpression {
    pub fn unset() -> Self {
        Self::default()
    }

    pub fn new(operator: OperatorDefinition, operands: Vec<OperandValue>) -> Self {
        Self {
            operator: Some(operator),
            operands,
        }
    }

    /// Identifier of the selected operator, if any.
    pub fn operator_value(&self) -> Option<&str> {
        self.operator.as_ref().map(|op| op.value.as_str())
    }

    /// An operator expression is complete once an operator is chosen and
    /// every operand slot its arity requires exists.
    pub fn is_complete(&self) -> bool {
        match &self.operator {
            Some(op) => self.operands.len() == op.arity,
            None => false,
        }
    }
}

/// Field paired with an operator: one filter predicate.
///
/// Invariant: `operator` is always drawn from the operators compatible with
/// `field.field_type`. Field edits go through the resolver so a stale
/// selection is replaced, never read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldAndOperatorExpression {
    pub field: FieldExpression,
    pub operator: OperatorExpression,
}

impl FieldAndOperatorExpression {
    pub fn new(field: FieldExpression, operator: OperatorExpression) -> Self {
        Self { field, operator }
    }
}

/// Body of a nested boolean group inside an expression tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupExpression {
    pub expressions: Vec<Expression>,
}

/// Aggregate one field with a named reduce function (`sum`, `avg`, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReduceExpression {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<FieldExpression>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<OperandValue>,
}

/// Group rows by a field, optionally bucketed by a time interval.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupByExpression {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<FieldExpression>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<FieldExpression>,
}

/// Project exactly the named columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnsExpression {
    pub columns: Vec<String>,
}

/// Connective of a boolean group, independent of its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Connective {
    And,
    Or,
}

impl Connective {
    pub fn toggled(&self) -> Self {
        match self {
            Connective::And => Connective::Or,
            Connective::Or => Connective::And,
        }
    }
}

/// Top-level container holding an ordered sequence of child expressions.
///
/// The where/reduce/group-by sections of a query are each one of these.
/// Order is preserved (it affects generated query text); an empty group is
/// a valid terminal state meaning "no filter" / "no grouping". The edit
/// operations live in [`crate::builder`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BooleanGroup {
    #[serde(rename = "type")]
    pub connective: Connective,
    pub expressions: Vec<Expression>,
}

impl BooleanGroup {
    pub fn new(connective: Connective) -> Self {
        Self {
            connective,
            expressions: Vec::new(),
        }
    }

    pub fn and() -> Self {
        Self::new(Connective::And)
    }

    pub fn or() -> Self {
        Self::new(Connective::Or)
    }

    pub fn len(&self) -> usize {
        self.expressions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expressions.is_empty()
    }
}

impl Default for BooleanGroup {
    fn default() -> Self {
        Self::and()
    }
}

impl From<BooleanGroup> for Expression {
    fn from(group: BooleanGroup) -> Self {
        let body = GroupExpression {
            expressions: group.expressions,
        };
        match group.connective {
            Connective::And => Expression::And(body),
            Connective::Or => Expression::Or(body),
        }
    }
}

/// A node in the query-structure tree, tagged by kind.
///
/// Closed union: adding a kind means adding a variant and updating every
/// match site. The serialized form carries the kind in a `type` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Expression {
    Property(FieldExpression),
    Operator(OperatorExpression),
    FieldAndOperator(FieldAndOperatorExpression),
    And(GroupExpression),
    Or(GroupExpression),
    Reduce(ReduceExpression),
    GroupBy(GroupByExpression),
    Columns(ColumnsExpression),
}

impl Expression {
    pub fn kind(&self) -> ExpressionKind {
        match self {
            Expression::Property(_) => ExpressionKind::Property,
            Expression::Operator(_) => ExpressionKind::Operator,
            Expression::FieldAndOperator(_) => ExpressionKind::FieldAndOperator,
            Expression::And(_) => ExpressionKind::And,
            Expression::Or(_) => ExpressionKind::Or,
            Expression::Reduce(_) => ExpressionKind::Reduce,
            Expression::GroupBy(_) => ExpressionKind::GroupBy,
            Expression::Columns(_) => ExpressionKind::Columns,
        }
    }

    /// Create a boolean group expression
    pub fn group(connective: Connective, expressions: Vec<Expression>) -> Self {
        let body = GroupExpression { expressions };
        match connective {
            Connective::And => Expression::And(body),
            Connective::Or => Expression::Or(body),
        }
    }

    /// View this node as a boolean group, if it is one.
    pub fn as_group(&self) -> Option<(Connective, &[Expression])> {
        match self {
            Expression::And(body) => Some((Connective::And, &body.expressions)),
            Expression::Or(body) => Some((Connective::Or, &body.expressions)),
            _ => None,
        }
    }

    /// Whether this node contributes anything when the tree is rendered.
    ///
    /// Nodes still in their "not yet specified" default shape contribute
    /// nothing and are omitted from serialized output, not rendered as
    /// empty placeholders.
    pub fn contributes(&self) -> bool {
        match self {
            Expression::Property(field) => !field.is_empty(),
            Expression::Operator(op) => op.operator.is_some(),
            Expression::FieldAndOperator(node) => !node.field.is_empty(),
            Expression::And(body) | Expression::Or(body) => {
                body.expressions.iter().any(Expression::contributes)
            }
            Expression::Reduce(reduce) => reduce.field.is_some() || reduce.function.is_some(),
            Expression::GroupBy(group_by) => group_by.field.is_some(),
            Expression::Columns(columns) => !columns.columns.is_empty(),
        }
    }
}
