//! Query expression tree.
//!
//! This module provides:
//! - The tagged-union expression node types (filters, aggregations,
//!   groupings, projections)
//! - The discriminant enumeration for runtime kind checks
//! - Operand literal values and their default shapes
//!
//! Expression values are immutable: every edit builds a new node. An absent
//! node (`None` at the caller) means "not yet specified" and is distinct
//! from an empty default node.

pub mod types;
pub mod value;

pub use types::{
    BooleanGroup, ColumnsExpression, Connective, Expression, ExpressionKind,
    FieldAndOperatorExpression, FieldExpression, GroupByExpression, GroupExpression,
    OperatorExpression, ReduceExpression,
};
pub use value::OperandValue;
