//! Edit protocol for a single field+operator predicate.

use crate::catalog::operator::{OperatorCatalog, OperatorDefinition};
use crate::expression::types::{FieldAndOperatorExpression, FieldExpression, OperatorExpression};
use crate::resolver::{normalize_operator, reconcile_operator, resolve_operators};

/// Editor for one [`FieldAndOperatorExpression`] node.
///
/// Holds only a borrow of the operator catalog; all per-node state lives in
/// the node value the caller owns. A node moves from empty, to field-only,
/// to complete (field + compatible operator + filled operands) and stays
/// re-editable; clearing the field removes the node from its parent group.
pub struct FieldOperatorEditor<'a> {
    operators: &'a OperatorCatalog,
}

impl<'a> FieldOperatorEditor<'a> {
    pub fn new(operators: &'a OperatorCatalog) -> Self {
        Self { operators }
    }

    /// Operators valid for the given field, in catalog order.
    ///
    /// Called eagerly when an existing node is first presented (e.g. a
    /// saved query being edited), so the operator picker never offers an
    /// operator incompatible with the loaded field.
    pub fn compatible_operators(&self, field: &FieldExpression) -> Vec<&'a OperatorDefinition> {
        resolve_operators(field, self.operators.all())
    }

    /// Replace the node's field.
    ///
    /// A still-compatible operator selection is retained verbatim, operand
    /// values included; otherwise the first compatible operator is selected
    /// and given default operands. `None` clears the node: it no longer
    /// contributes a predicate and must be removed from its parent group.
    pub fn on_field_change(
        &self,
        current: Option<&FieldAndOperatorExpression>,
        new_field: Option<FieldExpression>,
    ) -> Option<FieldAndOperatorExpression> {
        let field = new_field?;
        let compatible = self.compatible_operators(&field);
        let operator = normalize_operator(&reconcile_operator(
            current.map(|node| &node.operator),
            &compatible,
        ));
        Some(FieldAndOperatorExpression { field, operator })
    }

    /// Replace the node's operator with the given expression as-is.
    ///
    /// The caller produced it from a compatible list; the field is not
    /// re-derived.
    pub fn on_operator_change(
        &self,
        current: &FieldAndOperatorExpression,
        operator: OperatorExpression,
    ) -> FieldAndOperatorExpression {
        FieldAndOperatorExpression {
            field: current.field.clone(),
            operator,
        }
    }
}
