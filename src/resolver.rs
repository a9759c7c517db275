//! Field/operator compatibility resolution.
//!
//! Pure functions keeping operator selections valid as fields change:
//! - Compute the subset of operators valid for a field
//! - Reconcile a stale operator selection after a field change
//! - Normalize operand slots against an operator's declared arity
//! - Re-validate a whole query after a schema reload
//!
//! None of these return errors: an impossible selection surfaces as the
//! operator-unset shape, a bad operand count is repaired in place, and an
//! empty result set is a valid answer.

use crate::catalog::field::FieldCatalog;
use crate::catalog::operator::{OperatorCatalog, OperatorDefinition};
use crate::expression::types::{
    BooleanGroup, Connective, Expression, FieldAndOperatorExpression, FieldExpression,
    GroupByExpression, OperatorExpression, ReduceExpression,
};
use crate::expression::value::OperandValue;
use crate::query::QueryExpression;

/// Filter the catalog to the operators valid for the given field.
///
/// Deterministic and order-preserving: the result is exactly the catalog
/// entries whose support set contains the field's type, in catalog order.
pub fn resolve_operators<'a>(
    field: &FieldExpression,
    catalog: &'a [OperatorDefinition],
) -> Vec<&'a OperatorDefinition> {
    catalog
        .iter()
        .filter(|op| op.supports(field.field_type))
        .collect()
}

/// Re-validate an operator selection against a compatible-operator list.
///
/// A selection still present in `compatible` is kept verbatim, operand
/// values included. Otherwise the first compatible operator is selected
/// with default operand slots (catalog order is the deliberate tie-break,
/// not a ranking). An empty `compatible` list yields the operator-unset
/// shape.
pub fn reconcile_operator(
    current: Option<&OperatorExpression>,
    compatible: &[&OperatorDefinition],
) -> OperatorExpression {
    if let Some(current) = current {
        if let Some(value) = current.operator_value() {
            if compatible.iter().any(|op| op.value == value) {
                return current.clone();
            }
        }
    }

    match compatible.first() {
        Some(first) => OperatorExpression::new((*first).clone(), first.default_operands()),
        None => OperatorExpression::unset(),
    }
}

/// Repair an operator expression's operand slots.
///
/// Missing slots are filled with the default value for the operator's
/// declared operand kind; surplus slots beyond the declared arity are
/// truncated. Values already present within the arity are never dropped:
/// a single value is re-wrapped when the declared kind is a list, and list
/// items are joined when it is not, so the slot stays renderable.
pub fn normalize_operator(expr: &OperatorExpression) -> OperatorExpression {
    let Some(definition) = &expr.operator else {
        return expr.clone();
    };

    let mut operands = expr.operands.clone();
    operands.truncate(definition.arity);

    for slot in operands.iter_mut() {
        *slot = coerce_operand(slot, definition);
    }
    while operands.len() < definition.arity {
        operands.push(definition.operand_kind.default_value());
    }

    OperatorExpression {
        operator: expr.operator.clone(),
        operands,
    }
}

fn coerce_operand(value: &OperandValue, definition: &OperatorDefinition) -> OperandValue {
    use crate::catalog::operator::OperandKind;

    match (value, definition.operand_kind) {
        (OperandValue::String(s), OperandKind::StringList) => {
            if s.is_empty() {
                OperandValue::List(Vec::new())
            } else {
                OperandValue::List(vec![s.clone()])
            }
        }
        // Joining keeps every entered value in the slot; nothing the user
        // typed is dropped by the kind repair.
        (OperandValue::List(items), OperandKind::String) => {
            OperandValue::String(items.join(", "))
        }
        _ => value.clone(),
    }
}

/// Re-validate a whole query expression against freshly loaded catalogs.
///
/// Field types are refreshed from the field catalog and every predicate's
/// operator is reconciled and normalized. Fields the catalog does not know
/// are left untouched (catalogs are permissive about unknowns). Returns the
/// repaired expression together with human-readable notes describing what
/// changed.
pub fn reconcile_query(
    expr: &QueryExpression,
    fields: &FieldCatalog,
    operators: &OperatorCatalog,
) -> (QueryExpression, Vec<String>) {
    let mut notes = Vec::new();

    let reconciled = QueryExpression {
        from: expr.from.clone(),
        columns: expr.columns.clone(),
        where_: reconcile_group(&expr.where_, fields, operators, &mut notes),
        reduce: reconcile_group(&expr.reduce, fields, operators, &mut notes),
        group_by: reconcile_group(&expr.group_by, fields, operators, &mut notes),
        timeshift: expr.timeshift.clone(),
    };

    (reconciled, notes)
}

fn reconcile_group(
    group: &BooleanGroup,
    fields: &FieldCatalog,
    operators: &OperatorCatalog,
    notes: &mut Vec<String>,
) -> BooleanGroup {
    BooleanGroup {
        connective: group.connective,
        expressions: group
            .expressions
            .iter()
            .map(|child| reconcile_expression(child, fields, operators, notes))
            .collect(),
    }
}

fn reconcile_expression(
    expr: &Expression,
    fields: &FieldCatalog,
    operators: &OperatorCatalog,
    notes: &mut Vec<String>,
) -> Expression {
    match expr {
        Expression::FieldAndOperator(node) => {
            let field = refresh_field(&node.field, fields, notes);
            let compatible = resolve_operators(&field, operators.all());
            let operator = normalize_operator(&reconcile_operator(Some(&node.operator), &compatible));

            if operator.operator_value() != node.operator.operator_value() {
                notes.push(match operator.operator_value() {
                    Some(value) => format!(
                        "predicate on {}: operator replaced with {}",
                        field.name, value
                    ),
                    None => format!("predicate on {}: no compatible operator", field.name),
                });
            }

            Expression::FieldAndOperator(FieldAndOperatorExpression { field, operator })
        }
        Expression::And(body) => Expression::group(
            Connective::And,
            body.expressions
                .iter()
                .map(|child| reconcile_expression(child, fields, operators, notes))
                .collect(),
        ),
        Expression::Or(body) => Expression::group(
            Connective::Or,
            body.expressions
                .iter()
                .map(|child| reconcile_expression(child, fields, operators, notes))
                .collect(),
        ),
        Expression::Reduce(reduce) => Expression::Reduce(ReduceExpression {
            field: reduce
                .field
                .as_ref()
                .map(|f| refresh_field(f, fields, notes)),
            function: reduce.function.clone(),
            parameters: reduce.parameters.clone(),
        }),
        Expression::GroupBy(group_by) => Expression::GroupBy(GroupByExpression {
            field: group_by
                .field
                .as_ref()
                .map(|f| refresh_field(f, fields, notes)),
            interval: group_by.interval.clone(),
        }),
        other => other.clone(),
    }
}

fn refresh_field(
    field: &FieldExpression,
    fields: &FieldCatalog,
    notes: &mut Vec<String>,
) -> FieldExpression {
    let mut field = field.clone();
    match fields.find(&field.name) {
        Some(definition) if definition.field_type != field.field_type => {
            notes.push(format!(
                "field {}: type updated from {} to {}",
                field.name,
                field.field_type.as_str(),
                definition.field_type.as_str()
            ));
            field.field_type = definition.field_type;
        }
        Some(_) => {}
        None if !field.is_empty() => {
            notes.push(format!("field {}: not present in the current schema", field.name));
        }
        None => {}
    }
    field
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::field::{FieldDefinition, FieldType};
    use crate::catalog::operator::OperandKind;

    fn catalog() -> Vec<OperatorDefinition> {
        vec![
            OperatorDefinition::new(
                "==",
                "equal to",
                vec![FieldType::String],
                OperandKind::String,
                1,
            ),
            OperatorDefinition::new(
                ">",
                "greater than",
                vec![FieldType::DateTime, FieldType::Number],
                OperandKind::String,
                1,
            ),
            OperatorDefinition::new(
                "in",
                "in",
                vec![FieldType::String, FieldType::Number],
                OperandKind::StringList,
                1,
            ),
        ]
    }

    #[test]
    fn test_resolve_filters_by_type_in_catalog_order() {
        let catalog = catalog();
        let field = FieldExpression::new("Duration", FieldType::Number);

        let compatible = resolve_operators(&field, &catalog);
        let values: Vec<&str> = compatible.iter().map(|op| op.value.as_str()).collect();
        assert_eq!(values, vec![">", "in"]);

        // Every result supports the field type; every supporting catalog
        // entry is in the result.
        for op in &compatible {
            assert!(op.supports(FieldType::Number));
        }
        for op in &catalog {
            assert_eq!(
                op.supports(FieldType::Number),
                compatible.iter().any(|c| c.value == op.value)
            );
        }
    }

    #[test]
    fn test_resolve_unknown_type_matches_nothing() {
        let catalog = catalog();
        let field = FieldExpression::new("Payload", FieldType::Other);
        assert!(resolve_operators(&field, &catalog).is_empty());
    }

    #[test]
    fn test_reconcile_selects_first_compatible_for_datetime() {
        // Field catalog [Timestamp: datetime] against [==: string,
        // >: datetime|number] yields [">"], auto-selected with a default
        // operand slot.
        let catalog = vec![
            OperatorDefinition::new(
                "==",
                "equal to",
                vec![FieldType::String],
                OperandKind::String,
                1,
            ),
            OperatorDefinition::new(
                ">",
                "greater than",
                vec![FieldType::DateTime, FieldType::Number],
                OperandKind::String,
                1,
            ),
        ];
        let field = FieldExpression::new("Timestamp", FieldType::DateTime);

        let compatible = resolve_operators(&field, &catalog);
        assert_eq!(compatible.len(), 1);
        assert_eq!(compatible[0].value, ">");

        let reconciled = reconcile_operator(None, &compatible);
        assert_eq!(reconciled.operator_value(), Some(">"));
        assert_eq!(reconciled.operands, vec![OperandValue::String(String::new())]);
    }

    #[test]
    fn test_reconcile_keeps_compatible_selection_verbatim() {
        let catalog = catalog();
        let field = FieldExpression::new("Duration", FieldType::Number);
        let compatible = resolve_operators(&field, &catalog);

        let current = OperatorExpression::new(
            catalog[1].clone(),
            vec![OperandValue::from("500")],
        );
        let reconciled = reconcile_operator(Some(&current), &compatible);
        assert_eq!(reconciled, current);
    }

    #[test]
    fn test_reconcile_replaces_incompatible_selection() {
        let catalog = catalog();
        let field = FieldExpression::new("Level", FieldType::String);
        let compatible = resolve_operators(&field, &catalog);

        // ">" does not support strings; the first compatible operator wins.
        let current = OperatorExpression::new(
            catalog[1].clone(),
            vec![OperandValue::from("500")],
        );
        let reconciled = reconcile_operator(Some(&current), &compatible);
        assert_eq!(reconciled.operator_value(), Some("=="));
        assert_eq!(reconciled.operands, vec![OperandValue::String(String::new())]);
    }

    #[test]
    fn test_reconcile_empty_list_yields_unset() {
        let current = OperatorExpression::new(
            catalog()[0].clone(),
            vec![OperandValue::from("error")],
        );
        let reconciled = reconcile_operator(Some(&current), &[]);
        assert_eq!(reconciled, OperatorExpression::unset());
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let catalog = catalog();
        for field_type in [FieldType::String, FieldType::Number, FieldType::Other] {
            let field = FieldExpression::new("f", field_type);
            let compatible = resolve_operators(&field, &catalog);

            let once = reconcile_operator(None, &compatible);
            let twice = reconcile_operator(Some(&once), &compatible);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_normalize_pads_missing_slots() {
        let expr = OperatorExpression::new(catalog()[0].clone(), vec![]);
        let normalized = normalize_operator(&expr);
        assert_eq!(normalized.operands, vec![OperandValue::String(String::new())]);
    }

    #[test]
    fn test_normalize_truncates_surplus_slots() {
        let expr = OperatorExpression::new(
            catalog()[0].clone(),
            vec![OperandValue::from("error"), OperandValue::from("warn")],
        );
        let normalized = normalize_operator(&expr);
        assert_eq!(normalized.operands, vec![OperandValue::from("error")]);
    }

    #[test]
    fn test_normalize_preserves_present_values() {
        let expr = OperatorExpression::new(
            catalog()[0].clone(),
            vec![OperandValue::from("error")],
        );
        assert_eq!(normalize_operator(&expr), expr);
    }

    #[test]
    fn test_normalize_coerces_list_kinds() {
        // Single value entered, then the operator switched to a list kind.
        let expr = OperatorExpression::new(
            catalog()[2].clone(),
            vec![OperandValue::from("error")],
        );
        let normalized = normalize_operator(&expr);
        assert_eq!(
            normalized.operands,
            vec![OperandValue::List(vec!["error".into()])]
        );

        // Switching back to a single-value kind keeps every list item.
        let expr = OperatorExpression::new(
            catalog()[0].clone(),
            vec![OperandValue::List(vec!["error".into(), "warn".into()])],
        );
        let normalized = normalize_operator(&expr);
        assert_eq!(normalized.operands, vec![OperandValue::from("error, warn")]);
    }

    #[test]
    fn test_normalize_unset_operator_is_identity() {
        let expr = OperatorExpression::unset();
        assert_eq!(normalize_operator(&expr), expr);
    }

    #[test]
    fn test_reconcile_query_refreshes_types_after_schema_change() {
        // Duration was a string when the query was saved; the schema now
        // declares it a number, which invalidates "contains".
        let fields = FieldCatalog::new(vec![FieldDefinition::new("Duration", FieldType::Number)]);
        let operators = OperatorCatalog::kusto_defaults();

        let contains = operators.find("contains").unwrap().clone();
        let stale = Expression::FieldAndOperator(FieldAndOperatorExpression::new(
            FieldExpression::new("Duration", FieldType::String),
            OperatorExpression::new(contains, vec![OperandValue::from("5")]),
        ));

        let mut query = QueryExpression::default();
        query.where_.expressions.push(stale);

        let (reconciled, notes) = reconcile_query(&query, &fields, &operators);
        assert_eq!(notes.len(), 2); // type refresh + operator replacement

        let Expression::FieldAndOperator(node) = &reconciled.where_.expressions[0] else {
            panic!("expected a predicate");
        };
        assert_eq!(node.field.field_type, FieldType::Number);
        assert_eq!(node.operator.operator_value(), Some("=="));
    }

    #[test]
    fn test_reconcile_query_leaves_unknown_fields_alone() {
        let fields = FieldCatalog::new(vec![]);
        let operators = OperatorCatalog::kusto_defaults();

        let eq = operators.find("==").unwrap().clone();
        let predicate = Expression::FieldAndOperator(FieldAndOperatorExpression::new(
            FieldExpression::new("Legacy", FieldType::String),
            OperatorExpression::new(eq, vec![OperandValue::from("x")]),
        ));

        let mut query = QueryExpression::default();
        query.where_.expressions.push(predicate.clone());

        let (reconciled, notes) = reconcile_query(&query, &fields, &operators);
        assert_eq!(reconciled.where_.expressions[0], predicate);
        assert_eq!(notes.len(), 1);
        assert!(notes[0].contains("not present"));
    }
}
