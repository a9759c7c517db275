//! Ordered-list edit operations for boolean groups.

use crate::expression::types::{BooleanGroup, Connective, Expression};

impl BooleanGroup {
    /// Append a child at the end of the group.
    ///
    /// Freshly appended children usually start as empty defaults; nothing
    /// is validated until the child becomes non-empty.
    pub fn append(&self, child: Expression) -> Self {
        let mut expressions = self.expressions.clone();
        expressions.push(child);
        Self {
            connective: self.connective,
            expressions,
        }
    }

    /// Replace or remove the child at `index`.
    ///
    /// `Some(child)` replaces in place. `None` removes the child and
    /// compacts the sequence: no holes are retained, so a predicate reset
    /// to "no field" disappears from the group instead of emitting a
    /// vacuous clause. An out-of-range index leaves the group unchanged
    /// (the edit protocol only hands out indices it produced).
    pub fn set_at(&self, index: usize, child: Option<Expression>) -> Self {
        let mut expressions = self.expressions.clone();
        if index < expressions.len() {
            match child {
                Some(child) => expressions[index] = child,
                None => {
                    expressions.remove(index);
                }
            }
        }
        Self {
            connective: self.connective,
            expressions,
        }
    }

    /// Change the group's connective without touching its children.
    pub fn with_connective(&self, connective: Connective) -> Self {
        Self {
            connective,
            expressions: self.expressions.clone(),
        }
    }

    /// Flip the connective (the editor's AND/OR switch).
    pub fn toggle_connective(&self) -> Self {
        self.with_connective(self.connective.toggled())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::field::FieldType;
    use crate::expression::types::{
        FieldAndOperatorExpression, FieldExpression, OperatorExpression,
    };

    fn predicate(name: &str) -> Expression {
        Expression::FieldAndOperator(FieldAndOperatorExpression::new(
            FieldExpression::new(name, FieldType::String),
            OperatorExpression::unset(),
        ))
    }

    #[test]
    fn test_append_preserves_order() {
        let group = BooleanGroup::and()
            .append(predicate("a"))
            .append(predicate("b"))
            .append(predicate("c"));

        assert_eq!(group.len(), 3);
        assert_eq!(group.expressions[2], predicate("c"));
    }

    #[test]
    fn test_append_default_child_is_allowed() {
        let group =
            BooleanGroup::and().append(Expression::FieldAndOperator(Default::default()));
        assert_eq!(group.len(), 1);
        assert!(!group.expressions[0].contributes());
    }

    #[test]
    fn test_set_at_replaces() {
        let group = BooleanGroup::and().append(predicate("a")).append(predicate("b"));

        let updated = group.set_at(0, Some(predicate("z")));
        assert_eq!(updated.expressions[0], predicate("z"));
        assert_eq!(updated.expressions[1], predicate("b"));
    }

    #[test]
    fn test_set_at_none_removes_and_compacts() {
        let group = BooleanGroup::and()
            .append(predicate("a"))
            .append(predicate("b"))
            .append(predicate("c"));

        let updated = group.set_at(1, None);
        assert_eq!(updated.len(), 2);
        assert_eq!(updated.expressions[0], predicate("a"));
        assert_eq!(updated.expressions[1], predicate("c"));
    }

    #[test]
    fn test_removing_last_child_leaves_valid_empty_group() {
        let group = BooleanGroup::or().append(predicate("a"));
        let updated = group.set_at(0, None);

        assert!(updated.is_empty());
        assert_eq!(updated.connective, Connective::Or);
    }

    #[test]
    fn test_set_at_out_of_range_is_noop() {
        let group = BooleanGroup::and().append(predicate("a"));
        assert_eq!(group.set_at(5, None), group);
        assert_eq!(group.set_at(5, Some(predicate("b"))), group);
    }

    #[test]
    fn test_connective_change_keeps_children() {
        let group = BooleanGroup::and().append(predicate("a")).append(predicate("b"));

        let updated = group.with_connective(Connective::Or);
        assert_eq!(updated.connective, Connective::Or);
        assert_eq!(updated.expressions, group.expressions);
    }

    #[test]
    fn test_toggle_connective_round_trips() {
        let group = BooleanGroup::and().append(predicate("a"));

        let toggled = group.toggle_connective();
        assert_eq!(toggled.connective, Connective::Or);
        assert_eq!(toggled.expressions, group.expressions);

        assert_eq!(toggled.toggle_connective(), group);
    }

    #[test]
    fn test_edits_do_not_mutate_the_original() {
        let group = BooleanGroup::and().append(predicate("a"));
        let _updated = group.set_at(0, None);
        assert_eq!(group.len(), 1);
    }
}
