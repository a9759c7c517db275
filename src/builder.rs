//! Composite expression builders.
//!
//! The edit protocol the editor binding calls into: field+operator
//! predicate edits in [`field_operator`], and the ordered-list operations
//! on [`crate::expression::BooleanGroup`] in [`group`]. Every operation is
//! a pure value edit producing a new node; `None` at a builder boundary
//! always means "remove", never "set to an empty default".

pub mod field_operator;
pub mod group;

pub use field_operator::FieldOperatorEditor;
