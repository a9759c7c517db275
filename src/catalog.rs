//! Field and operator catalogs.
//!
//! Both catalogs are read-only for the lifetime of an editing session and
//! are supplied by external collaborators: the field catalog by a
//! schema-loading step, the operator catalog by the editor configuration.
//! If the schema reloads mid-session, the caller re-runs the resolver
//! against the new catalogs explicitly; nothing here subscribes to changes.

pub mod field;
pub mod operator;
pub mod schema;

pub use field::{FieldCatalog, FieldDefinition, FieldType};
pub use operator::{OperandKind, OperatorCatalog, OperatorDefinition};
pub use schema::{field_type_from_csl, RawColumnSchema};
