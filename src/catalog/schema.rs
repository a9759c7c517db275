//! Adapter from raw data-source schema columns to the field catalog.

use serde::{Deserialize, Serialize};

use crate::catalog::field::{FieldCatalog, FieldDefinition, FieldType};

/// One column as the backing data service describes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawColumnSchema {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "CslType")]
    pub csl_type: String,
    #[serde(rename = "isDynamic", default)]
    pub is_dynamic: bool,
}

/// Map a CSL scalar type name to an editor field type.
///
/// Unrecognized names map to [`FieldType::Other`] rather than failing:
/// a new backend type simply matches no operators until the catalog learns
/// about it.
pub fn field_type_from_csl(csl_type: &str) -> FieldType {
    match csl_type.to_ascii_lowercase().as_str() {
        "bool" | "boolean" => FieldType::Boolean,
        "datetime" | "date" => FieldType::DateTime,
        "int" | "long" | "real" | "double" | "decimal" => FieldType::Number,
        "string" | "guid" | "dynamic" => FieldType::String,
        "timespan" | "time" => FieldType::TimeSpan,
        _ => FieldType::Other,
    }
}

impl FieldCatalog {
    /// Build a field catalog from raw schema columns, preserving column
    /// order.
    pub fn from_columns(columns: &[RawColumnSchema]) -> Self {
        let fields = columns
            .iter()
            .map(|col| FieldDefinition {
                name: col.name.clone(),
                field_type: field_type_from_csl(&col.csl_type),
                dynamic: col.is_dynamic || col.csl_type.eq_ignore_ascii_case("dynamic"),
            })
            .collect();
        Self::new(fields)
    }
}
