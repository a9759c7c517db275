//! Field definitions and the field catalog.

use serde::{Deserialize, Serialize};

/// Declared type of a field, as the query editor sees it.
///
/// Raw schema types are collapsed into this set by the schema adapter; a
/// declared type the editor does not recognize becomes [`FieldType::Other`],
/// which no operator lists in its support set, so unknown types match
/// nothing rather than erroring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldType {
    Boolean,
    #[serde(rename = "datetime")]
    DateTime,
    Number,
    String,
    #[serde(rename = "timespan")]
    TimeSpan,
    /// Bin size for time-bucketed grouping (e.g. `1h`).
    Interval,
    /// Dashboard template variable injected via
    /// [`FieldCatalog::with_variables`].
    TemplateVariable,
    #[serde(other)]
    Other,
}

impl FieldType {
    /// Get the display string for this type
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Boolean => "boolean",
            FieldType::DateTime => "datetime",
            FieldType::Number => "number",
            FieldType::String => "string",
            FieldType::TimeSpan => "timespan",
            FieldType::Interval => "interval",
            FieldType::TemplateVariable => "templateVariable",
            FieldType::Other => "other",
        }
    }
}

/// One column/attribute of the backing data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Dynamic columns carry schemaless payloads; kept so callers can offer
    /// path expansion, the catalog itself treats them like any other field.
    #[serde(default)]
    pub dynamic: bool,
}

impl FieldDefinition {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            dynamic: false,
        }
    }
}

/// Ordered, read-only list of the fields a query can reference.
///
/// Order is preserved from the supplying schema and is meaningful: the
/// resolver and the editor both present fields in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldCatalog {
    fields: Vec<FieldDefinition>,
}

impl FieldCatalog {
    pub fn new(fields: Vec<FieldDefinition>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    /// Look up a field by name.
    pub fn find(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Build a catalog with template-variable entries appended.
    ///
    /// The variable names are pre-resolved by the caller and passed in
    /// explicitly; the catalog never consults ambient dashboard state.
    pub fn with_variables<I, S>(&self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut fields = self.fields.clone();
        for name in names {
            fields.push(FieldDefinition {
                name: format!("${}", name.into()),
                field_type: FieldType::TemplateVariable,
                dynamic: false,
            });
        }
        Self { fields }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_catalog() -> FieldCatalog {
        FieldCatalog::new(vec![
            FieldDefinition::new("Timestamp", FieldType::DateTime),
            FieldDefinition::new("Level", FieldType::String),
            FieldDefinition::new("Duration", FieldType::Number),
        ])
    }

    #[test]
    fn test_find_by_name() {
        let catalog = sample_catalog();

        let field = catalog.find("Level").unwrap();
        assert_eq!(field.field_type, FieldType::String);

        assert!(catalog.find("Missing").is_none());
    }

    #[test]
    fn test_order_preserved() {
        let catalog = sample_catalog();
        let names: Vec<&str> = catalog.fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Timestamp", "Level", "Duration"]);
    }

    #[test]
    fn test_with_variables_appends() {
        let catalog = sample_catalog().with_variables(["cluster", "env"]);

        assert_eq!(catalog.len(), 5);
        let var = catalog.find("$cluster").unwrap();
        assert_eq!(var.field_type, FieldType::TemplateVariable);
        // Original entries are untouched and still first.
        assert_eq!(catalog.fields()[0].name, "Timestamp");
    }

    #[test]
    fn test_field_type_serde_strings() {
        let json = serde_json::to_string(&FieldType::DateTime).unwrap();
        assert_eq!(json, "\"datetime\"");

        let json = serde_json::to_string(&FieldType::TemplateVariable).unwrap();
        assert_eq!(json, "\"templateVariable\"");

        // Unknown declared types decode permissively.
        let ty: FieldType = serde_json::from_str("\"geo_point\"").unwrap();
        assert_eq!(ty, FieldType::Other);
    }
}
