//! Query aggregate and the persisted document.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ModelResult;
use crate::expression::types::{BooleanGroup, ColumnsExpression, FieldExpression};

/// Root of the structured query: filters, aggregations, groupings and
/// projections, each held in its own container.
///
/// A new query starts with empty `where`/`reduce`/`groupBy` groups; the
/// editor mutates it incrementally, always producing new values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryExpression {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<FieldExpression>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<ColumnsExpression>,
    #[serde(rename = "where", default)]
    pub where_: BooleanGroup,
    #[serde(default)]
    pub reduce: BooleanGroup,
    #[serde(rename = "groupBy", default)]
    pub group_by: BooleanGroup,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeshift: Option<FieldExpression>,
}

impl QueryExpression {
    /// Copy with non-contributing children stripped.
    ///
    /// The serialization contract: an absent or still-default expression
    /// serializes to no contribution at all, never to an empty
    /// placeholder. Group containers themselves survive empty (an empty
    /// `where` renders as "no filter").
    pub fn pruned(&self) -> Self {
        Self {
            from: self.from.clone().filter(|f| !f.is_empty()),
            columns: self.columns.clone().filter(|c| !c.columns.is_empty()),
            where_: prune_group(&self.where_),
            reduce: prune_group(&self.reduce),
            group_by: prune_group(&self.group_by),
            timeshift: self.timeshift.clone().filter(|f| !f.is_empty()),
        }
    }
}

fn prune_group(group: &BooleanGroup) -> BooleanGroup {
    BooleanGroup {
        connective: group.connective,
        expressions: group
            .expressions
            .iter()
            .filter(|e| e.contributes())
            .cloned()
            .collect(),
    }
}

/// Which representation of the query is authoritative.
///
/// External collaborators read this to decide whether the raw text or the
/// structured expression drives execution; the core never regenerates text
/// over a hand-edited query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuerySource {
    Raw,
    Schema,
    Autocomplete,
    Visual,
    /// Text produced by an AI-assisted prompt flow. The core treats it
    /// like any other raw-text source; the tag is kept so such documents
    /// load without loss.
    OpenAi,
}

impl Default for QuerySource {
    fn default() -> Self {
        QuerySource::Raw
    }
}

/// How the result set should be shaped by the consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultFormat {
    #[serde(rename = "table")]
    Table,
    #[serde(rename = "time_series")]
    TimeSeries,
    #[serde(rename = "time_series_adx_series")]
    AdxTimeSeries,
    #[serde(rename = "trace")]
    Trace,
}

/// The persisted unit: raw query text and the structured expression side
/// by side, plus the source tag deciding which one is authoritative.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryDocument {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub database: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_format: Option<ResultFormat>,
    #[serde(default)]
    pub expression: QueryExpression,
    #[serde(default)]
    pub query_source: QuerySource,
}

impl QueryDocument {
    /// Whether the query text, not the structured expression, is the
    /// authoritative representation. True for hand-written and
    /// prompt-generated text alike: regenerating either from the
    /// structured model would overwrite it.
    pub fn is_raw_authoritative(&self) -> bool {
        matches!(self.query_source, QuerySource::Raw | QuerySource::OpenAi)
    }

    /// Record a structured edit: replaces the expression and marks the
    /// structured model authoritative. The raw text is left untouched for
    /// the collaborator that renders it.
    pub fn with_expression(&self, expression: QueryExpression) -> Self {
        Self {
            expression,
            query_source: QuerySource::Visual,
            ..self.clone()
        }
    }

    pub fn from_json(json: &str) -> ModelResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_pretty(&self) -> ModelResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: &Path) -> ModelResult<Self> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    pub fn save(&self, path: &Path) -> ModelResult<()> {
        std::fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }
}
