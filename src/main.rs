//! kquery - validate persisted query documents against a schema

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use kquery::catalog::{FieldCatalog, OperatorCatalog, RawColumnSchema};
use kquery::query::QueryDocument;
use kquery::resolver::reconcile_query;

/// Validate a persisted query document against a schema column listing,
/// repairing stale field types and operator selections.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Schema file: JSON array of columns ({"Name", "CslType"})
    schema: PathBuf,

    /// Persisted query document to validate
    query: PathBuf,

    /// Template variable names to append to the field catalog
    #[arg(long = "var")]
    variables: Vec<String>,

    /// Write the repaired document back in place
    #[arg(short, long)]
    write: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let schema_json = std::fs::read_to_string(&args.schema).context("Failed to read schema file")?;
    let columns: Vec<RawColumnSchema> =
        serde_json::from_str(&schema_json).context("Failed to parse schema file")?;
    let fields =
        FieldCatalog::from_columns(&columns).with_variables(args.variables.iter().map(String::as_str));
    log::debug!(
        "field catalog: {} columns, {} template variables",
        columns.len(),
        args.variables.len()
    );

    let operators = OperatorCatalog::kusto_defaults();
    let document = QueryDocument::load(&args.query).context("Failed to load query document")?;
    log::debug!(
        "loaded document: {} where, {} reduce, {} groupBy children",
        document.expression.where_.len(),
        document.expression.reduce.len(),
        document.expression.group_by.len()
    );

    let (reconciled, notes) = reconcile_query(&document.expression, &fields, &operators);
    if notes.is_empty() {
        println!("query expression is consistent with the schema");
    } else {
        for note in &notes {
            println!("repaired: {}", note);
        }
    }

    if args.write {
        if document.is_raw_authoritative() {
            log::warn!("document is raw-authoritative; only the structured expression is updated");
        }
        // Reconciliation repairs the structured model without claiming
        // authority over the raw text, so the source tag stays as-is.
        let updated = QueryDocument {
            expression: reconciled,
            ..document
        };
        updated
            .save(&args.query)
            .context("Failed to write query document")?;
        println!("wrote repaired document to {}", args.query.display());
    }

    Ok(())
}
