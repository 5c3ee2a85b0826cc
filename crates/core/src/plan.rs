//! The fixed order of a bootstrap run (Functional Core - pure data).

use crate::seed::{self, ACCOUNT, ARTICLE, TAG};
use crate::types::{Record, TableSpec};

/// A single step of a bootstrap run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Delete the table if it exists and wait for it to disappear.
    DeleteTable { table_name: String },
    /// Create the table.
    CreateTable { spec: TableSpec },
    /// Write records one by one, dropping `tag_id`.
    InsertData {
        table_name: String,
        records: Vec<Record>,
    },
    /// List all tables.
    ListTables,
    /// Scan a table and print its records.
    ShowItems { table_name: String },
}

/// Returns the steps of a bootstrap run in execution order.
pub fn bootstrap_steps() -> Vec<Step> {
    let tables = seed::bootstrap_tables();

    let mut steps: Vec<Step> = tables
        .iter()
        .map(|spec| Step::DeleteTable {
            table_name: spec.name.clone(),
        })
        .collect();

    steps.extend(tables.into_iter().map(|spec| Step::CreateTable { spec }));

    steps.push(Step::InsertData {
        table_name: ARTICLE.to_string(),
        records: seed::article_records(),
    });
    steps.push(Step::InsertData {
        table_name: ACCOUNT.to_string(),
        records: seed::account_records(),
    });
    steps.push(Step::InsertData {
        table_name: ACCOUNT.to_string(),
        records: seed::account_records_rewrite(),
    });

    steps.push(Step::ListTables);

    steps.extend([ARTICLE, TAG, ACCOUNT].into_iter().map(|t| Step::ShowItems {
        table_name: t.to_string(),
    }));

    steps
}

/// Pure function: Format a step for display.
pub fn format_step(step: &Step) -> String {
    match step {
        Step::DeleteTable { table_name } => format!("- Delete table if present: {table_name}"),
        Step::CreateTable { spec } => format!(
            "+ Create table: {} (key: {} (S), capacity: {}/{})",
            spec.name,
            spec.key_attribute,
            spec.throughput.read_capacity,
            spec.throughput.write_capacity
        ),
        Step::InsertData {
            table_name,
            records,
        } => format!("~ Insert {} records into {table_name}", records.len()),
        Step::ListTables => "= List tables".to_string(),
        Step::ShowItems { table_name } => format!("= Show items: {table_name}"),
    }
}
