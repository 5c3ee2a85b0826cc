use async_trait::async_trait;

use crate::types::{GsiSpec, Record, TableHandle, TableSpec};
use crate::Result;

/// One page of scan results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanPage {
    pub records: Vec<Record>,
    /// True when the store holds more records than this page returned.
    pub has_more: bool,
}

/// Administrative and item operations against a key-value table store.
#[async_trait]
pub trait TableStore: Send + Sync {
    /// Lists the names of all tables, in the order the store returns them.
    async fn list_tables(&self) -> Result<Vec<String>>;

    /// Returns true if the store still reports the table, in any status.
    async fn table_exists(&self, table_name: &str) -> Result<bool>;

    /// Creates a table with a single string HASH key.
    async fn create_table(&self, spec: &TableSpec) -> Result<TableHandle>;

    /// Adds a Global Secondary Index to an existing table.
    async fn add_global_secondary_index(&self, table_name: &str, gsi: &GsiSpec) -> Result<()>;

    /// Issues a table deletion. The table may linger until the store finishes removing it.
    async fn delete_table(&self, table_name: &str) -> Result<()>;

    /// Writes a record, replacing any record with the same key.
    async fn put_item(&self, table_name: &str, record: &Record) -> Result<()>;

    /// Reads a record by its key attribute.
    async fn get_item(
        &self,
        table_name: &str,
        key_attribute: &str,
        key_value: &str,
    ) -> Result<Option<Record>>;

    /// Reads the first page of a full table scan.
    async fn scan(&self, table_name: &str) -> Result<ScanPage>;
}
