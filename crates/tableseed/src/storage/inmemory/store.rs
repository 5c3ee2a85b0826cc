//! In-memory table store implementation.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use tableseed_core::{
    GsiSpec, Record, Result, ScanPage, StoreError, TableHandle, TableSpec, TableStatus,
    TableStore,
};

#[derive(Debug, Clone)]
struct Table {
    spec: TableSpec,
    indexes: Vec<GsiSpec>,
    /// Records by key value.
    items: BTreeMap<String, Record>,
}

/// In-memory storage backend for rehearsal runs and testing.
///
/// Applies the same schema rules DynamoDB does: records must carry the
/// table's key attribute, table names are unique, capacities are positive.
/// Tables are listed in name order and deletion takes effect immediately.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<BTreeMap<String, Table>>>,
    page_limit: Option<usize>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Caps the number of records a single scan returns.
    pub fn with_page_limit(mut self, limit: usize) -> Self {
        self.page_limit = Some(limit);
        self
    }

    /// Returns the names of the indexes defined on a table.
    pub async fn index_names(&self, table_name: &str) -> Result<Vec<String>> {
        let tables = self.tables.read().await;
        let table = tables.get(table_name).ok_or_else(|| not_found(table_name))?;
        Ok(table
            .indexes
            .iter()
            .map(|gsi| gsi.index_name.clone())
            .collect())
    }
}

fn not_found(table_name: &str) -> StoreError {
    StoreError::TableNotFound {
        table_name: table_name.to_string(),
    }
}

#[async_trait]
impl TableStore for InMemoryStore {
    async fn list_tables(&self) -> Result<Vec<String>> {
        let tables = self.tables.read().await;
        Ok(tables.keys().cloned().collect())
    }

    async fn table_exists(&self, table_name: &str) -> Result<bool> {
        let tables = self.tables.read().await;
        Ok(tables.contains_key(table_name))
    }

    async fn create_table(&self, spec: &TableSpec) -> Result<TableHandle> {
        if spec.name.is_empty() || spec.key_attribute.is_empty() {
            return Err(StoreError::Validation(
                "table name and key attribute must not be empty".to_string(),
            ));
        }
        if !spec.throughput.is_valid() {
            return Err(StoreError::Validation(
                "provisioned capacity units must be at least 1".to_string(),
            ));
        }

        let mut tables = self.tables.write().await;
        if tables.contains_key(&spec.name) {
            return Err(StoreError::AlreadyExists {
                table_name: spec.name.clone(),
            });
        }
        tables.insert(
            spec.name.clone(),
            Table {
                spec: spec.clone(),
                indexes: Vec::new(),
                items: BTreeMap::new(),
            },
        );

        Ok(TableHandle {
            table_name: spec.name.clone(),
            status: TableStatus::Active,
        })
    }

    async fn add_global_secondary_index(&self, table_name: &str, gsi: &GsiSpec) -> Result<()> {
        let mut tables = self.tables.write().await;
        let table = tables
            .get_mut(table_name)
            .ok_or_else(|| not_found(table_name))?;

        if table
            .indexes
            .iter()
            .any(|existing| existing.index_name == gsi.index_name)
        {
            return Err(StoreError::Validation(format!(
                "index '{}' already exists on table '{}'",
                gsi.index_name, table_name
            )));
        }
        if !gsi.throughput.is_valid() {
            return Err(StoreError::Validation(
                "provisioned capacity units must be at least 1".to_string(),
            ));
        }

        table.indexes.push(gsi.clone());
        Ok(())
    }

    async fn delete_table(&self, table_name: &str) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables
            .remove(table_name)
            .map(|_| ())
            .ok_or_else(|| not_found(table_name))
    }

    async fn put_item(&self, table_name: &str, record: &Record) -> Result<()> {
        let mut tables = self.tables.write().await;
        let table = tables
            .get_mut(table_name)
            .ok_or_else(|| not_found(table_name))?;

        let key = record
            .get(&table.spec.key_attribute)
            .ok_or_else(|| {
                StoreError::Validation(format!(
                    "One of the required keys was not given a value: {}",
                    table.spec.key_attribute
                ))
            })?
            .to_string();

        table.items.insert(key, record.clone());
        Ok(())
    }

    async fn get_item(
        &self,
        table_name: &str,
        key_attribute: &str,
        key_value: &str,
    ) -> Result<Option<Record>> {
        let tables = self.tables.read().await;
        let table = tables.get(table_name).ok_or_else(|| not_found(table_name))?;

        if key_attribute != table.spec.key_attribute {
            return Err(StoreError::Validation(
                "The provided key element does not match the schema".to_string(),
            ));
        }

        Ok(table.items.get(key_value).cloned())
    }

    async fn scan(&self, table_name: &str) -> Result<ScanPage> {
        let tables = self.tables.read().await;
        let table = tables.get(table_name).ok_or_else(|| not_found(table_name))?;

        let limit = self.page_limit.unwrap_or(usize::MAX);
        Ok(ScanPage {
            records: table.items.values().take(limit).cloned().collect(),
            has_more: table.items.len() > limit,
        })
    }
}
