//! Bootstrap operations (Imperative Shell).
//!
//! Each operation is a straight sequence of store calls. The first error
//! aborts the caller; nothing is retried or rolled back.

use tableseed_core::plan::{self, Step};
use tableseed_core::{
    GsiSpec, Record, Result, StoreError, TableHandle, TableSpec, TableStore, TAG_ATTRIBUTE,
};

use crate::config::WaitConfig;
use crate::prelude::*;

/// What `delete_table` found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The table existed and is gone.
    Deleted,
    /// The table did not exist; nothing was done.
    Missing,
}

/// Deletes a table if it exists and blocks until the store no longer reports it.
pub async fn delete_table<S: TableStore + ?Sized>(
    store: &S,
    table_name: &str,
    wait: WaitConfig,
) -> Result<DeleteOutcome> {
    let tables = show_all_tables(store).await?;

    if !tables.iter().any(|name| name == table_name) {
        aprintln!("{}", p_y(&format!("Table {} does not exist", table_name)));
        return Ok(DeleteOutcome::Missing);
    }

    store.delete_table(table_name).await?;
    wait_until_not_exists(store, table_name, wait).await?;

    aprintln!("{} {}", p_g("Deleted table:"), table_name);
    Ok(DeleteOutcome::Deleted)
}

async fn wait_until_not_exists<S: TableStore + ?Sized>(
    store: &S,
    table_name: &str,
    wait: WaitConfig,
) -> Result<()> {
    for attempt in 1..=wait.max_attempts {
        if !store.table_exists(table_name).await? {
            return Ok(());
        }
        tracing::debug!(table = table_name, attempt, "waiting for table deletion");
        tokio::time::sleep(wait.delay).await;
    }

    Err(StoreError::WaitTimeout {
        table_name: table_name.to_string(),
    })
}

/// Creates a table. Fails with `AlreadyExists` if the name is taken.
pub async fn create_table<S: TableStore + ?Sized>(
    store: &S,
    spec: &TableSpec,
) -> Result<TableHandle> {
    let handle = store.create_table(spec).await?;
    tracing::info!(
        table = %handle.table_name,
        status = ?handle.status,
        key = %spec.key_attribute,
        "created table"
    );
    Ok(handle)
}

/// Adds a global secondary index projecting all attributes at 5/5 capacity.
pub async fn create_gsi<S: TableStore + ?Sized>(
    store: &S,
    table_name: &str,
    index_name: &str,
    key_attribute: &str,
) -> Result<()> {
    let gsi = GsiSpec::new(index_name, key_attribute);
    store.add_global_secondary_index(table_name, &gsi).await?;
    tracing::info!(table = table_name, index = index_name, "added global secondary index");
    Ok(())
}

/// Writes each record in order after dropping its `tag_id` attribute.
///
/// Returns the number of records written.
pub async fn insert_data<S: TableStore + ?Sized>(
    store: &S,
    table_name: &str,
    records: &[Record],
) -> Result<usize> {
    for (written, record) in records.iter().enumerate() {
        let item = record.without(TAG_ATTRIBUTE);
        if let Err(err) = store.put_item(table_name, &item).await {
            tracing::error!(table = table_name, written, "insert aborted: {}", err);
            return Err(err);
        }
    }

    tracing::info!(table = table_name, count = records.len(), "inserted records");
    Ok(records.len())
}

/// Inserts `{key_attribute: tag_id}` unless a record with that key exists.
///
/// Returns true if a record was added.
pub async fn check_and_add_tag<S: TableStore + ?Sized>(
    store: &S,
    table_name: &str,
    key_attribute: &str,
    tag_id: &str,
) -> Result<bool> {
    if store
        .get_item(table_name, key_attribute, tag_id)
        .await?
        .is_some()
    {
        return Ok(false);
    }

    store
        .put_item(table_name, &Record::new().with(key_attribute, tag_id))
        .await?;
    Ok(true)
}

/// Returns the names of all tables at the store.
pub async fn show_all_tables<S: TableStore + ?Sized>(store: &S) -> Result<Vec<String>> {
    let tables = store.list_tables().await?;
    tracing::debug!(?tables, "listed tables");
    Ok(tables)
}

/// Prints every record from the first scan page of a table and returns them.
///
/// Records beyond the first page are not read.
pub async fn show_all_items<S: TableStore + ?Sized>(
    store: &S,
    table_name: &str,
) -> Result<Vec<Record>> {
    let page = store.scan(table_name).await?;

    if page.has_more {
        tracing::warn!(
            table = table_name,
            shown = page.records.len(),
            "scan returned more than one page; only the first is shown"
        );
    }

    for record in &page.records {
        aprintln!("{}", record);
    }

    Ok(page.records)
}

/// Executes a single plan step.
pub async fn execute_step<S: TableStore + ?Sized>(
    store: &S,
    step: &Step,
    wait: WaitConfig,
) -> Result<()> {
    match step {
        Step::DeleteTable { table_name } => {
            delete_table(store, table_name, wait).await?;
        }
        Step::CreateTable { spec } => {
            create_table(store, spec).await?;
        }
        Step::InsertData {
            table_name,
            records,
        } => {
            insert_data(store, table_name, records).await?;
        }
        Step::ListTables => {
            show_all_tables(store).await?;
        }
        Step::ShowItems { table_name } => {
            show_all_items(store, table_name).await?;
        }
    }
    Ok(())
}

/// Runs the full bootstrap: delete, create, seed, then print.
pub async fn run<S: TableStore + ?Sized>(store: &S, wait: WaitConfig) -> Result<()> {
    for step in plan::bootstrap_steps() {
        tracing::debug!("{}", plan::format_step(&step));
        execute_step(store, &step, wait).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryStore;
    use std::time::Duration;
    use tableseed_core::seed::{ACCOUNT, APPOINTMENT, ARTICLE, TAG};

    fn no_wait() -> WaitConfig {
        WaitConfig {
            delay: Duration::from_millis(1),
            max_attempts: 3,
        }
    }

    fn spec(name: &str, key: &str) -> TableSpec {
        TableSpec::new(name, key, 10, 10)
    }

    /// Keeps reporting a table for a fixed number of checks after deletion.
    struct SlowDeleteStore {
        inner: InMemoryStore,
        lingering_checks: std::sync::Mutex<u32>,
    }

    #[async_trait::async_trait]
    impl TableStore for SlowDeleteStore {
        async fn list_tables(&self) -> Result<Vec<String>> {
            self.inner.list_tables().await
        }
        async fn table_exists(&self, table_name: &str) -> Result<bool> {
            {
                let mut remaining = self.lingering_checks.lock().unwrap();
                if *remaining > 0 {
                    *remaining -= 1;
                    return Ok(true);
                }
            }
            self.inner.table_exists(table_name).await
        }
        async fn create_table(&self, spec: &TableSpec) -> Result<TableHandle> {
            self.inner.create_table(spec).await
        }
        async fn add_global_secondary_index(&self, table_name: &str, gsi: &GsiSpec) -> Result<()> {
            self.inner.add_global_secondary_index(table_name, gsi).await
        }
        async fn delete_table(&self, table_name: &str) -> Result<()> {
            self.inner.delete_table(table_name).await
        }
        async fn put_item(&self, table_name: &str, record: &Record) -> Result<()> {
            self.inner.put_item(table_name, record).await
        }
        async fn get_item(
            &self,
            table_name: &str,
            key_attribute: &str,
            key_value: &str,
        ) -> Result<Option<Record>> {
            self.inner
                .get_item(table_name, key_attribute, key_value)
                .await
        }
        async fn scan(&self, table_name: &str) -> Result<tableseed_core::ScanPage> {
            self.inner.scan(table_name).await
        }
    }

    // ==================== delete_table ====================

    #[tokio::test]
    async fn test_delete_missing_table_is_noop() {
        let store = InMemoryStore::new();
        create_table(&store, &spec(TAG, "tag_id")).await.unwrap();

        let outcome = delete_table(&store, ARTICLE, no_wait()).await.unwrap();

        assert_eq!(outcome, DeleteOutcome::Missing);
        assert_eq!(show_all_tables(&store).await.unwrap(), vec![TAG]);
    }

    #[tokio::test]
    async fn test_delete_twice_never_errors() {
        let store = InMemoryStore::new();
        create_table(&store, &spec(ARTICLE, "article_id"))
            .await
            .unwrap();

        assert_eq!(
            delete_table(&store, ARTICLE, no_wait()).await.unwrap(),
            DeleteOutcome::Deleted
        );
        assert_eq!(
            delete_table(&store, ARTICLE, no_wait()).await.unwrap(),
            DeleteOutcome::Missing
        );
        assert!(show_all_tables(&store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_waits_for_table_to_disappear() {
        let store = SlowDeleteStore {
            inner: InMemoryStore::new(),
            lingering_checks: std::sync::Mutex::new(2),
        };
        create_table(&store, &spec(ACCOUNT, "account_id"))
            .await
            .unwrap();

        let outcome = delete_table(&store, ACCOUNT, no_wait()).await.unwrap();

        assert_eq!(outcome, DeleteOutcome::Deleted);
        assert_eq!(*store.lingering_checks.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_times_out() {
        let store = SlowDeleteStore {
            inner: InMemoryStore::new(),
            lingering_checks: std::sync::Mutex::new(10),
        };
        create_table(&store, &spec(ACCOUNT, "account_id"))
            .await
            .unwrap();

        let result = delete_table(&store, ACCOUNT, no_wait()).await;

        assert_eq!(
            result,
            Err(StoreError::WaitTimeout {
                table_name: ACCOUNT.to_string()
            })
        );
    }

    // ==================== create_table / create_gsi ====================

    #[tokio::test]
    async fn test_create_then_list_contains_table() {
        let store = InMemoryStore::new();
        let handle = create_table(&store, &spec(APPOINTMENT, "appointment_id"))
            .await
            .unwrap();

        assert_eq!(handle.table_name, APPOINTMENT);
        assert!(show_all_tables(&store)
            .await
            .unwrap()
            .contains(&APPOINTMENT.to_string()));
    }

    #[tokio::test]
    async fn test_create_existing_table_fails() {
        let store = InMemoryStore::new();
        create_table(&store, &spec(TAG, "tag_id")).await.unwrap();

        let result = create_table(&store, &spec(TAG, "tag_id")).await;
        assert!(matches!(result, Err(StoreError::AlreadyExists { .. })));
    }

    #[tokio::test]
    async fn test_create_gsi() {
        let store = InMemoryStore::new();
        create_table(&store, &spec(ARTICLE, "article_id"))
            .await
            .unwrap();

        create_gsi(&store, ARTICLE, "TagIndex", "tag_id")
            .await
            .unwrap();

        assert_eq!(store.index_names(ARTICLE).await.unwrap(), vec!["TagIndex"]);
    }

    #[tokio::test]
    async fn test_create_gsi_on_missing_table() {
        let store = InMemoryStore::new();
        let result = create_gsi(&store, ARTICLE, "TagIndex", "tag_id").await;
        assert!(matches!(result, Err(StoreError::TableNotFound { .. })));
    }

    // ==================== insert_data ====================

    #[tokio::test]
    async fn test_insert_strips_tag_id() {
        let store = InMemoryStore::new();
        create_table(&store, &spec(ARTICLE, "article_id"))
            .await
            .unwrap();

        let records = vec![
            Record::from([("article_id", "1"), ("tag_id", "tag1"), ("title", "A")]),
            Record::from([("article_id", "2"), ("title", "B")]),
        ];
        let written = insert_data(&store, ARTICLE, &records).await.unwrap();

        assert_eq!(written, 2);
        let stored = show_all_items(&store, ARTICLE).await.unwrap();
        assert_eq!(stored.len(), 2);
        assert!(stored.iter().all(|r| !r.contains(TAG_ATTRIBUTE)));
        assert_eq!(stored[0].get("title"), Some("A"));
    }

    #[tokio::test]
    async fn test_insert_failure_keeps_prior_writes() {
        let store = InMemoryStore::new();
        create_table(&store, &spec(ACCOUNT, "account_id"))
            .await
            .unwrap();

        let records = vec![
            Record::from([("account_id", "1")]),
            Record::from([("user_id", "2")]),
            Record::from([("account_id", "3")]),
        ];
        let result = insert_data(&store, ACCOUNT, &records).await;

        assert!(matches!(result, Err(StoreError::Validation(_))));
        let stored = show_all_items(&store, ACCOUNT).await.unwrap();
        assert_eq!(stored, vec![Record::from([("account_id", "1")])]);
    }

    // ==================== check_and_add_tag ====================

    #[tokio::test]
    async fn test_check_and_add_tag_is_at_most_once() {
        let store = InMemoryStore::new();
        create_table(&store, &spec(TAG, "tag_id")).await.unwrap();

        assert!(check_and_add_tag(&store, TAG, "tag_id", "tag1")
            .await
            .unwrap());
        assert!(!check_and_add_tag(&store, TAG, "tag_id", "tag1")
            .await
            .unwrap());

        let stored = show_all_items(&store, TAG).await.unwrap();
        assert_eq!(stored, vec![Record::from([("tag_id", "tag1")])]);
    }

    #[tokio::test]
    async fn test_check_and_add_tag_keeps_existing_record() {
        let store = InMemoryStore::new();
        create_table(&store, &spec(TAG, "tag_id")).await.unwrap();
        let existing = Record::from([("tag_id", "tag2"), ("label", "rust")]);
        store.put_item(TAG, &existing).await.unwrap();

        assert!(!check_and_add_tag(&store, TAG, "tag_id", "tag2")
            .await
            .unwrap());
        assert_eq!(
            store.get_item(TAG, "tag_id", "tag2").await.unwrap(),
            Some(existing)
        );
    }

    // ==================== show_all_items ====================

    #[tokio::test]
    async fn test_show_items_returns_first_page_only() {
        let store = InMemoryStore::new().with_page_limit(1);
        create_table(&store, &spec(TAG, "tag_id")).await.unwrap();
        check_and_add_tag(&store, TAG, "tag_id", "a").await.unwrap();
        check_and_add_tag(&store, TAG, "tag_id", "b").await.unwrap();

        let shown = show_all_items(&store, TAG).await.unwrap();
        assert_eq!(shown.len(), 1);
    }

    #[tokio::test]
    async fn test_show_items_missing_table() {
        let store = InMemoryStore::new();
        let result = show_all_items(&store, TAG).await;
        assert!(matches!(result, Err(StoreError::TableNotFound { .. })));
    }

    // ==================== run ====================

    #[tokio::test]
    async fn test_run_against_empty_store() {
        let store = InMemoryStore::new();

        let result = run(&store, no_wait()).await;

        // The rewrite's doctor account is keyed by user_id and rejected.
        assert!(matches!(result, Err(StoreError::Validation(msg)) if msg.contains("account_id")));

        assert_eq!(
            show_all_tables(&store).await.unwrap(),
            vec![ACCOUNT, APPOINTMENT, ARTICLE, TAG]
        );

        let articles = show_all_items(&store, ARTICLE).await.unwrap();
        let ids: Vec<_> = articles.iter().filter_map(|r| r.get("article_id")).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        assert!(articles.iter().all(|r| !r.contains(TAG_ATTRIBUTE)));

        assert!(show_all_items(&store, TAG).await.unwrap().is_empty());

        let accounts = show_all_items(&store, ACCOUNT).await.unwrap();
        let ids: Vec<_> = accounts.iter().filter_map(|r| r.get("account_id")).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        assert_eq!(accounts[0].get("working_time"), Some("9 AM - 5 PM"));
        assert!(accounts.iter().all(|r| !r.contains("user_id")));
    }

    #[tokio::test]
    async fn test_run_replaces_existing_tables() {
        let store = InMemoryStore::new();
        create_table(&store, &spec(ARTICLE, "article_id"))
            .await
            .unwrap();
        store
            .put_item(ARTICLE, &Record::from([("article_id", "99")]))
            .await
            .unwrap();

        let _ = run(&store, no_wait()).await;

        let articles = show_all_items(&store, ARTICLE).await.unwrap();
        assert_eq!(articles.len(), 3);
        assert!(articles.iter().all(|r| r.get("article_id") != Some("99")));
    }

    #[tokio::test]
    async fn test_execute_step_show_items() {
        let store = InMemoryStore::new();
        create_table(&store, &spec(TAG, "tag_id")).await.unwrap();

        let step = Step::ShowItems {
            table_name: TAG.to_string(),
        };
        execute_step(&store, &step, no_wait()).await.unwrap();
    }
}
