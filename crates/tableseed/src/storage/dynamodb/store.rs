//! DynamoDB table store implementation.

use async_trait::async_trait;
use aws_sdk_dynamodb::types::{
    CreateGlobalSecondaryIndexAction, GlobalSecondaryIndexUpdate, Projection, ProjectionType,
};
use aws_sdk_dynamodb::Client;
use tableseed_core::{
    GsiSpec, Record, Result, ScanPage, StoreError, TableHandle, TableSpec, TableStore,
};

use super::conversions::{
    hash_key_schema, item_to_record, key_item, provisioned_throughput, record_to_item,
    string_attribute, to_table_status,
};
use super::error::{
    map_build_error, map_create_table_error, map_delete_table_error, map_describe_table_error,
    map_get_item_error, map_list_tables_error, map_put_item_error, map_scan_error,
    map_update_table_error,
};

/// `TableStore` backed by a DynamoDB endpoint.
pub struct DynamoDbStore {
    client: Client,
}

impl DynamoDbStore {
    /// Creates a new store with the given DynamoDB client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TableStore for DynamoDbStore {
    async fn list_tables(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        let mut start_after: Option<String> = None;

        loop {
            let result = self
                .client
                .list_tables()
                .set_exclusive_start_table_name(start_after.take())
                .send()
                .await
                .map_err(map_list_tables_error)?;

            names.extend(result.table_names.unwrap_or_default());

            match result.last_evaluated_table_name {
                Some(last) => start_after = Some(last),
                None => break,
            }
        }

        Ok(names)
    }

    async fn table_exists(&self, table_name: &str) -> Result<bool> {
        match self
            .client
            .describe_table()
            .table_name(table_name)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(err) => match map_describe_table_error(err, table_name) {
                StoreError::TableNotFound { .. } => Ok(false),
                err => Err(err),
            },
        }
    }

    async fn create_table(&self, spec: &TableSpec) -> Result<TableHandle> {
        let result = self
            .client
            .create_table()
            .table_name(&spec.name)
            .key_schema(hash_key_schema(&spec.key_attribute)?)
            .attribute_definitions(string_attribute(&spec.key_attribute)?)
            .provisioned_throughput(provisioned_throughput(&spec.throughput)?)
            .send()
            .await
            .map_err(|e| map_create_table_error(e, &spec.name))?;

        let status = to_table_status(
            result
                .table_description()
                .and_then(|table| table.table_status()),
        );

        Ok(TableHandle {
            table_name: spec.name.clone(),
            status,
        })
    }

    async fn add_global_secondary_index(&self, table_name: &str, gsi: &GsiSpec) -> Result<()> {
        let create = CreateGlobalSecondaryIndexAction::builder()
            .index_name(&gsi.index_name)
            .key_schema(hash_key_schema(&gsi.key_attribute)?)
            .projection(
                Projection::builder()
                    .projection_type(ProjectionType::All)
                    .build(),
            )
            .provisioned_throughput(provisioned_throughput(&gsi.throughput)?)
            .build()
            .map_err(map_build_error)?;

        self.client
            .update_table()
            .table_name(table_name)
            .attribute_definitions(string_attribute(&gsi.key_attribute)?)
            .global_secondary_index_updates(
                GlobalSecondaryIndexUpdate::builder().create(create).build(),
            )
            .send()
            .await
            .map_err(|e| map_update_table_error(e, table_name))?;

        Ok(())
    }

    async fn delete_table(&self, table_name: &str) -> Result<()> {
        self.client
            .delete_table()
            .table_name(table_name)
            .send()
            .await
            .map_err(|e| map_delete_table_error(e, table_name))?;

        Ok(())
    }

    async fn put_item(&self, table_name: &str, record: &Record) -> Result<()> {
        self.client
            .put_item()
            .table_name(table_name)
            .set_item(Some(record_to_item(record)))
            .send()
            .await
            .map_err(|e| map_put_item_error(e, table_name))?;

        Ok(())
    }

    async fn get_item(
        &self,
        table_name: &str,
        key_attribute: &str,
        key_value: &str,
    ) -> Result<Option<Record>> {
        let result = self
            .client
            .get_item()
            .table_name(table_name)
            .set_key(Some(key_item(key_attribute, key_value)))
            .send()
            .await
            .map_err(|e| map_get_item_error(e, table_name))?;

        match result.item {
            Some(item) => Ok(Some(item_to_record(&item)?)),
            None => Ok(None),
        }
    }

    async fn scan(&self, table_name: &str) -> Result<ScanPage> {
        let result = self
            .client
            .scan()
            .table_name(table_name)
            .send()
            .await
            .map_err(|e| map_scan_error(e, table_name))?;

        let records = result
            .items
            .unwrap_or_default()
            .iter()
            .map(item_to_record)
            .collect::<Result<Vec<_>>>()?;

        Ok(ScanPage {
            records,
            has_more: result.last_evaluated_key.is_some(),
        })
    }
}
