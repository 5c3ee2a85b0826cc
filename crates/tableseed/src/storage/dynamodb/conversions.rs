//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between DynamoDB AttributeValue maps and records.
//! These are testable in isolation without DynamoDB access.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::{self as ddb, AttributeValue};
use tableseed_core::{ProvisionedThroughput, Record, StoreError, TableStatus};

use super::error::map_build_error;

/// Convert a Record to a DynamoDB item. Every attribute is written as `S`.
pub fn record_to_item(record: &Record) -> HashMap<String, AttributeValue> {
    record
        .iter()
        .map(|(name, value)| (name.to_string(), AttributeValue::S(value.to_string())))
        .collect()
}

/// Convert a DynamoDB item to a Record.
///
/// Numbers and booleans keep their textual form; other attribute types are rejected.
pub fn item_to_record(item: &HashMap<String, AttributeValue>) -> Result<Record, StoreError> {
    item.iter()
        .map(|(name, value)| {
            let text = match value {
                AttributeValue::S(s) => s.clone(),
                AttributeValue::N(n) => n.clone(),
                AttributeValue::Bool(b) => b.to_string(),
                other => {
                    return Err(StoreError::InvalidData(format!(
                        "attribute '{}' has unsupported type: {:?}",
                        name, other
                    )))
                }
            };
            Ok((name.clone(), text))
        })
        .collect()
}

/// Build the key map for a single string HASH key.
pub fn key_item(key_attribute: &str, key_value: &str) -> HashMap<String, AttributeValue> {
    HashMap::from([(
        key_attribute.to_string(),
        AttributeValue::S(key_value.to_string()),
    )])
}

/// Map the SDK table status, treating unknown values as active.
pub fn to_table_status(status: Option<&ddb::TableStatus>) -> TableStatus {
    match status {
        Some(ddb::TableStatus::Creating) => TableStatus::Creating,
        Some(ddb::TableStatus::Updating) => TableStatus::Updating,
        Some(ddb::TableStatus::Deleting) => TableStatus::Deleting,
        _ => TableStatus::Active,
    }
}

pub fn hash_key_schema(key_attribute: &str) -> Result<ddb::KeySchemaElement, StoreError> {
    ddb::KeySchemaElement::builder()
        .attribute_name(key_attribute)
        .key_type(ddb::KeyType::Hash)
        .build()
        .map_err(map_build_error)
}

pub fn string_attribute(key_attribute: &str) -> Result<ddb::AttributeDefinition, StoreError> {
    ddb::AttributeDefinition::builder()
        .attribute_name(key_attribute)
        .attribute_type(ddb::ScalarAttributeType::S)
        .build()
        .map_err(map_build_error)
}

pub fn provisioned_throughput(
    throughput: &ProvisionedThroughput,
) -> Result<ddb::ProvisionedThroughput, StoreError> {
    ddb::ProvisionedThroughput::builder()
        .read_capacity_units(i64::from(throughput.read_capacity))
        .write_capacity_units(i64::from(throughput.write_capacity))
        .build()
        .map_err(map_build_error)
}
