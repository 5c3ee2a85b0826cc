//! DynamoDB error mapping.
//!
//! Maps AWS SDK errors to `StoreError` from `tableseed_core`.

use std::error::Error;
use std::fmt::Debug;

use aws_sdk_dynamodb::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_dynamodb::operation::create_table::CreateTableError;
use aws_sdk_dynamodb::operation::delete_table::DeleteTableError;
use aws_sdk_dynamodb::operation::describe_table::DescribeTableError;
use aws_sdk_dynamodb::operation::get_item::GetItemError;
use aws_sdk_dynamodb::operation::list_tables::ListTablesError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::scan::ScanError;
use aws_sdk_dynamodb::operation::update_table::UpdateTableError;
use tableseed_core::StoreError;

/// Returns a `ConnectionFailed` error if the request never got a response.
fn connection_failure<E, R>(err: &SdkError<E, R>) -> Option<StoreError>
where
    E: Error + 'static,
    R: Debug,
{
    match err {
        SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) => Some(
            StoreError::ConnectionFailed(DisplayErrorContext(err).to_string()),
        ),
        _ => None,
    }
}

/// Maps a service error the SDK has no variant for.
///
/// DynamoDB reports schema violations as an unmodeled `ValidationException`.
fn unmodeled<E: ProvideErrorMetadata + Debug>(err: E, operation: &str) -> StoreError {
    match err.code() {
        Some("ValidationException") => StoreError::Validation(
            err.message()
                .unwrap_or("request rejected by the table schema")
                .to_string(),
        ),
        _ => StoreError::RequestFailed(format!("{} failed: {:?}", operation, err)),
    }
}

fn table_not_found(table_name: &str) -> StoreError {
    StoreError::TableNotFound {
        table_name: table_name.to_string(),
    }
}

/// Map a ListTables SDK error to StoreError.
pub fn map_list_tables_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<ListTablesError, R>,
) -> StoreError {
    if let Some(e) = connection_failure(&err) {
        return e;
    }
    match err.into_service_error() {
        ListTablesError::InternalServerError(_) => {
            StoreError::RequestFailed("DynamoDB internal server error".to_string())
        }
        err => unmodeled(err, "ListTables"),
    }
}

/// Map a DescribeTable SDK error to StoreError.
pub fn map_describe_table_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<DescribeTableError, R>,
    table_name: &str,
) -> StoreError {
    if let Some(e) = connection_failure(&err) {
        return e;
    }
    match err.into_service_error() {
        DescribeTableError::ResourceNotFoundException(_) => table_not_found(table_name),
        DescribeTableError::InternalServerError(_) => {
            StoreError::RequestFailed("DynamoDB internal server error".to_string())
        }
        err => unmodeled(err, "DescribeTable"),
    }
}

/// Map a CreateTable SDK error to StoreError.
pub fn map_create_table_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<CreateTableError, R>,
    table_name: &str,
) -> StoreError {
    if let Some(e) = connection_failure(&err) {
        return e;
    }
    match err.into_service_error() {
        CreateTableError::ResourceInUseException(_) => StoreError::AlreadyExists {
            table_name: table_name.to_string(),
        },
        CreateTableError::LimitExceededException(_) => {
            StoreError::RequestFailed("Table limit exceeded".to_string())
        }
        CreateTableError::InternalServerError(_) => {
            StoreError::RequestFailed("DynamoDB internal server error".to_string())
        }
        err => unmodeled(err, "CreateTable"),
    }
}

/// Map an UpdateTable SDK error to StoreError.
pub fn map_update_table_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<UpdateTableError, R>,
    table_name: &str,
) -> StoreError {
    if let Some(e) = connection_failure(&err) {
        return e;
    }
    match err.into_service_error() {
        UpdateTableError::ResourceNotFoundException(_) => table_not_found(table_name),
        UpdateTableError::ResourceInUseException(_) => {
            StoreError::RequestFailed(format!("Table '{}' is busy", table_name))
        }
        UpdateTableError::LimitExceededException(_) => {
            StoreError::RequestFailed("Index limit exceeded".to_string())
        }
        UpdateTableError::InternalServerError(_) => {
            StoreError::RequestFailed("DynamoDB internal server error".to_string())
        }
        err => unmodeled(err, "UpdateTable"),
    }
}

/// Map a DeleteTable SDK error to StoreError.
pub fn map_delete_table_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<DeleteTableError, R>,
    table_name: &str,
) -> StoreError {
    if let Some(e) = connection_failure(&err) {
        return e;
    }
    match err.into_service_error() {
        DeleteTableError::ResourceNotFoundException(_) => table_not_found(table_name),
        DeleteTableError::ResourceInUseException(_) => {
            StoreError::RequestFailed(format!("Table '{}' is busy", table_name))
        }
        DeleteTableError::InternalServerError(_) => {
            StoreError::RequestFailed("DynamoDB internal server error".to_string())
        }
        err => unmodeled(err, "DeleteTable"),
    }
}

/// Map a PutItem SDK error to StoreError.
pub fn map_put_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<PutItemError, R>,
    table_name: &str,
) -> StoreError {
    if let Some(e) = connection_failure(&err) {
        return e;
    }
    match err.into_service_error() {
        PutItemError::ResourceNotFoundException(_) => table_not_found(table_name),
        PutItemError::ProvisionedThroughputExceededException(_) => {
            StoreError::RequestFailed("Throughput exceeded".to_string())
        }
        PutItemError::RequestLimitExceeded(_) => {
            StoreError::RequestFailed("Request limit exceeded".to_string())
        }
        PutItemError::ItemCollectionSizeLimitExceededException(_) => {
            StoreError::RequestFailed("Item collection size limit exceeded".to_string())
        }
        PutItemError::InternalServerError(_) => {
            StoreError::RequestFailed("DynamoDB internal server error".to_string())
        }
        err => unmodeled(err, "PutItem"),
    }
}

/// Map a GetItem SDK error to StoreError.
pub fn map_get_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<GetItemError, R>,
    table_name: &str,
) -> StoreError {
    if let Some(e) = connection_failure(&err) {
        return e;
    }
    match err.into_service_error() {
        GetItemError::ResourceNotFoundException(_) => table_not_found(table_name),
        GetItemError::ProvisionedThroughputExceededException(_) => {
            StoreError::RequestFailed("Throughput exceeded".to_string())
        }
        GetItemError::RequestLimitExceeded(_) => {
            StoreError::RequestFailed("Request limit exceeded".to_string())
        }
        GetItemError::InternalServerError(_) => {
            StoreError::RequestFailed("DynamoDB internal server error".to_string())
        }
        err => unmodeled(err, "GetItem"),
    }
}

/// Map a Scan SDK error to StoreError.
pub fn map_scan_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<ScanError, R>,
    table_name: &str,
) -> StoreError {
    if let Some(e) = connection_failure(&err) {
        return e;
    }
    match err.into_service_error() {
        ScanError::ResourceNotFoundException(_) => table_not_found(table_name),
        ScanError::ProvisionedThroughputExceededException(_) => {
            StoreError::RequestFailed("Throughput exceeded".to_string())
        }
        ScanError::RequestLimitExceeded(_) => {
            StoreError::RequestFailed("Request limit exceeded".to_string())
        }
        ScanError::InternalServerError(_) => {
            StoreError::RequestFailed("DynamoDB internal server error".to_string())
        }
        err => unmodeled(err, "Scan"),
    }
}

/// Map a request builder error to StoreError.
pub fn map_build_error(err: impl std::fmt::Display) -> StoreError {
    StoreError::InvalidData(err.to_string())
}
