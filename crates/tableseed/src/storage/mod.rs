//! Table store backends.

mod dynamodb;
mod inmemory;

pub use dynamodb::{create_client, DynamoDbStore};
pub use inmemory::InMemoryStore;
