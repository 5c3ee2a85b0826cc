use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Attribute dropped from every record before it is written.
///
/// Tags are meant to live in their own table, referenced by id.
pub const TAG_ATTRIBUTE: &str = "tag_id";

/// Provisioned read/write capacity units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProvisionedThroughput {
    pub read_capacity: u32,
    pub write_capacity: u32,
}

impl ProvisionedThroughput {
    pub const fn new(read_capacity: u32, write_capacity: u32) -> Self {
        Self {
            read_capacity,
            write_capacity,
        }
    }

    /// Returns true if both capacities are positive.
    pub fn is_valid(&self) -> bool {
        self.read_capacity > 0 && self.write_capacity > 0
    }
}

/// Schema of a table with a single string HASH key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSpec {
    pub name: String,
    pub key_attribute: String,
    pub throughput: ProvisionedThroughput,
}

impl TableSpec {
    /// Creates a new table spec.
    pub fn new(
        name: impl Into<String>,
        key_attribute: impl Into<String>,
        read_capacity: u32,
        write_capacity: u32,
    ) -> Self {
        Self {
            name: name.into(),
            key_attribute: key_attribute.into(),
            throughput: ProvisionedThroughput::new(read_capacity, write_capacity),
        }
    }
}

/// GSI projection type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    All,
}

/// Global Secondary Index definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GsiSpec {
    pub index_name: String,
    pub key_attribute: String,
    pub projection: Projection,
    pub throughput: ProvisionedThroughput,
}

impl GsiSpec {
    /// Capacity every index is created with.
    pub const THROUGHPUT: ProvisionedThroughput = ProvisionedThroughput::new(5, 5);

    /// Creates an index spec projecting all attributes at 5/5 capacity.
    pub fn new(index_name: impl Into<String>, key_attribute: impl Into<String>) -> Self {
        Self {
            index_name: index_name.into(),
            key_attribute: key_attribute.into(),
            projection: Projection::All,
            throughput: Self::THROUGHPUT,
        }
    }
}

/// Table status as reported by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableStatus {
    Creating,
    Active,
    Updating,
    Deleting,
}

/// Handle to a table returned by create-table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableHandle {
    pub table_name: String,
    pub status: TableStatus,
}

/// A stored item: attribute name to string value, ordered by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(BTreeMap<String, String>);

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an attribute, returning the record.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Returns a copy of the record without the given attribute.
    pub fn without(&self, name: &str) -> Self {
        Self(
            self.0
                .iter()
                .filter(|(k, _)| k.as_str() != name)
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<const N: usize> From<[(&str, &str); N]> for Record {
    fn from(pairs: [(&str, &str); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(&self.0).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}
