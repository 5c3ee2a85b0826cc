//! Core for the tableseed bootstrap tool.
//!
//! Pure data types, the fixed seed fixtures and run plan, and the
//! [`TableStore`] seam the runner drives. Nothing in this crate performs I/O.

pub mod error;
pub mod plan;
pub mod seed;
pub mod store;
pub mod types;

pub use error::{Result, StoreError};
pub use store::{ScanPage, TableStore};
pub use types::{
    GsiSpec, Projection, ProvisionedThroughput, Record, TableHandle, TableSpec, TableStatus, TAG_ATTRIBUTE,
};
