//! Provision, seed and inspect the sample tables.
//!
//! The runner drives any [`tableseed_core::TableStore`]; `storage` provides the
//! DynamoDB backend and an in-memory stand-in.

pub mod config;
pub mod prelude;
pub mod runner;
pub mod storage;
