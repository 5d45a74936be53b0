//! Shared MongoDB connection and fixture helpers for test suites
//!
//! Construct one [`TestDb`], [`initialize`](TestDb::initialize) it before
//! the suite runs, pass it by reference to the fixture operations, and
//! [`close`](TestDb::close) it once the suite is done.

pub mod config;
pub mod connection;
pub mod document;
pub mod error;
pub mod fixtures;

#[cfg(test)]
pub mod test_fixtures;

// Re-export the driver for callers that need direct collection access
pub use mongodb;

pub use config::TestDbConfig;
pub use connection::{Lifecycle, TestDb};
pub use document::{ID_FIELD, id_filter, without_field, without_id};
pub use error::{Result, TestDbError};
pub use fixtures::{
    collection_snapshot, fill_collection, flush_database, object_snapshot, remove_collections,
    update_object,
};
