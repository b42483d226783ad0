//! SQLite backend for the playlog warehouse.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated
//! thread without blocking the async runtime. Each `load_*` call is one
//! transaction — the per-file commit boundary of the batch driver.

mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteWarehouse;
