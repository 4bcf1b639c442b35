//! SQLite persistence for the Veritas risk engine.
//!
//! One serialized write connection, a small read pool, versioned
//! migrations over STRICT tables. All rows are append-only except the
//! request state column.

pub mod connection;
pub mod history;
pub mod migrations;
pub mod queries;

pub use connection::DatabaseManager;
pub use history::SqliteHistoryStore;
