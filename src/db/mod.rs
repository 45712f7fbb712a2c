//! Database module: models and schema for persistent storage.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `sqlite.rs`: pool construction and schema bootstrap
//! - `admins.rs` / `messages.rs`: one storage handle per table

pub mod admins;
pub mod messages;
pub mod models;
pub mod schema;
pub mod sqlite;

pub use admins::AdminStorage;
pub use messages::MessageStorage;
pub use models::{DbAdmin, DbMessage, MessageStats, NewMessage};
pub use schema::SQLITE_INIT;
pub use sqlite::{SqlitePool, connect, init_schema};
