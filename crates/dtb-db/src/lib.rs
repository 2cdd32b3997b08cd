//! dtb-db - Database abstraction layer for datebound
//!
//! This crate provides the `Database` trait, the only surface the case
//! executor needs from a server, and its implementation for MySQL-protocol
//! servers (MySQL, TiDB, MariaDB).

pub mod error;
pub mod mysql;
pub mod traits;

pub use error::{DbError, DbResult};
pub use mysql::MySqlBackend;
pub use traits::Database;
