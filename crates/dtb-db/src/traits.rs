//! Database trait definition

use crate::error::DbResult;
use async_trait::async_trait;

/// Statement execution boundary used by the case executor
///
/// Implementations must be Send + Sync for async operation. Statements are
/// plain text; no transactions, prepared statements or cursors are needed.
#[async_trait]
pub trait Database: Send + Sync {
    /// Execute one statement, returning affected rows
    async fn execute(&self, sql: &str) -> DbResult<u64>;

    /// Drop a table if it exists
    async fn drop_table_if_exists(&self, name: &str) -> DbResult<()>;

    /// Set the session time zone for subsequent statements
    async fn set_time_zone(&self, zone: &str) -> DbResult<()>;

    /// Database type identifier for logging
    fn db_type(&self) -> &'static str;
}
