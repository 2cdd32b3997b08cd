//! MySQL-protocol database backend implementation

use crate::error::{DbError, DbResult};
use crate::traits::Database;
use async_trait::async_trait;
use dtb_core::config::is_plain_identifier;
use sqlx::mysql::MySqlConnection;
use sqlx::{Connection, Executor};
use tokio::sync::Mutex;
use url::Url;

/// MySQL-protocol backend over a single connection
///
/// Session state (time zone, the scratch table) must survive between
/// statements, so every statement goes through the same connection rather
/// than a pool.
pub struct MySqlBackend {
    conn: Mutex<MySqlConnection>,
}

impl MySqlBackend {
    /// Open a connection from a `mysql://` URL
    pub async fn connect(url: &str) -> DbResult<Self> {
        let conn = MySqlConnection::connect(url)
            .await
            .map_err(|e| DbError::ConnectionError(e.to_string()))?;
        log::debug!("Connected to {}", redact_url(url));
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Close the connection gracefully
    pub async fn close(self) -> DbResult<()> {
        self.conn.into_inner().close().await?;
        Ok(())
    }
}

#[async_trait]
impl Database for MySqlBackend {
    async fn execute(&self, sql: &str) -> DbResult<u64> {
        let mut conn = self.conn.lock().await;
        log::debug!("Executing: {}", sql);
        // A bare string with no arguments goes over the text protocol, so
        // DDL and SET statements need no preparation.
        let result = Executor::execute(&mut *conn, sql).await?;
        Ok(result.rows_affected())
    }

    async fn drop_table_if_exists(&self, name: &str) -> DbResult<()> {
        if !is_plain_identifier(name) {
            return Err(DbError::InvalidIdentifier(name.to_string()));
        }
        self.execute(&format!("DROP TABLE IF EXISTS {}", name)).await?;
        Ok(())
    }

    async fn set_time_zone(&self, zone: &str) -> DbResult<()> {
        let sql = format!("SET SESSION time_zone = '{}'", zone.replace('\'', "''"));
        self.execute(&sql).await?;
        Ok(())
    }

    fn db_type(&self) -> &'static str {
        "mysql"
    }
}

/// Connection URL without its password, for logging.
fn redact_url(url: &str) -> String {
    match Url::parse(url) {
        Ok(mut parsed) => {
            // Fails only for URLs without a host, which carry no password.
            let _ = parsed.set_password(None);
            parsed.into()
        }
        Err(_) => "<invalid url>".to_string(),
    }
}
