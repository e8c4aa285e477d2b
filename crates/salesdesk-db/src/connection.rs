//! # Connection Provider
//!
//! Owns the one database connection the data access layer uses.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Connection Lifecycle                               │
//! │                                                                         │
//! │  ConnectionProvider::new(config_source)   ← nothing opened yet         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  first connection() call                                               │
//! │       ├── config_source.load()  (url + driver properties)              │
//! │       ├── open SqliteConnection (foreign keys on, PRAGMAs applied)     │
//! │       └── memoize it                                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  later connection() calls ──► same memoized connection                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  close_connection() ──► close + forget (next call reopens)             │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership
//! The provider is a plain value handed to whoever needs it (usually inside
//! an `Arc` shared by the DAOs). There is no global connection, so tests can
//! run any number of isolated in-memory sessions side by side.
//!
//! ## Statements and Cursors
//! The connection guard returned by [`ConnectionProvider::connection`] is
//! held for exactly one statement. DAO statements are non-persistent, so the
//! prepared statement is finalized when the call finishes, and row cursors
//! are dropped with the call on every exit path.
//! [`ConnectionProvider::release_statements`] clears whatever the driver
//! still caches.

use std::fmt;
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::{ConnectOptions, Connection};
use tokio::sync::{MappedMutexGuard, Mutex, MutexGuard};
use tracing::{debug, info};

use crate::config::{ConfigSource, ConnectionSettings};
use crate::error::{DataAccessError, DataAccessResult};

/// Lazily opened, memoized single database connection.
pub struct ConnectionProvider {
    source: Box<dyn ConfigSource>,
    conn: Mutex<Option<SqliteConnection>>,
}

impl ConnectionProvider {
    /// Creates a provider. No connection is opened until first use.
    pub fn new(source: impl ConfigSource + 'static) -> Self {
        ConnectionProvider {
            source: Box::new(source),
            conn: Mutex::new(None),
        }
    }

    /// Provider for a private in-memory database (for testing).
    pub fn in_memory() -> Self {
        ConnectionProvider::new(ConnectionSettings::in_memory())
    }

    /// Returns the live connection, opening it on first call.
    ///
    /// The returned guard gives exclusive use of the connection; drop it as
    /// soon as the statement is done.
    ///
    /// ## Returns
    /// * `Ok(guard)` - Connection ready for a statement
    /// * `Err(DataAccessError::ConnectionFailed)` - Could not open
    /// * `Err(DataAccessError::InvalidConfig)` - Config source failed
    pub async fn connection(&self) -> DataAccessResult<MappedMutexGuard<'_, SqliteConnection>> {
        let mut slot = self.conn.lock().await;

        if slot.is_none() {
            *slot = Some(self.open().await?);
        }

        MutexGuard::try_map(slot, |conn| conn.as_mut()).map_err(|_| {
            DataAccessError::ConnectionFailed("connection is not open".to_string())
        })
    }

    async fn open(&self) -> DataAccessResult<SqliteConnection> {
        let settings = self.source.load()?;

        info!(url = %settings.url, "Opening database connection");

        let mut options = SqliteConnectOptions::from_str(&settings.url)
            .map_err(|e| DataAccessError::ConnectionFailed(e.to_string()))?
            // SQLite has foreign keys disabled by default
            .foreign_keys(true)
            .create_if_missing(true);

        for (key, value) in settings.properties {
            debug!(pragma = %key, value = %value, "Applying driver property");
            options = options.pragma(key, value);
        }

        let conn = options
            .connect()
            .await
            .map_err(|e| DataAccessError::ConnectionFailed(e.to_string()))?;

        info!("Database connection open");
        Ok(conn)
    }

    /// Closes the connection if one is open and forgets it.
    ///
    /// A no-op when the connection was never opened or is already closed.
    /// The next [`connection`](Self::connection) call opens a fresh one.
    pub async fn close_connection(&self) -> DataAccessResult<()> {
        let mut slot = self.conn.lock().await;

        if let Some(conn) = slot.take() {
            info!("Closing database connection");
            conn.close()
                .await
                .map_err(|e| DataAccessError::ConnectionFailed(e.to_string()))?;
        }

        Ok(())
    }

    /// Releases prepared statements cached on the open connection.
    ///
    /// A no-op when no connection is open.
    pub async fn release_statements(&self) -> DataAccessResult<()> {
        let mut slot = self.conn.lock().await;

        if let Some(conn) = slot.as_mut() {
            debug!(cached = conn.cached_statements_size(), "Releasing statements");
            conn.clear_cached_statements().await?;
        }

        Ok(())
    }

    /// Number of prepared statements the driver still caches.
    pub async fn cached_statements(&self) -> usize {
        let slot = self.conn.lock().await;
        slot.as_ref().map_or(0, |conn| conn.cached_statements_size())
    }

    /// True while a connection is memoized.
    pub async fn is_open(&self) -> bool {
        self.conn.lock().await.is_some()
    }
}

impl fmt::Debug for ConnectionProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionProvider").finish_non_exhaustive()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use sqlx::Row;

    use super::*;

    #[tokio::test]
    async fn test_lazy_open_and_memoize() {
        let provider = ConnectionProvider::in_memory();
        assert!(!provider.is_open().await);

        {
            let mut conn = provider.connection().await.unwrap();
            sqlx::query("CREATE TABLE marker (x INTEGER)")
                .execute(&mut *conn)
                .await
                .unwrap();
        }
        assert!(provider.is_open().await);

        // Same in-memory database means the same connection was reused.
        let mut conn = provider.connection().await.unwrap();
        let row = sqlx::query("SELECT COUNT(*) AS n FROM marker")
            .fetch_one(&mut *conn)
            .await
            .unwrap();
        assert_eq!(row.get::<i64, _>("n"), 0);
    }

    #[tokio::test]
    async fn test_close_is_idempotent() {
        let provider = ConnectionProvider::in_memory();
        provider.close_connection().await.unwrap();

        provider.connection().await.unwrap();
        provider.close_connection().await.unwrap();
        assert!(!provider.is_open().await);
        provider.close_connection().await.unwrap();
    }

    #[tokio::test]
    async fn test_reopen_after_close() {
        let provider = ConnectionProvider::in_memory();
        {
            let mut conn = provider.connection().await.unwrap();
            sqlx::query("CREATE TABLE marker (x INTEGER)")
                .execute(&mut *conn)
                .await
                .unwrap();
        }
        provider.close_connection().await.unwrap();

        // A fresh in-memory database no longer has the table.
        let mut conn = provider.connection().await.unwrap();
        let result = sqlx::query("SELECT * FROM marker").fetch_all(&mut *conn).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_release_statements() {
        let provider = ConnectionProvider::in_memory();
        provider.release_statements().await.unwrap();

        {
            let mut conn = provider.connection().await.unwrap();
            sqlx::query("SELECT 1").execute(&mut *conn).await.unwrap();
        }
        assert!(provider.cached_statements().await >= 1);

        provider.release_statements().await.unwrap();
        assert_eq!(provider.cached_statements().await, 0);
    }

    #[tokio::test]
    async fn test_driver_properties_applied() {
        let provider = ConnectionProvider::new(
            ConnectionSettings::in_memory().property("user_version", "42"),
        );
        let mut conn = provider.connection().await.unwrap();
        let version: i64 = sqlx::query_scalar("PRAGMA user_version")
            .fetch_one(&mut *conn)
            .await
            .unwrap();
        assert_eq!(version, 42);
    }

    #[tokio::test]
    async fn test_bad_url_fails() {
        let provider = ConnectionProvider::new(ConnectionSettings::new(
            "sqlite:///definitely/missing/dir/sales.db",
        ));
        let err = provider.connection().await.unwrap_err();
        assert!(matches!(err, DataAccessError::ConnectionFailed(_)));
        assert!(!provider.is_open().await);
    }
}
