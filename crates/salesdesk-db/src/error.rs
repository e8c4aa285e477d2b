//! # Data Access Error Types
//!
//! Error types for database operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DataAccessError (this module) ← driver message kept verbatim          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Service (passes it through untouched)                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Front end shows the message in an error dialog                        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Zero Rows Affected
//! An UPDATE or DELETE whose id matches nothing, or an INSERT that stored
//! nothing, is reported as [`DataAccessError::NoRowsAffected`]. Callers see
//! it as the same kind of failure as a driver fault; nothing in the data
//! access layer tells "not found" and "failed" apart for mutations.

use thiserror::Error;

/// Data access failures.
///
/// Every variant is fatal to the operation that raised it. Nothing in this
/// crate retries or recovers locally.
#[derive(Debug, Error)]
pub enum DataAccessError {
    /// Opening or closing the connection failed.
    ///
    /// ## When This Occurs
    /// - Database file can't be created or opened
    /// - Malformed connection URL
    /// - An unknown PRAGMA passed as a driver property
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Connection configuration could not be loaded.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The driver rejected a statement or failed while reading rows.
    ///
    /// `state` is the SQLite extended result code when the driver reports
    /// one.
    #[error("{message}{}", state_suffix(.state))]
    Driver {
        state: Option<String>,
        message: String,
    },

    /// A mutating statement affected zero rows.
    ///
    /// ## When This Occurs
    /// - UPDATE / DELETE with an id that does not exist
    /// - INSERT that stored nothing
    #[error("{operation} not executed for {entity}{}: no rows affected", id_suffix(.id))]
    NoRowsAffected {
        entity: &'static str,
        operation: &'static str,
        id: Option<i64>,
    },

    /// The entity handed to a DAO can't be used for the requested operation.
    ///
    /// ## When This Occurs
    /// - Inserting an entity that already has an id
    /// - Updating or deleting an entity without an id
    /// - Storing a seller whose department was never saved
    #[error("Invalid {entity}: {reason}")]
    InvalidEntity {
        entity: &'static str,
        reason: String,
    },
}

fn state_suffix(state: &Option<String>) -> String {
    state
        .as_ref()
        .map(|s| format!(" (SQLState={s})"))
        .unwrap_or_default()
}

fn id_suffix(id: &Option<i64>) -> String {
    id.map(|id| format!(" id {id}")).unwrap_or_default()
}

impl DataAccessError {
    /// Creates a NoRowsAffected error.
    pub fn no_rows(entity: &'static str, operation: &'static str, id: Option<i64>) -> Self {
        DataAccessError::NoRowsAffected {
            entity,
            operation,
            id,
        }
    }

    /// Creates an InvalidEntity error.
    pub fn invalid(entity: &'static str, reason: impl Into<String>) -> Self {
        DataAccessError::InvalidEntity {
            entity,
            reason: reason.into(),
        }
    }
}

/// Convert sqlx errors to DataAccessError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::Database   → Driver { state: extended code, message }
/// sqlx::Error::Io / Tls   → ConnectionFailed
/// Other                   → Driver { state: None, message }
/// ```
impl From<sqlx::Error> for DataAccessError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => DataAccessError::Driver {
                state: db_err.code().map(|c| c.into_owned()),
                message: db_err.message().to_string(),
            },

            sqlx::Error::Io(_) | sqlx::Error::Tls(_) => {
                DataAccessError::ConnectionFailed(err.to_string())
            }

            _ => DataAccessError::Driver {
                state: None,
                message: err.to_string(),
            },
        }
    }
}

impl From<toml::de::Error> for DataAccessError {
    fn from(err: toml::de::Error) -> Self {
        DataAccessError::InvalidConfig(err.to_string())
    }
}

/// Result type for data access operations.
pub type DataAccessResult<T> = Result<T, DataAccessError>;

// =============================================================================
// Unit Tests
// =============================================================================
