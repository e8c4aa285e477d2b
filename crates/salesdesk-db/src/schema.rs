//! # Schema Bootstrap
//!
//! Creates the two tables the DAOs depend on when they are missing.
//!
//! ## Tables
//! ```text
//! ┌──────────────────────────────┐        ┌──────────────────────────────┐
//! │ department                   │        │ seller                       │
//! │ ──────────────────────────── │        │ ──────────────────────────── │
//! │ Id    INTEGER PK (generated) │◄───────│ DepartmentId INTEGER FK      │
//! │ Name  TEXT                   │        │ Id           INTEGER PK      │
//! └──────────────────────────────┘        │ Name, Email  TEXT            │
//!                                         │ BirthDate    DATE            │
//!                                         │ BaseSalary   REAL            │
//!                                         └──────────────────────────────┘
//! ```
//!
//! This is not a migration system: the statements are idempotent
//! `CREATE ... IF NOT EXISTS` and never alter an existing table. BaseSalary
//! is declared REAL so SQLite keeps the decimal as stored instead of
//! coercing whole amounts to INTEGER.

use tracing::info;

use crate::connection::ConnectionProvider;
use crate::error::DataAccessResult;

const CREATE_DEPARTMENT: &str = r#"
    CREATE TABLE IF NOT EXISTS department (
        Id   INTEGER PRIMARY KEY AUTOINCREMENT,
        Name TEXT NOT NULL
    )
"#;

const CREATE_SELLER: &str = r#"
    CREATE TABLE IF NOT EXISTS seller (
        Id           INTEGER PRIMARY KEY AUTOINCREMENT,
        Name         TEXT NOT NULL,
        Email        TEXT NOT NULL,
        BirthDate    DATE NOT NULL,
        BaseSalary   REAL NOT NULL,
        DepartmentId INTEGER NOT NULL REFERENCES department (Id)
    )
"#;

const CREATE_SELLER_DEPARTMENT_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_seller_department ON seller (DepartmentId)";

/// Tables the data access layer reads and writes.
pub const TABLES: &[&str] = &["department", "seller"];

/// Creates any missing table. Safe to run on every startup.
pub async fn install(provider: &ConnectionProvider) -> DataAccessResult<()> {
    info!("Installing schema");

    let mut conn = provider.connection().await?;
    for ddl in [CREATE_DEPARTMENT, CREATE_SELLER, CREATE_SELLER_DEPARTMENT_INDEX] {
        sqlx::query(ddl).persistent(false).execute(&mut *conn).await?;
    }

    info!("Schema ready");
    Ok(())
}

/// Returns which of [`TABLES`] currently exist, in that order.
///
/// For diagnostics.
pub async fn installed_tables(provider: &ConnectionProvider) -> DataAccessResult<Vec<String>> {
    let mut conn = provider.connection().await?;

    let names: Vec<String> = sqlx::query_scalar(
        "SELECT name FROM sqlite_master WHERE type = 'table' AND name IN ('department', 'seller')",
    )
    .persistent(false)
    .fetch_all(&mut *conn)
    .await?;

    Ok(TABLES
        .iter()
        .filter(|t| names.iter().any(|n| n == *t))
        .map(|t| t.to_string())
        .collect())
}

// =============================================================================
// Unit Tests
// =============================================================================
