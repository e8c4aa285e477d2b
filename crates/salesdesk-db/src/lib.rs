//! # salesdesk-db: Data Access Layer for SalesDesk
//!
//! This crate stores and loads departments and sellers. It uses SQLite
//! through sqlx over a single, lazily opened connection.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        SalesDesk Data Flow                              │
//! │                                                                         │
//! │  Front end (department list, seller form, ...)                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   salesdesk-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────────┐   ┌──────────────┐   ┌───────────────────┐  │   │
//! │  │   │   Services   │──►│     DAOs     │──►│ ConnectionProvider│  │   │
//! │  │   │ save/remove  │   │ (dao/*.rs)   │   │  (connection.rs)  │  │   │
//! │  │   │ find_all     │   │ DaoFactory   │   │  one connection   │  │   │
//! │  │   └──────────────┘   └──────────────┘   └─────────┬─────────┘  │   │
//! │  │                                                   │ config.rs   │   │
//! │  └───────────────────────────────────────────────────┼─────────────┘   │
//! │                                                      ▼                  │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              SQLite: department, seller                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`config`] - Connection URL and driver properties
//! - [`connection`] - The single-connection provider
//! - [`schema`] - Creates missing tables
//! - [`error`] - `DataAccessError`
//! - [`dao`] - DAO traits, SQLite DAOs, factory
//! - [`service`] - Insert-or-update services
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use salesdesk_db::{ConnectionProvider, DaoFactory, DepartmentService, FileConfig};
//!
//! let provider = Arc::new(ConnectionProvider::new(FileConfig::default()));
//! let factory = DaoFactory::new(provider.clone());
//!
//! let departments = DepartmentService::from_factory(&factory);
//! let mut books = Department::new("Books");
//! departments.save_or_update(&mut books).await?; // books.id is now set
//!
//! provider.close_connection().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod connection;
pub mod dao;
pub mod error;
pub mod schema;
pub mod service;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{ConfigSource, ConnectionSettings, FileConfig};
pub use connection::ConnectionProvider;
pub use dao::{DaoFactory, DepartmentDao, SellerDao, SqliteDepartmentDao, SqliteSellerDao};
pub use error::{DataAccessError, DataAccessResult};
pub use service::{DepartmentService, SellerService};

// =============================================================================
// Unit Tests
// =============================================================================
