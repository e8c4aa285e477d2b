//! # DAO Module
//!
//! Data access objects for departments and sellers.
//!
//! ## DAO Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    DAO Pattern                                          │
//! │                                                                         │
//! │  Service                                                               │
//! │       │                                                                 │
//! │       │  dao.find_all().await                                          │
//! │       ▼                                                                 │
//! │  dyn SellerDao  ◄── trait (this module)                                │
//! │       │                                                                 │
//! │       ├── SqliteSellerDao   (production, built by DaoFactory)          │
//! │       └── any test double   (implements the same trait)                │
//! │       │                                                                 │
//! │       │  one SQL statement per call                                    │
//! │       ▼                                                                 │
//! │  ConnectionProvider ──► SQLite                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Contracts Shared by Both DAOs
//! - `insert` takes `&mut` and writes the generated id back on success.
//! - `update` / `delete_by_id` on an id that matches no row fail with
//!   [`DataAccessError::NoRowsAffected`](crate::DataAccessError::NoRowsAffected).
//! - `find_by_id` returns `Ok(None)` when nothing matches; it never fails
//!   for that reason alone.

use std::sync::Arc;

use async_trait::async_trait;
use salesdesk_core::{Department, Seller};

use crate::connection::ConnectionProvider;
use crate::error::DataAccessResult;

pub mod department;
pub mod seller;

pub use department::SqliteDepartmentDao;
pub use seller::SqliteSellerDao;

// =============================================================================
// DAO Traits
// =============================================================================

/// CRUD operations on `department`.
#[async_trait]
pub trait DepartmentDao: Send + Sync {
    /// Stores a new department and assigns its generated id.
    async fn insert(&self, department: &mut Department) -> DataAccessResult<()>;

    /// Overwrites the stored department with the same id.
    async fn update(&self, department: &Department) -> DataAccessResult<()>;

    /// Removes the department with `id`.
    async fn delete_by_id(&self, id: i64) -> DataAccessResult<()>;

    /// Finds one department.
    async fn find_by_id(&self, id: i64) -> DataAccessResult<Option<Department>>;

    /// All departments ordered by id.
    async fn find_all(&self) -> DataAccessResult<Vec<Department>>;
}

/// CRUD operations on `seller`, hydrating each seller's department.
#[async_trait]
pub trait SellerDao: Send + Sync {
    /// Stores a new seller and assigns its generated id.
    async fn insert(&self, seller: &mut Seller) -> DataAccessResult<()>;

    /// Overwrites the stored seller with the same id.
    async fn update(&self, seller: &Seller) -> DataAccessResult<()>;

    /// Removes the seller with `id`.
    async fn delete_by_id(&self, id: i64) -> DataAccessResult<()>;

    /// Finds one seller together with its department.
    async fn find_by_id(&self, id: i64) -> DataAccessResult<Option<Seller>>;

    /// All sellers ordered by id.
    async fn find_all(&self) -> DataAccessResult<Vec<Seller>>;

    /// Sellers of one department ordered by name.
    async fn find_all_by_department(&self, department: &Department)
        -> DataAccessResult<Vec<Seller>>;
}

// =============================================================================
// Factory
// =============================================================================

/// Builds the DAO implementations the application runs with.
///
/// ## Usage
/// ```rust,ignore
/// let provider = Arc::new(ConnectionProvider::new(FileConfig::default()));
/// let factory = DaoFactory::new(provider);
///
/// let sellers = factory.seller_dao().find_all().await?;
/// ```
#[derive(Debug, Clone)]
pub struct DaoFactory {
    provider: Arc<ConnectionProvider>,
}

impl DaoFactory {
    /// Creates a factory whose DAOs share `provider`.
    pub fn new(provider: Arc<ConnectionProvider>) -> Self {
        DaoFactory { provider }
    }

    /// The connection provider every DAO from this factory uses.
    pub fn provider(&self) -> &Arc<ConnectionProvider> {
        &self.provider
    }

    /// Returns the department DAO.
    pub fn department_dao(&self) -> Arc<dyn DepartmentDao> {
        Arc::new(SqliteDepartmentDao::new(self.provider.clone()))
    }

    /// Returns the seller DAO.
    pub fn seller_dao(&self) -> Arc<dyn SellerDao> {
        Arc::new(SqliteSellerDao::new(self.provider.clone()))
    }
}
