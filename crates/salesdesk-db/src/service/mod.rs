//! # Services
//!
//! What a front end calls. Each service wraps exactly one DAO.
//!
//! ```text
//! save_or_update(entity)
//!      │
//!      ├── entity.id is None ──► dao.insert(entity)   (id written back)
//!      │
//!      └── entity.id is Some ──► dao.update(entity)
//! ```
//!
//! Services don't validate, cache or retry. Field validation belongs to the
//! form (see `salesdesk_core::validation`) and every [`DataAccessError`]
//! passes through unchanged.
//!
//! [`DataAccessError`]: crate::DataAccessError

pub mod department;
pub mod seller;

pub use department::DepartmentService;
pub use seller::SellerService;
