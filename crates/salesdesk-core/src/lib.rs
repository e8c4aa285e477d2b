//! # salesdesk-core: Entities and Rules for SalesDesk
//!
//! This crate holds the domain model shared by every SalesDesk layer. It
//! contains plain data types and pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        SalesDesk Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Front end (any)                              │   │
//! │  │    Department list ──► Department form ──► Seller form          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ services                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ salesdesk-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────┐     ┌───────────┐     ┌────────────┐          │   │
//! │  │   │   types    │     │   money   │     │ validation │          │   │
//! │  │   │ Department │     │   Money   │     │ form rules │          │   │
//! │  │   │   Seller   │     │           │     │            │          │   │
//! │  │   └────────────┘     └───────────┘     └────────────┘          │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • PURE FUNCTIONS                        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 salesdesk-db (Data Access Layer)                │   │
//! │  │          Connection provider, DAOs, services                    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Entities (Department, Seller)
//! - [`money`] - Money type with integer arithmetic
//! - [`error`] - Validation error types
//! - [`validation`] - Field rules applied before saving
//!
//! ## Example Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use chrono::NaiveDate;
//! use salesdesk_core::{Department, Money, Seller};
//!
//! let sales = Arc::new(Department::with_id(2, "Sales"));
//! let bob = Seller::new(
//!     "Bob",
//!     "bob@example.com",
//!     NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
//!     Money::from_cents(100_000),
//!     sales,
//! );
//!
//! assert!(bob.id.is_none());
//! assert_eq!(bob.department_id(), Some(2));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{ValidationError, ValidationErrors};
pub use money::Money;
pub use types::*;

// =============================================================================
// Field Limits
// =============================================================================

/// Maximum length of a department name.
pub const MAX_DEPARTMENT_NAME_LEN: usize = 30;

/// Maximum length of a seller name.
pub const MAX_SELLER_NAME_LEN: usize = 50;

/// Maximum length of a seller email.
pub const MAX_SELLER_EMAIL_LEN: usize = 70;
