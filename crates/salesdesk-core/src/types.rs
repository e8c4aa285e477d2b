//! # Entities
//!
//! The two records SalesDesk manages.
//!
//! ## Relationship
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ┌─────────────────┐            ┌─────────────────┐                    │
//! │  │     Seller      │   n : 1    │   Department    │                    │
//! │  │  ─────────────  │ ─────────► │  ─────────────  │                    │
//! │  │  id             │            │  id             │                    │
//! │  │  name, email    │            │  name           │                    │
//! │  │  birth_date     │            └─────────────────┘                    │
//! │  │  base_salary    │                                                   │
//! │  │  department ────┼── Arc<Department>                                 │
//! │  └─────────────────┘                                                   │
//! │                                                                         │
//! │  Sellers loaded by the same query that belong to the same department   │
//! │  point at ONE shared Department (Arc::ptr_eq holds).                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! `id` is `None` until the record is first stored. Equality and hashing use
//! the id only, so two values describing the same stored row compare equal
//! even when a name was edited in memory.

use std::hash::{Hash, Hasher};
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Department
// =============================================================================

/// A department sellers belong to.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Department {
    /// Store-assigned identity, `None` before the first insert.
    pub id: Option<i64>,

    /// Display name.
    pub name: String,
}

impl Department {
    /// Creates a department that has not been stored yet.
    pub fn new(name: impl Into<String>) -> Self {
        Department {
            id: None,
            name: name.into(),
        }
    }

    /// Creates a department for an existing row.
    pub fn with_id(id: i64, name: impl Into<String>) -> Self {
        Department {
            id: Some(id),
            name: name.into(),
        }
    }

    /// True once the store has assigned an id.
    #[inline]
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

impl PartialEq for Department {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Department {}

impl Hash for Department {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

// =============================================================================
// Seller
// =============================================================================

/// A seller, always attached to exactly one department.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seller {
    /// Store-assigned identity, `None` before the first insert.
    pub id: Option<i64>,

    pub name: String,

    pub email: String,

    /// Calendar date, no time-of-day.
    pub birth_date: NaiveDate,

    pub base_salary: Money,

    /// Shared with every other seller of the same query result that has the
    /// same department id.
    pub department: Arc<Department>,
}

impl Seller {
    /// Creates a seller that has not been stored yet.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        birth_date: NaiveDate,
        base_salary: Money,
        department: Arc<Department>,
    ) -> Self {
        Seller {
            id: None,
            name: name.into(),
            email: email.into(),
            birth_date,
            base_salary,
            department,
        }
    }

    /// Id of the department this seller belongs to.
    #[inline]
    pub fn department_id(&self) -> Option<i64> {
        self.department.id
    }

    /// True once the store has assigned an id.
    #[inline]
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

impl PartialEq for Seller {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Seller {}

impl Hash for Seller {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
