//! # Validation Module
//!
//! Field rules a front end applies before handing an entity to a service.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Form (front end)                                             │
//! │  └── THIS MODULE: required fields, max lengths, saved department       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Services / DAOs                                              │
//! │  └── No validation; only the id-presence checks storage needs          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rules do not stop at the first failure. Every failing field is reported so
//! a form can mark all of them at once.
//!
//! ## Usage
//! ```rust
//! use salesdesk_core::validation::validate_department;
//! use salesdesk_core::Department;
//!
//! assert!(validate_department(&Department::new("Books")).is_ok());
//! assert!(validate_department(&Department::new("  ")).is_err());
//! ```

use crate::error::{ValidationError, ValidationErrors};
use crate::types::{Department, Seller};
use crate::{MAX_DEPARTMENT_NAME_LEN, MAX_SELLER_EMAIL_LEN, MAX_SELLER_NAME_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationErrors>;

/// Checks that `value` is non-blank and at most `max` characters.
///
/// The limit applies to the text as entered, surrounding spaces included.
fn check_text(errors: &mut ValidationErrors, field: &str, value: &str, max: usize) {
    if value.trim().is_empty() {
        errors.push(ValidationError::Required {
            field: field.to_string(),
        });
    } else if value.chars().count() > max {
        errors.push(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }
}

/// Validates a department before saving.
///
/// ## Rules
/// - `name` must not be blank
/// - `name` must be at most 30 characters
pub fn validate_department(department: &Department) -> ValidationResult<()> {
    let mut errors = ValidationErrors::new();
    check_text(&mut errors, "name", &department.name, MAX_DEPARTMENT_NAME_LEN);
    errors.into_result()
}

/// Validates a seller before saving.
///
/// ## Rules
/// - `name` must not be blank, at most 50 characters
/// - `email` must not be blank, at most 70 characters
/// - `baseSalary` must not be negative
/// - `department` must already be stored (have an id)
///
/// ## Example
/// ```rust
/// use std::sync::Arc;
/// use chrono::NaiveDate;
/// use salesdesk_core::validation::validate_seller;
/// use salesdesk_core::{Department, Money, Seller};
///
/// let seller = Seller::new(
///     "",
///     "",
///     NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
///     Money::zero(),
///     Arc::new(Department::with_id(1, "Books")),
/// );
///
/// let errors = validate_seller(&seller).unwrap_err();
/// assert!(errors.get("name").is_some());
/// assert!(errors.get("email").is_some());
/// ```
pub fn validate_seller(seller: &Seller) -> ValidationResult<()> {
    let mut errors = ValidationErrors::new();

    check_text(&mut errors, "name", &seller.name, MAX_SELLER_NAME_LEN);
    check_text(&mut errors, "email", &seller.email, MAX_SELLER_EMAIL_LEN);

    if seller.base_salary.is_negative() {
        errors.push(ValidationError::Negative {
            field: "baseSalary".to_string(),
        });
    }

    if !seller.department.is_persisted() {
        errors.push(ValidationError::Unsaved {
            field: "department".to_string(),
        });
    }

    errors.into_result()
}

// =============================================================================
// Unit Tests
// =============================================================================
