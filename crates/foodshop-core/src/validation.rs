//! # Validation Module
//!
//! Per-entry checks applied to a raw [`crate::PurchasingRequest`] before
//! anything is priced.
//!
//! ## Validation Order
//! ```text
//! (raw code, qty)
//!      │
//!      ├── qty outside 1..=MAX?  → InvalidQuantity
//!      │
//!      ├── trim(raw) empty?      → InvalidItemCode
//!      │
//!      └── uppercase(trim(raw))  → MenuItemCode (ready for catalog lookup)
//! ```
//!
//! ## Usage
//! ```rust
//! use foodshop_core::validation::{normalize_item_code, validate_quantity};
//!
//! validate_quantity(2).unwrap();
//! assert_eq!(normalize_item_code(" green ").unwrap().as_str(), "GREEN");
//! ```

use crate::error::{ValidationError, ValidationResult};
use crate::types::MenuItemCode;
use crate::MAX_ITEM_QUANTITY;

/// Checks that a requested quantity is between 1 and [`MAX_ITEM_QUANTITY`].
///
/// ```rust
/// use foodshop_core::validation::validate_quantity;
///
/// assert!(validate_quantity(1).is_ok());
/// assert!(validate_quantity(0).is_err());
/// assert!(validate_quantity(i64::MAX).is_err());
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if !(1..=MAX_ITEM_QUANTITY).contains(&qty) {
        return Err(ValidationError::InvalidQuantity { qty });
    }
    Ok(())
}

/// Turns raw user input into a canonical item code.
///
/// Surrounding whitespace is trimmed and the result uppercased, so
/// `" green "`, `"Green"` and `"GREEN"` all become `GREEN`.
pub fn normalize_item_code(raw: &str) -> ValidationResult<MenuItemCode> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::InvalidItemCode {
            raw: raw.to_string(),
        });
    }
    Ok(MenuItemCode::new_unchecked(trimmed.to_uppercase()))
}

// =============================================================================
// Unit Tests
// =============================================================================
