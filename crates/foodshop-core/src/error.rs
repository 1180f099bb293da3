//! # Error Types
//!
//! Domain-specific error types for foodshop-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  foodshop-core errors (this file)                                      │
//! │  ├── ValidationError  - Raw request entry is malformed                 │
//! │  ├── CatalogError     - Menu lookup failed                             │
//! │  └── QuoteError       - Everything quote_order can fail with           │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── ShellError       - What the user sees at the prompt               │
//! │                                                                         │
//! │  Flow: ValidationError / CatalogError → QuoteError → ShellError        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every failure is terminal for its request: no partial quote is returned
//! and nothing is written to the order history.

use thiserror::Error;

use crate::types::MenuItemCode;

// =============================================================================
// Validation Error
// =============================================================================

/// A single request entry failed input checks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Requested quantity is below 1 or above [`crate::MAX_ITEM_QUANTITY`],
    /// or pricing it would overflow.
    #[error("invalid quantity: {qty} (must be between 1 and {max})", max = crate::MAX_ITEM_QUANTITY)]
    InvalidQuantity { qty: i64 },

    /// Item code is blank after trimming.
    ///
    /// `raw` holds the offending input as received (possibly whitespace).
    #[error("invalid item code, please provide a non-empty item code")]
    InvalidItemCode { raw: String },
}

// =============================================================================
// Catalog Error
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The normalized code is not on the menu.
    #[error("unknown menu item code: {0}")]
    UnknownMenuItem(MenuItemCode),
}

// =============================================================================
// Quote Error
// =============================================================================

/// Errors returned by [`crate::engine::QuoteEngine::quote_order`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuoteError {
    /// The request had no items at all.
    #[error("empty order, please add at least 1 item")]
    EmptyOrder,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Catalog lookup failed; wraps the catalog error with the code looked up.
    #[error("find menu item by code {code}: {source}")]
    UnknownMenuItem {
        code: MenuItemCode,
        #[source]
        source: CatalogError,
    },

    /// An eligible code had a quantity but no recorded price.
    ///
    /// ## When This Occurs
    /// Never, if the per-entry bookkeeping is correct. It is modelled so a
    /// broken invariant surfaces as an error instead of a silent zero discount.
    #[error("menu item price missing for code: {code}")]
    MenuItemPriceMissing { code: MenuItemCode },
}

/// The five failure kinds a quote can end in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuoteErrorKind {
    EmptyOrder,
    InvalidQuantity,
    InvalidItemCode,
    UnknownMenuItem,
    MenuItemPriceMissing,
}

impl QuoteError {
    /// Classifies the error without destructuring nested variants.
    pub fn kind(&self) -> QuoteErrorKind {
        match self {
            QuoteError::EmptyOrder => QuoteErrorKind::EmptyOrder,
            QuoteError::Validation(ValidationError::InvalidQuantity { .. }) => {
                QuoteErrorKind::InvalidQuantity
            }
            QuoteError::Validation(ValidationError::InvalidItemCode { .. }) => {
                QuoteErrorKind::InvalidItemCode
            }
            QuoteError::UnknownMenuItem { .. } => QuoteErrorKind::UnknownMenuItem,
            QuoteError::MenuItemPriceMissing { .. } => QuoteErrorKind::MenuItemPriceMissing,
        }
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

pub type ValidationResult<T> = Result<T, ValidationError>;
pub type CatalogResult<T> = Result<T, CatalogError>;
pub type QuoteResult<T> = Result<T, QuoteError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            QuoteError::EmptyOrder.to_string(),
            "empty order, please add at least 1 item"
        );
        assert_eq!(
            ValidationError::InvalidQuantity { qty: 0 }.to_string(),
            "invalid quantity: 0 (must be between 1 and 1000000)"
        );
        assert_eq!(
            QuoteError::MenuItemPriceMissing {
                code: MenuItemCode::new_unchecked("PINK")
            }
            .to_string(),
            "menu item price missing for code: PINK"
        );
    }

    #[test]
    fn test_unknown_item_keeps_source() {
        let code = MenuItemCode::new_unchecked("WHITE");
        let err = QuoteError::UnknownMenuItem {
            code: code.clone(),
            source: CatalogError::UnknownMenuItem(code),
        };
        assert_eq!(
            err.to_string(),
            "find menu item by code WHITE: unknown menu item code: WHITE"
        );
        assert!(err.source().is_some());
        assert_eq!(err.kind(), QuoteErrorKind::UnknownMenuItem);
    }

    #[test]
    fn test_validation_converts_to_quote_error() {
        let err: QuoteError = ValidationError::InvalidItemCode { raw: "  ".into() }.into();
        assert_eq!(err.kind(), QuoteErrorKind::InvalidItemCode);
        assert_eq!(
            err.to_string(),
            "invalid item code, please provide a non-empty item code"
        );
    }
}
