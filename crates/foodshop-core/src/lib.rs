//! # foodshop-core: Pricing Logic for the Food Shop
//!
//! This crate is the heart of the food shop tool: it prices ad-hoc orders
//! against a fixed menu and keeps a running ledger of quotes.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Food Shop Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Interactive shell (apps/cli)                    │   │
//! │  │     menu ──► promotions ──► JSON order ──► quote table          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ PurchasingRequest                      │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ foodshop-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐  ┌──────────┐  ┌─────────────┐  ┌───────────┐   │   │
//! │  │   │  money   │  │ catalog  │  │   engine    │  │  history  │   │   │
//! │  │   │  Money   │  │ MenuItem │  │ QuoteEngine │  │  Ledger   │   │   │
//! │  │   └──────────┘  └──────────┘  └─────────────┘  └───────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO TERMINAL I/O • INTEGER MONEY • TYPED ERRORS                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic
//! - [`types`] - Menu items, promotions, requests, quotes, pricing policy
//! - [`validation`] - Quantity and item-code checks
//! - [`catalog`] - Read-only menu lookup
//! - [`engine`] - The quoting engine
//! - [`history`] - Append-only order ledger
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use foodshop_core::{Money, PurchasingRequest, QuoteEngine};
//!
//! let engine = QuoteEngine::with_defaults();
//! let request = PurchasingRequest::new([("GREEN", 2), ("RED", 1)], true);
//!
//! let quote = engine.quote_order(&request).unwrap();
//! assert_eq!(quote.subtotal, Money::from_major(130));
//! assert_eq!(quote.total, Money::from_minor(11340)); // 113.40
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod engine;
pub mod error;
pub mod history;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::Catalog;
pub use engine::QuoteEngine;
pub use error::{CatalogError, QuoteError, QuoteErrorKind, ValidationError};
pub use history::{HistoryEntry, HistoryStore};
pub use money::Money;
pub use types::*;

// =============================================================================
// Constants
// =============================================================================

/// Largest quantity accepted for one request entry.
///
/// Keeps `price × qty` and the running subtotal well inside `i64` for any
/// realistic menu price. The engine still uses checked arithmetic on top.
pub const MAX_ITEM_QUANTITY: i64 = 1_000_000;
