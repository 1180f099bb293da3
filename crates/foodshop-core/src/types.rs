//! # Domain Types
//!
//! Core domain types used throughout the food shop.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  Catalog side                       Request / result side               │
//! │  ┌─────────────────┐               ┌─────────────────────┐              │
//! │  │   MenuItem      │               │ PurchasingRequest   │              │
//! │  │  code, name,    │               │  items: raw → qty   │              │
//! │  │  price          │               │  member             │              │
//! │  └─────────────────┘               └──────────┬──────────┘              │
//! │  ┌─────────────────┐                          ▼                         │
//! │  │   Promotion     │               ┌─────────────────────┐              │
//! │  │  (descriptive)  │               │ OrderQuote          │              │
//! │  └─────────────────┘               │  lines: OrderLine[] │              │
//! │  ┌─────────────────┐               │  subtotal, pair,    │              │
//! │  │ PricingPolicy   │               │  member, total      │              │
//! │  │  pair + member  │               └─────────────────────┘              │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::num::NonZeroU32;

use crate::money::Money;

// =============================================================================
// Menu Item Code
// =============================================================================

/// Canonical (trimmed, uppercase) menu item identifier.
///
/// Raw user input goes through [`crate::validation::normalize_item_code`];
/// this type only ever holds the normalized form.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MenuItemCode(String);

impl MenuItemCode {
    /// Wraps an already-canonical code (catalog seeds, policy config).
    pub fn new_unchecked(code: impl Into<String>) -> Self {
        MenuItemCode(code.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MenuItemCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Catalog Types
// =============================================================================

/// A dish on the menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub code: MenuItemCode,
    /// Display name shown in the menu table.
    pub name: String,
    /// Unit price.
    pub price: Money,
}

impl MenuItem {
    pub fn new(code: &str, name: &str, price: Money) -> Self {
        MenuItem {
            code: MenuItemCode::new_unchecked(code),
            name: name.to_string(),
            price,
        }
    }
}

/// A promotion description. Purely informational; pricing rules live in
/// [`PricingPolicy`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Promotion {
    pub code: String,
    pub title: String,
    pub description: String,
}

// =============================================================================
// Pricing Policy
// =============================================================================

const DEFAULT_PAIR_BUNDLE_SIZE: NonZeroU32 = match NonZeroU32::new(2) {
    Some(size) => size,
    None => panic!("pair bundle size must be non-zero"),
};

/// "Buy N of the same eligible code, get X% off those N" rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairDiscountPolicy {
    pub eligible_codes: BTreeSet<MenuItemCode>,
    pub discount_percent: u32,
    /// Items of one code that form a bundle.
    pub bundle_size: NonZeroU32,
}

impl PairDiscountPolicy {
    #[inline]
    pub fn is_eligible(&self, code: &MenuItemCode) -> bool {
        self.eligible_codes.contains(code)
    }

    /// Bundle size in the quantity domain.
    #[inline]
    pub fn bundle_len(&self) -> i64 {
        i64::from(self.bundle_size.get())
    }
}

impl Default for PairDiscountPolicy {
    /// ORANGE / PINK / GREEN, 5% per pair.
    fn default() -> Self {
        PairDiscountPolicy {
            eligible_codes: ["ORANGE", "PINK", "GREEN"]
                .into_iter()
                .map(MenuItemCode::new_unchecked)
                .collect(),
            discount_percent: 5,
            bundle_size: DEFAULT_PAIR_BUNDLE_SIZE,
        }
    }
}

/// The one configuration record the quoting engine prices with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingPolicy {
    pub pair: PairDiscountPolicy,
    /// Applied to the amount left after the pair discount.
    pub member_discount_percent: u32,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        PricingPolicy {
            pair: PairDiscountPolicy::default(),
            member_discount_percent: 10,
        }
    }
}

// =============================================================================
// Request / Quote
// =============================================================================

/// An ad-hoc order as typed by the user.
///
/// Keys are raw strings: `" green "` and `"GREEN"` are distinct keys here and
/// only merge once normalized by the engine.
///
/// ## JSON Shape
/// ```json
/// {"items": {"RED": 1, "green": 2}, "member": true}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchasingRequest {
    pub items: BTreeMap<String, i64>,
    #[serde(default)]
    pub member: bool,
}

impl PurchasingRequest {
    /// Builds a request from `(raw code, qty)` pairs.
    ///
    /// ```rust
    /// use foodshop_core::PurchasingRequest;
    ///
    /// let req = PurchasingRequest::new([("GREEN", 2), ("RED", 1)], true);
    /// assert_eq!(req.items.len(), 2);
    /// ```
    pub fn new<'a>(items: impl IntoIterator<Item = (&'a str, i64)>, member: bool) -> Self {
        PurchasingRequest {
            items: items
                .into_iter()
                .map(|(code, qty)| (code.to_string(), qty))
                .collect(),
            member,
        }
    }
}

/// One priced entry of a quote.
///
/// Emitted once per raw request key, so two raw keys that normalize to the
/// same code produce two lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub code: MenuItemCode,
    pub name: String,
    pub qty: i64,
    pub unit_price: Money,
    /// `unit_price × qty`
    pub line_total: Money,
}

/// The priced result of a [`PurchasingRequest`].
///
/// Line order is not meaningful; sort by code before display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderQuote {
    pub lines: Vec<OrderLine>,
    pub subtotal: Money,
    pub pair_discount: Money,
    pub member_discount: Money,
    pub total: Money,
}

impl OrderQuote {
    /// Total quantity per normalized code, merged across lines.
    pub fn quantity_by_code(&self) -> BTreeMap<MenuItemCode, i64> {
        let mut qty = BTreeMap::new();
        for line in &self.lines {
            *qty.entry(line.code.clone()).or_insert(0) += line.qty;
        }
        qty
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
