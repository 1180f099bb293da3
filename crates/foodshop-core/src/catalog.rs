//! # Catalog
//!
//! Read-only menu and promotion lookup.
//!
//! ## Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  list_menu_items()          → all items, sorted by code, every call     │
//! │  find_menu_item_by_code(c)  → item, or CatalogError::UnknownMenuItem    │
//! │  list_promotions()          → a copy; callers can't touch shared state  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The catalog is immutable once built and is shared by reference (`Arc`)
//! between the engine and whatever else needs to display the menu.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{CatalogError, CatalogResult};
use crate::money::Money;
use crate::types::{MenuItem, MenuItemCode, Promotion};

/// Menu items keyed by code, plus the promotion descriptions.
#[derive(Debug, Clone)]
pub struct Catalog {
    menu: HashMap<MenuItemCode, MenuItem>,
    promotions: Vec<Promotion>,
}

impl Catalog {
    /// Builds a catalog from owned copies of `items` and `promotions`.
    ///
    /// A later item with the same code replaces an earlier one.
    pub fn new(items: impl IntoIterator<Item = MenuItem>, promotions: Vec<Promotion>) -> Self {
        let menu: HashMap<_, _> = items
            .into_iter()
            .map(|item| (item.code.clone(), item))
            .collect();
        debug!(items = menu.len(), promotions = promotions.len(), "Catalog built");
        Catalog { menu, promotions }
    }

    /// The shop's fixed menu and promotions.
    pub fn with_defaults() -> Self {
        Catalog::new(default_menu(), default_promotions())
    }

    /// Returns every menu item ordered by code ascending.
    ///
    /// Storage is a hash map, so the sort here is what makes the output
    /// reproducible.
    pub fn list_menu_items(&self) -> Vec<MenuItem> {
        let mut items: Vec<MenuItem> = self.menu.values().cloned().collect();
        items.sort_by(|a, b| a.code.cmp(&b.code));
        items
    }

    /// Looks up a single item by its canonical code.
    pub fn find_menu_item_by_code(&self, code: &MenuItemCode) -> CatalogResult<&MenuItem> {
        self.menu
            .get(code)
            .ok_or_else(|| CatalogError::UnknownMenuItem(code.clone()))
    }

    pub fn list_promotions(&self) -> Vec<Promotion> {
        self.promotions.clone()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::with_defaults()
    }
}

// =============================================================================
// Default Data
// =============================================================================

/// The eight colour sets, priced in whole baht.
pub fn default_menu() -> Vec<MenuItem> {
    vec![
        MenuItem::new("RED", "Red set", Money::from_major(50)),
        MenuItem::new("GREEN", "Green set", Money::from_major(40)),
        MenuItem::new("BLUE", "Blue set", Money::from_major(30)),
        MenuItem::new("YELLOW", "Yellow set", Money::from_major(50)),
        MenuItem::new("PINK", "Pink set", Money::from_major(80)),
        MenuItem::new("PURPLE", "Purple set", Money::from_major(90)),
        MenuItem::new("ORANGE", "Orange set", Money::from_major(120)),
        MenuItem::new("BLACK", "Black set", Money::from_major(100)),
    ]
}

pub fn default_promotions() -> Vec<Promotion> {
    vec![
        Promotion {
            code: "MEMBER".to_string(),
            title: "Member card 10% off".to_string(),
            description: "Get 10% discount on the total bill if customer has a member card."
                .to_string(),
        },
        Promotion {
            code: "PAIR".to_string(),
            title: "Pair discount 5% (ORANGE/PINK/GREEN)".to_string(),
            description: "Every pair (2 items of the same code) for ORANGE/PINK/GREEN gets 5% off that pair value.".to_string(),
        },
    ]
}

// =============================================================================
// Unit Tests
// =============================================================================
