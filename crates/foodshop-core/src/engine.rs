//! # Quoting Engine
//!
//! Turns a [`PurchasingRequest`] into an [`OrderQuote`] and records every
//! successful quote in the shared [`HistoryStore`].
//!
//! ## Pricing Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  request.items (raw code → qty)                                         │
//! │       │                                                                 │
//! │       ▼  per entry: validate qty, normalize code, catalog lookup        │
//! │  lines[] (one per raw entry)  +  qty_by_code (merged per code)          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  subtotal = Σ line totals                                               │
//! │       │                                                                 │
//! │       ▼  per eligible code: ⌊qty / bundle⌋ × (price × bundle) × pair%   │
//! │  after_pair = subtotal − pair_discount                                  │
//! │       │                                                                 │
//! │       ▼  member only                                                    │
//! │  member_discount = after_pair × member%                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  total = after_pair − member_discount ──► history.append(...)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Discounts compose in sequence: the member discount is taken from the
//! post-pair amount, never from the raw subtotal.
//!
//! Bundles never mix codes. One GREEN plus one ORANGE is not a pair even
//! though both codes are eligible.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::catalog::Catalog;
use crate::error::{QuoteError, QuoteResult, ValidationError};
use crate::history::{HistoryDraft, HistoryEntry, HistoryStore};
use crate::money::Money;
use crate::types::{
    MenuItem, MenuItemCode, OrderLine, OrderQuote, PairDiscountPolicy, PricingPolicy, Promotion,
    PurchasingRequest,
};
use crate::validation::{normalize_item_code, validate_quantity};

/// Stateless pricing over a shared catalog and a shared history ledger.
///
/// ## Usage
/// ```rust
/// use std::sync::Arc;
/// use foodshop_core::{Catalog, HistoryStore, Money, PricingPolicy, PurchasingRequest, QuoteEngine};
///
/// let engine = QuoteEngine::new(
///     Arc::new(Catalog::with_defaults()),
///     Arc::new(HistoryStore::new()),
///     PricingPolicy::default(),
/// );
///
/// let quote = engine
///     .quote_order(&PurchasingRequest::new([("GREEN", 2)], true))
///     .unwrap();
/// assert_eq!(quote.total, Money::from_minor(6840));
/// assert_eq!(engine.order_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct QuoteEngine {
    catalog: Arc<Catalog>,
    history: Arc<HistoryStore>,
    policy: PricingPolicy,
}

impl QuoteEngine {
    pub fn new(catalog: Arc<Catalog>, history: Arc<HistoryStore>, policy: PricingPolicy) -> Self {
        QuoteEngine {
            catalog,
            history,
            policy,
        }
    }

    /// Engine over the default menu with a fresh, empty history.
    pub fn with_defaults() -> Self {
        QuoteEngine::new(
            Arc::new(Catalog::with_defaults()),
            Arc::new(HistoryStore::new()),
            PricingPolicy::default(),
        )
    }

    pub fn policy(&self) -> &PricingPolicy {
        &self.policy
    }

    /// Menu items sorted by code.
    pub fn menu_catalog(&self) -> Vec<MenuItem> {
        self.catalog.list_menu_items()
    }

    pub fn promotions(&self) -> Vec<Promotion> {
        self.catalog.list_promotions()
    }

    /// All recorded orders in the order they were quoted.
    pub fn order_history(&self) -> Vec<HistoryEntry> {
        self.history.list()
    }

    pub fn order_count(&self) -> usize {
        self.history.count()
    }

    /// Prices a request and records it in the order history.
    ///
    /// ## Failure Semantics
    /// Any error leaves the history untouched: no entry is appended and no
    /// order number is consumed.
    ///
    /// ## Errors
    /// - [`QuoteError::EmptyOrder`] when `request.items` is empty
    /// - [`QuoteError::Validation`] for a quantity below 1 or a blank code
    /// - [`QuoteError::UnknownMenuItem`] when a code is not on the menu
    /// - [`QuoteError::MenuItemPriceMissing`] if discount bookkeeping is broken
    pub fn quote_order(&self, request: &PurchasingRequest) -> QuoteResult<OrderQuote> {
        let quote = match self.price(request) {
            Ok(quote) => quote,
            Err(err) => {
                warn!(kind = ?err.kind(), error = %err, "Quote rejected");
                return Err(err);
            }
        };

        let entry = self.history.append(HistoryDraft {
            member: request.member,
            quote: quote.clone(),
        });
        info!(
            order_no = entry.order_no,
            member = request.member,
            total = %entry.total,
            "Order quoted"
        );

        Ok(quote)
    }

    /// The pure part of [`quote_order`](Self::quote_order): no side effects.
    fn price(&self, request: &PurchasingRequest) -> QuoteResult<OrderQuote> {
        if request.items.is_empty() {
            return Err(QuoteError::EmptyOrder);
        }

        let mut qty_by_code: BTreeMap<MenuItemCode, i64> = BTreeMap::new();
        let mut price_by_code: BTreeMap<MenuItemCode, Money> = BTreeMap::new();
        let mut lines = Vec::with_capacity(request.items.len());
        let mut subtotal = Money::zero();

        for (raw_code, &qty) in &request.items {
            validate_quantity(qty)?;
            let code = normalize_item_code(raw_code)?;

            let item = self
                .catalog
                .find_menu_item_by_code(&code)
                .map_err(|source| QuoteError::UnknownMenuItem {
                    code: code.clone(),
                    source,
                })?;

            let overflow = || QuoteError::from(ValidationError::InvalidQuantity { qty });

            let merged = qty_by_code.entry(code.clone()).or_insert(0);
            *merged = merged.checked_add(qty).ok_or_else(overflow)?;
            price_by_code.insert(code.clone(), item.price);

            let line_total = item
                .price
                .checked_multiply_quantity(qty)
                .ok_or_else(overflow)?;
            subtotal = subtotal.checked_add(line_total).ok_or_else(overflow)?;

            lines.push(OrderLine {
                code,
                name: item.name.clone(),
                qty,
                unit_price: item.price,
                line_total,
            });
        }

        let pair_discount = calculate_pair_discount(&self.policy.pair, &qty_by_code, &price_by_code)?;
        let after_pair = subtotal - pair_discount;

        let member_discount = if request.member {
            after_pair.percentage(self.policy.member_discount_percent)
        } else {
            Money::zero()
        };
        let total = after_pair - member_discount;

        debug!(
            lines = lines.len(),
            %subtotal,
            %pair_discount,
            %member_discount,
            %total,
            "Quote priced"
        );

        Ok(OrderQuote {
            lines,
            subtotal,
            pair_discount,
            member_discount,
            total,
        })
    }
}

/// Sums the bundle discount over every eligible code.
///
/// Codes below the bundle size, and the remainder above a whole number of
/// bundles, get nothing. Every bundle value is bounded by that code's line
/// totals, which `price` has already summed without overflow.
pub(crate) fn calculate_pair_discount(
    policy: &PairDiscountPolicy,
    qty_by_code: &BTreeMap<MenuItemCode, i64>,
    price_by_code: &BTreeMap<MenuItemCode, Money>,
) -> QuoteResult<Money> {
    let bundle_size = policy.bundle_len();
    let mut total = Money::zero();

    for (code, &qty) in qty_by_code {
        if !policy.is_eligible(code) || qty < bundle_size {
            continue;
        }

        let unit_price = price_by_code
            .get(code)
            .ok_or_else(|| QuoteError::MenuItemPriceMissing { code: code.clone() })?;

        let bundles = qty / bundle_size;
        let per_bundle = unit_price
            .multiply_quantity(bundle_size)
            .percentage(policy.discount_percent);

        total += per_bundle.multiply_quantity(bundles);
    }

    Ok(total)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QuoteErrorKind;
    use std::num::NonZeroU32;

    fn thb(major: i64) -> Money {
        Money::from_major(major)
    }

    fn satang(minor: i64) -> Money {
        Money::from_minor(minor)
    }

    fn code(s: &str) -> MenuItemCode {
        MenuItemCode::new_unchecked(s)
    }

    fn quote(items: &[(&str, i64)], member: bool) -> (QuoteEngine, QuoteResult<OrderQuote>) {
        let engine = QuoteEngine::with_defaults();
        let result = engine.quote_order(&PurchasingRequest::new(items.iter().copied(), member));
        (engine, result)
    }

    struct Expected {
        subtotal: Money,
        pair: Money,
        member: Money,
        total: Money,
    }

    fn assert_totals(q: &OrderQuote, e: Expected) {
        assert_eq!(q.subtotal, e.subtotal, "subtotal");
        assert_eq!(q.pair_discount, e.pair, "pair discount");
        assert_eq!(q.member_discount, e.member, "member discount");
        assert_eq!(q.total, e.total, "total");
    }

    #[test]
    fn test_mixed_items_pair_on_green_no_member() {
        let (_, q) = quote(&[("RED", 1), ("GREEN", 2)], false);
        let q = q.unwrap();
        assert_totals(
            &q,
            Expected {
                subtotal: thb(130),
                pair: thb(4),
                member: thb(0),
                total: thb(126),
            },
        );
        assert_eq!(q.quantity_by_code()[&code("RED")], 1);
        assert_eq!(q.quantity_by_code()[&code("GREEN")], 2);
    }

    #[test]
    fn test_member_discount_applies_after_pair() {
        let (_, q) = quote(&[("GREEN", 2)], true);
        assert_totals(
            &q.unwrap(),
            Expected {
                subtotal: thb(80),
                pair: thb(4),
                member: satang(760),
                total: satang(6840),
            },
        );
    }

    #[test]
    fn test_chained_discounts_stay_exact() {
        let (_, q) = quote(&[("GREEN", 2), ("RED", 1)], true);
        assert_totals(
            &q.unwrap(),
            Expected {
                subtotal: thb(130),
                pair: thb(4),
                member: satang(1260),
                total: satang(11340),
            },
        );
    }

    #[test]
    fn test_bundle_flooring() {
        let (_, q) = quote(&[("GREEN", 3)], false);
        assert_totals(
            &q.unwrap(),
            Expected {
                subtotal: thb(120),
                pair: thb(4),
                member: thb(0),
                total: thb(116),
            },
        );

        let (_, q) = quote(&[("GREEN", 4)], false);
        assert_totals(
            &q.unwrap(),
            Expected {
                subtotal: thb(160),
                pair: thb(8),
                member: thb(0),
                total: thb(152),
            },
        );
    }

    #[test]
    fn test_pair_discounts_sum_per_code() {
        let (_, q) = quote(&[("GREEN", 2), ("ORANGE", 2)], false);
        assert_totals(
            &q.unwrap(),
            Expected {
                subtotal: thb(320),
                pair: thb(16),
                member: thb(0),
                total: thb(304),
            },
        );
    }

    #[test]
    fn test_no_cross_code_pairing() {
        let (_, q) = quote(&[("GREEN", 1), ("ORANGE", 1)], false);
        let q = q.unwrap();
        assert_eq!(q.pair_discount, Money::zero());
        assert_eq!(q.total, thb(160));
    }

    #[test]
    fn test_ineligible_code_gets_no_pair_discount() {
        let (_, q) = quote(&[("RED", 2)], false);
        let q = q.unwrap();
        assert_eq!(q.pair_discount, Money::zero());
        assert_eq!(q.total, thb(100));

        let (_, q) = quote(&[("RED", 10)], false);
        assert_eq!(q.unwrap().pair_discount, Money::zero());
    }

    #[test]
    fn test_equivalent_raw_codes_merge_for_discount_but_not_lines() {
        let (_, q) = quote(&[(" green ", 1), ("GREEN", 1)], false);
        let q = q.unwrap();

        assert_totals(
            &q,
            Expected {
                subtotal: thb(80),
                pair: thb(4),
                member: thb(0),
                total: thb(76),
            },
        );

        assert_eq!(q.lines.len(), 2);
        for line in &q.lines {
            assert_eq!(line.code, code("GREEN"));
            assert_eq!(line.qty, 1);
            assert_eq!(line.line_total, thb(40));
        }
        assert_eq!(q.quantity_by_code()[&code("GREEN")], 2);
    }

    #[test]
    fn test_lines_carry_name_and_prices() {
        let (_, q) = quote(&[("pink", 3)], false);
        let q = q.unwrap();
        assert_eq!(q.lines.len(), 1);
        let line = &q.lines[0];
        assert_eq!(line.code, code("PINK"));
        assert_eq!(line.name, "Pink set");
        assert_eq!(line.unit_price, thb(80));
        assert_eq!(line.line_total, thb(240));
    }

    #[test]
    fn test_empty_order_rejected() {
        let (engine, q) = quote(&[], true);
        assert_eq!(q, Err(QuoteError::EmptyOrder));
        assert_eq!(engine.order_count(), 0);
    }

    #[test]
    fn test_invalid_quantity_rejected() {
        let (engine, q) = quote(&[("GREEN", 0)], false);
        assert_eq!(
            q,
            Err(QuoteError::Validation(ValidationError::InvalidQuantity { qty: 0 }))
        );
        assert_eq!(engine.order_count(), 0);

        let (_, q) = quote(&[("GREEN", -2)], false);
        assert_eq!(q.unwrap_err().kind(), QuoteErrorKind::InvalidQuantity);
    }

    #[test]
    fn test_huge_quantity_rejected_without_panic() {
        let req: PurchasingRequest =
            serde_json::from_str(r#"{"items":{"RED":9223372036854775807},"member":false}"#)
                .unwrap();
        let engine = QuoteEngine::with_defaults();

        assert_eq!(
            engine.quote_order(&req),
            Err(QuoteError::Validation(ValidationError::InvalidQuantity {
                qty: i64::MAX
            }))
        );
        assert_eq!(engine.order_count(), 0);

        let (_, q) = quote(&[("RED", crate::MAX_ITEM_QUANTITY + 1)], false);
        assert_eq!(q.unwrap_err().kind(), QuoteErrorKind::InvalidQuantity);

        let (_, q) = quote(&[("RED", crate::MAX_ITEM_QUANTITY)], false);
        assert_eq!(q.unwrap().subtotal, thb(50 * crate::MAX_ITEM_QUANTITY));
    }

    #[test]
    fn test_line_total_overflow_is_an_error() {
        let catalog = Catalog::new(
            [MenuItem::new("GOLD", "Gold set", satang(i64::MAX / 2))],
            vec![],
        );
        let engine = QuoteEngine::new(
            Arc::new(catalog),
            Arc::new(HistoryStore::new()),
            PricingPolicy::default(),
        );

        let q = engine.quote_order(&PurchasingRequest::new([("GOLD", 3)], false));
        assert_eq!(
            q,
            Err(QuoteError::Validation(ValidationError::InvalidQuantity { qty: 3 }))
        );

        // each line fits, the subtotal does not
        let q = engine.quote_order(&PurchasingRequest::new([("GOLD", 2), ("gold", 1)], false));
        assert_eq!(q.unwrap_err().kind(), QuoteErrorKind::InvalidQuantity);
        assert_eq!(engine.order_count(), 0);
    }

    #[test]
    fn test_blank_code_rejected() {
        let (engine, q) = quote(&[("   ", 1)], false);
        assert_eq!(q.unwrap_err().kind(), QuoteErrorKind::InvalidItemCode);
        assert_eq!(engine.order_count(), 0);
    }

    #[test]
    fn test_unknown_code_rejected_with_context() {
        let (engine, q) = quote(&[("GREEN", 1), ("white", 1)], false);
        let err = q.unwrap_err();
        assert_eq!(err.kind(), QuoteErrorKind::UnknownMenuItem);
        assert_eq!(
            err.to_string(),
            "find menu item by code WHITE: unknown menu item code: WHITE"
        );
        assert_eq!(engine.order_count(), 0);
    }

    #[test]
    fn test_failures_do_not_consume_order_numbers() {
        let engine = QuoteEngine::with_defaults();

        engine
            .quote_order(&PurchasingRequest::new([("RED", 1)], false))
            .unwrap();
        for bad in [
            PurchasingRequest::default(),
            PurchasingRequest::new([("RED", 0)], false),
            PurchasingRequest::new([("", 1)], false),
            PurchasingRequest::new([("NOPE", 1)], false),
        ] {
            assert!(engine.quote_order(&bad).is_err());
        }
        engine
            .quote_order(&PurchasingRequest::new([("BLUE", 1)], false))
            .unwrap();

        let numbers: Vec<u64> = engine.order_history().iter().map(|e| e.order_no).collect();
        assert_eq!(numbers, [1, 2]);
    }

    #[test]
    fn test_history_matches_returned_quotes() {
        let engine = QuoteEngine::with_defaults();
        let requests = [
            PurchasingRequest::new([("GREEN", 2)], true),
            PurchasingRequest::new([("ORANGE", 5), ("black", 1)], false),
            PurchasingRequest::new([("PINK", 2), ("PURPLE", 1)], true),
        ];

        let quotes: Vec<OrderQuote> = requests
            .iter()
            .map(|r| engine.quote_order(r).unwrap())
            .collect();

        let history = engine.order_history();
        assert_eq!(engine.order_count(), requests.len());
        for (idx, ((entry, q), req)) in history.iter().zip(&quotes).zip(&requests).enumerate() {
            assert_eq!(entry.order_no, idx as u64 + 1);
            assert_eq!(entry.member, req.member);
            assert_eq!(&entry.quote(), q);
        }
    }

    #[test]
    fn test_engines_sharing_a_store_share_numbering() {
        let catalog = Arc::new(Catalog::with_defaults());
        let history = Arc::new(HistoryStore::new());
        let a = QuoteEngine::new(catalog.clone(), history.clone(), PricingPolicy::default());
        let b = QuoteEngine::new(catalog, history.clone(), PricingPolicy::default());

        a.quote_order(&PurchasingRequest::new([("RED", 1)], false)).unwrap();
        b.quote_order(&PurchasingRequest::new([("RED", 1)], false)).unwrap();
        a.quote_order(&PurchasingRequest::new([("RED", 1)], false)).unwrap();

        let numbers: Vec<u64> = history.list().iter().map(|e| e.order_no).collect();
        assert_eq!(numbers, [1, 2, 3]);
    }

    #[test]
    fn test_custom_policy_is_honoured() {
        let policy = PricingPolicy {
            pair: PairDiscountPolicy {
                eligible_codes: [code("RED")].into_iter().collect(),
                discount_percent: 10,
                bundle_size: NonZeroU32::new(3).unwrap(),
            },
            member_discount_percent: 20,
        };
        let engine = QuoteEngine::new(
            Arc::new(Catalog::with_defaults()),
            Arc::new(HistoryStore::new()),
            policy,
        );

        // RED ×7 → 2 bundles of 3; each bundle 150.00 × 10% = 15.00
        let q = engine
            .quote_order(&PurchasingRequest::new([("RED", 7), ("GREEN", 2)], true))
            .unwrap();
        assert_eq!(q.subtotal, thb(430));
        assert_eq!(q.pair_discount, thb(30));
        assert_eq!(q.member_discount, thb(80));
        assert_eq!(q.total, thb(320));
    }

    #[test]
    fn test_custom_catalog_prices() {
        let catalog = Catalog::new(
            [MenuItem::new("GREEN", "Green set", satang(3999))],
            vec![],
        );
        let engine = QuoteEngine::new(
            Arc::new(catalog),
            Arc::new(HistoryStore::new()),
            PricingPolicy::default(),
        );
        // 79.98 × 5% = 3.999 → 3.99
        let q = engine
            .quote_order(&PurchasingRequest::new([("GREEN", 2)], false))
            .unwrap();
        assert_eq!(q.pair_discount, satang(399));
        assert_eq!(q.total, satang(7599));
    }

    #[test]
    fn test_pair_discount_reports_missing_price() {
        let policy = PairDiscountPolicy::default();
        let qty: BTreeMap<_, _> = [(code("PINK"), 2)].into_iter().collect();
        let prices = BTreeMap::new();

        assert_eq!(
            calculate_pair_discount(&policy, &qty, &prices),
            Err(QuoteError::MenuItemPriceMissing { code: code("PINK") })
        );
    }

    #[test]
    fn test_pair_discount_skips_ineligible_without_price() {
        let policy = PairDiscountPolicy::default();
        let qty: BTreeMap<_, _> = [(code("RED"), 4), (code("GREEN"), 1)].into_iter().collect();
        let prices = BTreeMap::new();

        assert_eq!(calculate_pair_discount(&policy, &qty, &prices), Ok(Money::zero()));
    }

    #[test]
    fn test_service_passthroughs() {
        let engine = QuoteEngine::with_defaults();
        assert_eq!(engine.menu_catalog().len(), 8);
        assert_eq!(engine.menu_catalog()[0].code, code("BLACK"));
        assert_eq!(engine.promotions().len(), 2);
        assert!(engine.order_history().is_empty());
        assert_eq!(engine.policy(), &PricingPolicy::default());
    }
}
