//! # Order History
//!
//! Append-only, in-memory ledger of successful quotes.
//!
//! ## Thread Safety
//! The ledger sits behind a `Mutex` because it is handed to every engine as
//! a shared dependency:
//! 1. Several engines (or threads) may record orders at once
//! 2. Order numbers must stay unique and gap-free
//! 3. `list()`/`count()` must never observe a half-appended entry
//!
//! ## Numbering
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  append(draft)                                                          │
//! │     lock ──► order_no = entries.len() + 1                               │
//! │          ──► created_at = now                                           │
//! │          ──► entries.push(entry)                                        │
//! │     unlock ─► return copy of entry                                      │
//! │                                                                         │
//! │  The store is the only place numbers are handed out, so the ledger and  │
//! │  the counter cannot drift apart.                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing survives a process restart.

use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::money::Money;
use crate::types::{OrderLine, OrderQuote};

/// A recorded order. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// 1-based, strictly increasing in append order.
    pub order_no: u64,
    pub created_at: DateTime<Utc>,
    pub member: bool,
    pub lines: Vec<OrderLine>,
    pub subtotal: Money,
    pub pair_discount: Money,
    pub member_discount: Money,
    pub total: Money,
}

impl HistoryEntry {
    /// The quote this entry was recorded from.
    pub fn quote(&self) -> OrderQuote {
        OrderQuote {
            lines: self.lines.clone(),
            subtotal: self.subtotal,
            pair_discount: self.pair_discount,
            member_discount: self.member_discount,
            total: self.total,
        }
    }
}

/// What the engine hands to the store; the store fills in number and time.
#[derive(Debug, Clone)]
pub struct HistoryDraft {
    pub member: bool,
    pub quote: OrderQuote,
}

#[derive(Debug, Default)]
pub struct HistoryStore {
    entries: Mutex<Vec<HistoryEntry>>,
}

impl HistoryStore {
    pub fn new() -> Self {
        HistoryStore::default()
    }

    /// Appends a new entry and returns it with its assigned order number.
    pub fn append(&self, draft: HistoryDraft) -> HistoryEntry {
        let mut entries = self.lock();
        let quote = draft.quote;
        let entry = HistoryEntry {
            order_no: entries.len() as u64 + 1,
            created_at: Utc::now(),
            member: draft.member,
            lines: quote.lines,
            subtotal: quote.subtotal,
            pair_discount: quote.pair_discount,
            member_discount: quote.member_discount,
            total: quote.total,
        };
        entries.push(entry.clone());
        debug!(order_no = entry.order_no, "History entry appended");
        entry
    }

    /// Returns a copy of every entry in append order.
    pub fn list(&self) -> Vec<HistoryEntry> {
        self.lock().clone()
    }

    pub fn count(&self) -> usize {
        self.lock().len()
    }

    // A panic while holding the lock can only happen before `push`, so the
    // vector is always consistent and a poisoned lock is safe to reuse.
    fn lock(&self) -> MutexGuard<'_, Vec<HistoryEntry>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
