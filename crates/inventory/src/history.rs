use chrono::{DateTime, Utc};
use serde::Serialize;

use stockledger_core::MovementId;
use stockledger_products::ProductCode;

use crate::movement::{Movement, MovementKind, TIMESTAMP_FORMAT};

/// Immutable record of an applied movement.
///
/// Holds copies of the movement's data plus the registration text produced by
/// [`Movement::apply`]; nothing here points back at the product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    id: MovementId,
    kind: MovementKind,
    product_code: ProductCode,
    quantity: i64,
    occurred_at: DateTime<Utc>,
    message: String,
}

impl HistoryEntry {
    pub fn new(movement: &Movement, message: impl Into<String>) -> Self {
        Self {
            id: MovementId::new(),
            kind: movement.kind(),
            product_code: movement.product_code().clone(),
            quantity: movement.quantity(),
            occurred_at: movement.occurred_at(),
            message: message.into(),
        }
    }

    pub fn id(&self) -> MovementId {
        self.id
    }

    pub fn kind(&self) -> MovementKind {
        self.kind
    }

    pub fn product_code(&self) -> &ProductCode {
        &self.product_code
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A movement that failed to apply, kept apart from the history.
///
/// The product was left untouched; `reason` is the error's display text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedMovement {
    kind: MovementKind,
    product_code: ProductCode,
    quantity: i64,
    occurred_at: DateTime<Utc>,
    reason: String,
}

impl RejectedMovement {
    pub fn new(movement: &Movement, reason: impl Into<String>) -> Self {
        Self {
            kind: movement.kind(),
            product_code: movement.product_code().clone(),
            quantity: movement.quantity(),
            occurred_at: movement.occurred_at(),
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> MovementKind {
        self.kind
    }

    pub fn product_code(&self) -> &ProductCode {
        &self.product_code
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl core::fmt::Display for RejectedMovement {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{} - Quantity: {} - Product: {} - Date: {} - Failed: {}",
            self.kind,
            self.quantity,
            self.product_code,
            self.occurred_at.format(TIMESTAMP_FORMAT),
            self.reason
        )
    }
}

/// A history entry with its 1-based display position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HistoryLine<'a> {
    pub position: usize,
    #[serde(flatten)]
    pub entry: &'a HistoryEntry,
}

impl core::fmt::Display for HistoryLine<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{}. {} - Quantity: {} - Product: {} - Date: {} - {}",
            self.position,
            self.entry.kind,
            self.entry.quantity,
            self.entry.product_code,
            self.entry.occurred_at.format(TIMESTAMP_FORMAT),
            self.entry.message
        )
    }
}

/// Lazy iterator over the history in recording order.
///
/// Cloning yields an independent iterator starting from the same point.
#[derive(Debug, Clone)]
pub struct HistoryLines<'a> {
    inner: core::iter::Enumerate<core::slice::Iter<'a, HistoryEntry>>,
}

impl<'a> HistoryLines<'a> {
    pub(crate) fn new(entries: &'a [HistoryEntry]) -> Self {
        Self {
            inner: entries.iter().enumerate(),
        }
    }
}

impl<'a> Iterator for HistoryLines<'a> {
    type Item = HistoryLine<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(idx, entry)| HistoryLine {
            position: idx + 1,
            entry,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for HistoryLines<'_> {}
