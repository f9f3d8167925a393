use std::collections::HashMap;

use serde::Serialize;

use stockledger_core::{DomainError, DomainResult, Entity};
use stockledger_products::{LowStockThreshold, Product, ProductCode};

use crate::history::{HistoryEntry, HistoryLines, RejectedMovement};
use crate::movement::{Movement, MovementKind};
use crate::report::StockReport;

/// A product with its low-stock flag, as produced by [`StockRegistry::list_products`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProductLine<'a> {
    #[serde(flatten)]
    pub product: &'a Product,
    pub low_stock: bool,
}

impl ProductLine<'_> {
    pub fn describe(&self) -> String {
        self.product.describe()
    }
}

/// Lazy iterator over the catalog in insertion order.
#[derive(Debug, Clone)]
pub struct ProductLines<'a> {
    inner: core::slice::Iter<'a, Product>,
    threshold: LowStockThreshold,
}

impl<'a> Iterator for ProductLines<'a> {
    type Item = ProductLine<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let threshold = self.threshold;
        self.inner.next().map(|product| ProductLine {
            product,
            low_stock: product.is_low_stock_at(threshold),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for ProductLines<'_> {}

/// Owns the catalog (unique by code) and the append-only movement history.
///
/// Products are never removed; movements reach a product only through
/// [`StockRegistry::register_movement`], which looks the product up by code.
/// Movements that fail to apply go to a separate rejected log, never to the
/// history.
#[derive(Debug, Clone, Default)]
pub struct StockRegistry {
    products: Vec<Product>,
    index: HashMap<ProductCode, usize>,
    history: Vec<HistoryEntry>,
    rejected: Vec<RejectedMovement>,
    threshold: LowStockThreshold,
}

impl StockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_threshold(threshold: LowStockThreshold) -> Self {
        Self {
            threshold,
            ..Self::default()
        }
    }

    pub fn threshold(&self) -> LowStockThreshold {
        self.threshold
    }

    pub fn product_count(&self) -> usize {
        self.products.len()
    }

    /// Insert a product. Fails if its code is already in the catalog.
    pub fn add_product(&mut self, product: Product) -> DomainResult<()> {
        if self.index.contains_key(product.id()) {
            tracing::warn!(code = %product.code(), "duplicate product code rejected");
            return Err(DomainError::duplicate_code(product.code().as_str()));
        }

        tracing::info!(
            code = %product.code(),
            name = product.name(),
            quantity = product.quantity(),
            "product added"
        );
        self.index.insert(product.id().clone(), self.products.len());
        self.products.push(product);
        Ok(())
    }

    /// Look a product up by code. Absence is not an error here.
    pub fn find_product(&self, code: &str) -> Option<&Product> {
        self.index
            .get(code.trim())
            .map(|&idx| &self.products[idx])
    }

    /// Like [`find_product`](Self::find_product) but turns absence into `NotFound`.
    pub fn require_product(&self, code: &str) -> DomainResult<&Product> {
        self.find_product(code)
            .ok_or_else(|| DomainError::not_found(code.trim()))
    }

    /// Append an applied movement to the history.
    ///
    /// Callers pass the text returned by a successful [`Movement::apply`];
    /// failed applications are never recorded.
    pub fn record_movement(&mut self, movement: &Movement, outcome: impl Into<String>) -> &HistoryEntry {
        self.history.push(HistoryEntry::new(movement, outcome));
        let idx = self.history.len() - 1;
        &self.history[idx]
    }

    /// Look up the target product, apply the movement, and record it.
    ///
    /// When apply fails the product is untouched, nothing reaches the history,
    /// and the attempt is appended to [`rejected`](Self::rejected). A lookup
    /// miss records nothing.
    pub fn register_movement(&mut self, movement: &Movement) -> DomainResult<&HistoryEntry> {
        let code = movement.product_code();
        let idx = *self
            .index
            .get(code)
            .ok_or_else(|| DomainError::not_found(code.as_str()))?;
        let product = &mut self.products[idx];

        let outcome = match movement.apply(product) {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(
                    kind = %movement.kind(),
                    code = %code,
                    quantity = movement.quantity(),
                    error = %err,
                    "movement rejected"
                );
                self.rejected
                    .push(RejectedMovement::new(movement, err.to_string()));
                return Err(err);
            }
        };

        tracing::info!(
            kind = %movement.kind(),
            code = %code,
            quantity = movement.quantity(),
            new_quantity = product.quantity(),
            "movement applied"
        );
        if movement.kind() == MovementKind::Exit && product.is_low_stock_at(self.threshold) {
            tracing::warn!(
                code = %code,
                quantity = product.quantity(),
                threshold = self.threshold.value(),
                "low stock"
            );
        }

        Ok(self.record_movement(movement, outcome))
    }

    /// Catalog in insertion order with low-stock flags. Call again to restart.
    pub fn list_products(&self) -> ProductLines<'_> {
        ProductLines {
            inner: self.products.iter(),
            threshold: self.threshold,
        }
    }

    /// History in recording order, 1-indexed.
    pub fn list_history(&self) -> HistoryLines<'_> {
        HistoryLines::new(&self.history)
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Failed movement attempts in the order they happened.
    pub fn rejected(&self) -> &[RejectedMovement] {
        &self.rejected
    }

    pub fn report(&self) -> StockReport<'_> {
        StockReport::new(
            self.threshold,
            self.list_products(),
            self.list_history(),
            &self.rejected,
        )
    }
}
