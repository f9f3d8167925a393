//! Stock report: the catalog listing, the movement history, then the
//! movements that were rejected.

use serde::Serialize;

use stockledger_products::LowStockThreshold;

use crate::history::{HistoryLine, HistoryLines, RejectedMovement};
use crate::registry::{ProductLine, ProductLines};

/// Point-in-time view over a registry, renderable as text (`Display`) or JSON.
#[derive(Debug, Clone, Serialize)]
pub struct StockReport<'a> {
    pub low_stock_threshold: LowStockThreshold,
    pub products: Vec<ProductLine<'a>>,
    pub history: Vec<HistoryLine<'a>>,
    pub rejected: &'a [RejectedMovement],
}

impl<'a> StockReport<'a> {
    pub fn new(
        low_stock_threshold: LowStockThreshold,
        products: ProductLines<'a>,
        history: HistoryLines<'a>,
        rejected: &'a [RejectedMovement],
    ) -> Self {
        Self {
            low_stock_threshold,
            products: products.collect(),
            history: history.collect(),
            rejected,
        }
    }

    pub fn low_stock_count(&self) -> usize {
        self.products.iter().filter(|l| l.low_stock).count()
    }
}

impl core::fmt::Display for StockReport<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "=== STOCK REPORT ===")?;
        writeln!(f)?;
        writeln!(f, "=== PRODUCTS ===")?;
        if self.products.is_empty() {
            writeln!(f, "No products in stock.")?;
        }
        for line in &self.products {
            writeln!(f, "{}", line.describe())?;
            if line.low_stock {
                writeln!(f, "  Low stock for product: {}", line.product.name())?;
            }
        }
        writeln!(f)?;
        writeln!(f, "=== MOVEMENT HISTORY ===")?;
        if self.history.is_empty() {
            writeln!(f, "No movements recorded.")?;
        }
        for line in &self.history {
            writeln!(f, "{line}")?;
        }
        writeln!(f)?;
        writeln!(f, "=== REJECTED MOVEMENTS ===")?;
        if self.rejected.is_empty() {
            writeln!(f, "No rejected movements.")?;
        }
        for (idx, rejected) in self.rejected.iter().enumerate() {
            writeln!(f, "{}. {rejected}", idx + 1)?;
        }
        Ok(())
    }
}
