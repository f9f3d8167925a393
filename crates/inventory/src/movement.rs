use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockledger_core::{DomainError, DomainResult};
use stockledger_products::{Product, ProductCode};

/// Errors raised while applying a movement (`Validation` or `InsufficientStock`).
pub type MovementError = DomainError;

/// Display format for movement timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Movement variant.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementKind {
    Entry,
    Exit,
}

impl MovementKind {
    /// Label used in history listings.
    pub fn label(&self) -> &'static str {
        match self {
            MovementKind::Entry => "Entry",
            MovementKind::Exit => "Exit",
        }
    }

    fn tag(&self) -> &'static str {
        match self {
            MovementKind::Entry => "ENTRY",
            MovementKind::Exit => "EXIT",
        }
    }
}

impl core::fmt::Display for MovementKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// A requested quantity change on one product at one point in time.
///
/// The movement refers to its product by code; the product itself is owned by
/// the registry and handed to [`Movement::apply`] for the duration of the call.
/// The quantity is validated once, at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Movement {
    kind: MovementKind,
    product_code: ProductCode,
    quantity: i64,
    occurred_at: DateTime<Utc>,
}

impl Movement {
    /// Incoming stock.
    pub fn entry(
        occurred_at: DateTime<Utc>,
        quantity: i64,
        product_code: ProductCode,
    ) -> DomainResult<Self> {
        Self::new(MovementKind::Entry, occurred_at, quantity, product_code)
    }

    /// Outgoing stock, bounded by availability when applied.
    pub fn exit(
        occurred_at: DateTime<Utc>,
        quantity: i64,
        product_code: ProductCode,
    ) -> DomainResult<Self> {
        Self::new(MovementKind::Exit, occurred_at, quantity, product_code)
    }

    pub fn new(
        kind: MovementKind,
        occurred_at: DateTime<Utc>,
        quantity: i64,
        product_code: ProductCode,
    ) -> DomainResult<Self> {
        if quantity <= 0 {
            return Err(DomainError::validation(format!(
                "{} quantity must be greater than zero",
                kind.label().to_lowercase()
            )));
        }
        Ok(Self {
            kind,
            product_code,
            quantity,
            occurred_at,
        })
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

    /// Apply this movement to `product` and return the registration text.
    ///
    /// All checks run before the quantity is written, so a failed apply leaves
    /// the product exactly as it was.
    pub fn apply(&self, product: &mut Product) -> Result<String, MovementError> {
        if product.code() != &self.product_code {
            return Err(DomainError::validation(format!(
                "movement targets product {} but was applied to {}",
                self.product_code,
                product.code()
            )));
        }

        let current = product.quantity();
        let new_quantity = match self.kind {
            MovementKind::Entry => current
                .checked_add(self.quantity)
                .ok_or_else(|| DomainError::validation("resulting quantity is too large"))?,
            MovementKind::Exit => {
                if current < self.quantity {
                    return Err(DomainError::insufficient_stock(
                        product.name(),
                        product.code().as_str(),
                        current,
                        self.quantity,
                    ));
                }
                current - self.quantity
            }
        };

        product.set_quantity(new_quantity)?;

        Ok(format!(
            "[{}] {} unit(s) of {} (code: {}) at {}. New quantity: {}",
            self.kind.tag(),
            self.quantity,
            product.name(),
            product.code(),
            self.occurred_at.format(TIMESTAMP_FORMAT),
            new_quantity
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap()
    }

    fn caneta() -> Product {
        Product::new("Caneta", "001", 1.5, 10).unwrap()
    }

    fn code(c: &str) -> ProductCode {
        ProductCode::new(c).unwrap()
    }

    #[test]
    fn entry_increases_quantity_and_reports_it() {
        let mut product = caneta();
        let entry = Movement::entry(at(), 5, code("001")).unwrap();

        let text = entry.apply(&mut product).unwrap();

        assert_eq!(product.quantity(), 15);
        assert_eq!(
            text,
            "[ENTRY] 5 unit(s) of Caneta (code: 001) at 2024-03-01 09:30:00 UTC. New quantity: 15"
        );
    }

    #[test]
    fn exit_decreases_quantity_and_reports_it() {
        let mut product = caneta();
        let exit = Movement::exit(at(), 4, code("001")).unwrap();

        let text = exit.apply(&mut product).unwrap();

        assert_eq!(product.quantity(), 6);
        assert!(text.starts_with("[EXIT] 4 unit(s) of Caneta"));
        assert!(text.ends_with("New quantity: 6"));
    }

    #[test]
    fn exit_beyond_stock_fails_without_mutation() {
        let mut product = caneta();
        let exit = Movement::exit(at(), 11, code("001")).unwrap();

        let err = exit.apply(&mut product).unwrap_err();

        assert_eq!(
            err,
            DomainError::insufficient_stock("Caneta", "001", 10, 11)
        );
        assert_eq!(product.quantity(), 10);
    }

    #[test]
    fn exit_of_everything_empties_the_product() {
        let mut product = caneta();
        Movement::exit(at(), 10, code("001"))
            .unwrap()
            .apply(&mut product)
            .unwrap();
        assert_eq!(product.quantity(), 0);
        assert!(product.is_low_stock());
    }

    #[test]
    fn non_positive_quantities_are_rejected_at_construction() {
        for qty in [0, -1, i64::MIN] {
            let err = Movement::entry(at(), qty, code("001")).unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)));
            let err = Movement::exit(at(), qty, code("001")).unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)));
        }
    }

    #[test]
    fn apply_to_another_product_is_rejected() {
        let mut product = caneta();
        let entry = Movement::entry(at(), 1, code("999")).unwrap();
        let err = entry.apply(&mut product).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(product.quantity(), 10);
    }

    #[test]
    fn entry_overflow_is_rejected() {
        let mut product = Product::new("Caneta", "001", 1.5, i64::MAX).unwrap();
        let err = Movement::entry(at(), 1, code("001"))
            .unwrap()
            .apply(&mut product)
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(product.quantity(), i64::MAX);
    }

    #[test]
    fn kind_labels() {
        assert_eq!(MovementKind::Entry.label(), "Entry");
        assert_eq!(MovementKind::Exit.to_string(), "Exit");
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 500,
                ..ProptestConfig::default()
            })]

            /// Property: an entry adds exactly its quantity.
            #[test]
            fn entry_adds_exactly(start in 0i64..1_000_000, qty in 1i64..1_000_000) {
                let mut product = Product::new("Caneta", "001", 1.5, start).unwrap();
                Movement::entry(at(), qty, code("001")).unwrap().apply(&mut product).unwrap();
                prop_assert_eq!(product.quantity(), start + qty);
            }

            /// Property: an exit within stock subtracts exactly its quantity.
            #[test]
            fn exit_within_stock_subtracts((start, qty) in (1i64..1_000_000).prop_flat_map(|n| (Just(n), 1..=n))) {
                let mut product = Product::new("Caneta", "001", 1.5, start).unwrap();
                Movement::exit(at(), qty, code("001")).unwrap().apply(&mut product).unwrap();
                prop_assert_eq!(product.quantity(), start - qty);
            }

            /// Property: an exit beyond stock fails and leaves the quantity unchanged.
            #[test]
            fn exit_beyond_stock_is_idempotent((start, qty) in (0i64..1_000_000).prop_flat_map(|n| (Just(n), (n + 1)..2_000_000))) {
                let mut product = Product::new("Caneta", "001", 1.5, start).unwrap();
                let before = product.clone();
                let err = Movement::exit(at(), qty, code("001")).unwrap().apply(&mut product).unwrap_err();
                let is_insufficient = matches!(err, DomainError::InsufficientStock { .. });
                prop_assert!(is_insufficient);
                prop_assert_eq!(product, before);
            }
        }
    }
}
