use serde::{Deserialize, Serialize};

use stockledger_core::{DomainError, DomainResult, Entity};

/// Quantity at or below which a product is flagged as low stock.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 5;

/// Product code: the catalog key. Never blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductCode(String);

impl ProductCode {
    pub fn new(code: impl Into<String>) -> DomainResult<Self> {
        let code = code.into();
        let trimmed = code.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("product code cannot be empty"));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::borrow::Borrow<str> for ProductCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for ProductCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unit price. Always finite and strictly positive.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Price(f64);

impl Price {
    pub fn new(value: f64) -> DomainResult<Self> {
        if !value.is_finite() {
            return Err(DomainError::validation("price must be a finite number"));
        }
        if value <= 0.0 {
            return Err(DomainError::validation("price must be greater than zero"));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl core::fmt::Display for Price {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Low-stock threshold (inclusive). Defaults to [`DEFAULT_LOW_STOCK_THRESHOLD`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LowStockThreshold(i64);

impl LowStockThreshold {
    pub fn new(threshold: i64) -> DomainResult<Self> {
        if threshold < 0 {
            return Err(DomainError::validation(
                "low-stock threshold cannot be negative",
            ));
        }
        Ok(Self(threshold))
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    pub fn is_low(&self, quantity: i64) -> bool {
        quantity <= self.0
    }
}

impl Default for LowStockThreshold {
    fn default() -> Self {
        Self(DEFAULT_LOW_STOCK_THRESHOLD)
    }
}

/// Catalog entry: identity (code), fixed name/price, mutable quantity.
///
/// A `Product` only exists in a valid state: construction validates every
/// field, and the quantity can never be set below zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    code: ProductCode,
    name: String,
    price: Price,
    quantity: i64,
}

impl Product {
    pub fn new(
        name: impl Into<String>,
        code: impl Into<String>,
        price: f64,
        initial_quantity: i64,
    ) -> DomainResult<Self> {
        let name = name.into();
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("product name cannot be empty"));
        }
        let code = ProductCode::new(code)?;
        let price = Price::new(price)?;
        if initial_quantity < 0 {
            return Err(DomainError::validation(
                "initial quantity cannot be negative",
            ));
        }

        Ok(Self {
            code,
            name: name.to_string(),
            price,
            quantity: initial_quantity,
        })
    }

    pub fn code(&self) -> &ProductCode {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// Replace the stored quantity. Rejects negatives without touching state.
    pub fn set_quantity(&mut self, new_quantity: i64) -> DomainResult<()> {
        if new_quantity < 0 {
            return Err(DomainError::validation("quantity cannot be negative"));
        }
        self.quantity = new_quantity;
        Ok(())
    }

    /// Low stock against the default threshold.
    pub fn is_low_stock(&self) -> bool {
        self.is_low_stock_at(LowStockThreshold::default())
    }

    pub fn is_low_stock_at(&self, threshold: LowStockThreshold) -> bool {
        threshold.is_low(self.quantity)
    }

    /// One-line description: code, name, price (2 decimals), quantity.
    pub fn describe(&self) -> String {
        format!(
            "Code: {} | Name: {} | Price: {} | Quantity: {}",
            self.code, self.name, self.price, self.quantity
        )
    }
}

impl Entity for Product {
    type Id = ProductCode;

    fn id(&self) -> &Self::Id {
        &self.code
    }
}

impl core::fmt::Display for Product {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.describe())
    }
}
