//! Product catalog domain module.
//!
//! Pure domain logic: products validate themselves at construction and only
//! ever hold a non-negative quantity.

pub mod product;

pub use product::{
    DEFAULT_LOW_STOCK_THRESHOLD, LowStockThreshold, Price, Product, ProductCode,
};
