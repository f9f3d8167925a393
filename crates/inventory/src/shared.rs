//! Thread-safe handle over a [`StockRegistry`].

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use stockledger_core::DomainResult;
use stockledger_products::Product;

use crate::history::HistoryEntry;
use crate::movement::Movement;
use crate::registry::StockRegistry;

/// Cloneable registry handle; one lock serializes every catalog insert and
/// movement so the non-negative quantity invariant holds across threads.
#[derive(Debug, Clone, Default)]
pub struct SharedStockRegistry {
    inner: Arc<Mutex<StockRegistry>>,
}

impl SharedStockRegistry {
    pub fn new(registry: StockRegistry) -> Self {
        Self {
            inner: Arc::new(Mutex::new(registry)),
        }
    }

    // Domain operations never panic mid-mutation, so a poisoned guard still
    // holds a consistent registry.
    fn lock(&self) -> MutexGuard<'_, StockRegistry> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn add_product(&self, product: Product) -> DomainResult<()> {
        self.lock().add_product(product)
    }

    /// Apply and record a movement; returns a copy of the recorded entry.
    pub fn register_movement(&self, movement: &Movement) -> DomainResult<HistoryEntry> {
        self.lock().register_movement(movement).cloned()
    }

    /// Run `f` against the registry while holding the lock.
    pub fn read<R>(&self, f: impl FnOnce(&StockRegistry) -> R) -> R {
        f(&self.lock())
    }
}
