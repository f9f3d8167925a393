//! Inventory domain module.
//!
//! Stock movements (entries and exits) and the registry that owns the product
//! catalog and the append-only movement history. Deterministic domain logic
//! only; the interactive shell lives in `stockledger-shell`.

pub mod history;
pub mod movement;
pub mod registry;
pub mod report;
pub mod shared;

pub use history::{HistoryEntry, HistoryLine, HistoryLines, RejectedMovement};
pub use movement::{Movement, MovementError, MovementKind, TIMESTAMP_FORMAT};
pub use registry::{ProductLine, ProductLines, StockRegistry};
pub use report::StockReport;
pub use shared::SharedStockRegistry;
