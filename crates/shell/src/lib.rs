//! `stockledger-shell` — interactive text menu over the stock registry.
//!
//! The shell reads raw strings, converts them minimally, calls into the domain
//! crates and prints either the result or `Error: <message>`. It is the single
//! recovery boundary for domain errors.

pub mod config;
pub mod context;
pub mod input;
pub mod shell;

pub use config::{Config, ReportFormat};
pub use context::AppContext;
pub use shell::{Shell, ShellError};
