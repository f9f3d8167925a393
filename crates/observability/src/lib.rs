//! Tracing/logging setup shared by binaries.

/// Initialize process-wide tracing with `default_directive` as the fallback filter.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init(default_directive: &str) {
    tracing::init(default_directive);
}

/// Tracing configuration (filters, layers).
pub mod tracing;
