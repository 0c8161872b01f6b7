//! Tracing and logging setup shared by every entry point.

/// Initialize process-wide logging with `default_filter` (used when `RUST_LOG`
/// is unset) and the given output format.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init(default_filter: &str, format: LogFormat) {
    tracing::init(default_filter, format);
}

/// Tracing configuration (filters, layers).
pub mod tracing;

pub use self::tracing::{LogFormat, UnknownLogFormat};
