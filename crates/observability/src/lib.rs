//! Process-wide logging setup shared by the service binary and tests.

/// Initialize structured logging. Later calls are no-ops.
pub fn init() {
    tracing::init();
}

/// Subscriber construction (filters, formatting).
pub mod tracing;
