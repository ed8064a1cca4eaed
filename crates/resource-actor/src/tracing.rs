//! # Observability
//!
//! Structured logging for the whole workspace. Every actor logs its lifecycle
//! and each request with an `entity_type` field, so module targets are hidden.
//!
//! ```bash
//! RUST_LOG=info cargo run      # lifecycle and step outcomes
//! RUST_LOG=debug cargo run     # full request payloads
//! ```

/// Installs the global `tracing` subscriber, filtered by `RUST_LOG`.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
