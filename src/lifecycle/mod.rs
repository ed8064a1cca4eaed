//! Runtime wiring and lifecycle management.
//!
//! - [`TenantSystem`] - spawns every record store and shuts them down again
//! - [`setup_tracing`] - initializes the tracing subscriber

pub mod system;

pub use resource_actor::tracing::setup_tracing;
pub use system::*;
