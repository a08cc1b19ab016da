//! Task runner lambda: starts runs of a service's current task definition

pub mod handler;

// Re-export the main handler for convenience
pub use handler::{handler, run_service_task};
