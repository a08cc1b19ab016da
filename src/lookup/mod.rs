//! Task lookup lambda: describes a service's container configuration

pub mod handler;
pub mod summary;

// Re-export the main handler for convenience
pub use handler::{handler, lookup_container};
pub use summary::{ContainerSummary, SERVICE_MISSING_IMAGE};
