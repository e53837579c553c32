//! service-core: shared infrastructure for the chat workspace services.
pub mod config;
pub mod error;
pub mod middleware;
pub mod observability;
