//! # Scout Utils
//!
//! Shared utilities for the stockscout workspace:
//! - Tracing/logging initialization (console and rolling file output)
//! - API credential resolution (environment first, credential files second)

pub mod credentials;
pub mod logging;

pub use credentials::CredentialStore;
pub use logging::{init_tracing, init_tracing_with_file};
