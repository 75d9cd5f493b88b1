// --- File: crates/mediplan_common/src/lib.rs ---

// Declare modules within this crate
pub mod error; // Error handling
pub mod http; // HTTP utilities
pub mod logging; // Logging utilities
pub mod services; // Service abstractions

// Re-export error types and utilities for easier access
pub use error::{auth_error, external_service_error, HttpStatusCode, MediplanError};

// Re-export HTTP utilities for easier access
pub use http::client::HTTP_CLIENT;

// Re-export logging utilities for easier access
pub use logging::{init, init_with_level};

// This crate provides common functionality shared across the application:
// the base error taxonomy, the process-wide HTTP client, logging setup and
// the service traits the calendar integration is written against.
