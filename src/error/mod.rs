//! The unified error handling system for the application.

// 1. Core Types
pub use types::GatewayError;

/// A unified `Result` type for the entire application.
///
/// All functions that can fail should return this type.
pub type Result<T> = std::result::Result<T, GatewayError>;

// 2. Module declarations
pub mod auth;
pub mod types;
