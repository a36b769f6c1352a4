//! SpamGuard Core
//!
//! Core types and error handling shared across SpamGuard components.
//!
//! This crate provides:
//! - The error taxonomy used by the classifier adapter and the HTTP layer
//! - Request validation for classification input
//! - Response shapes for predictions, model info and health checks

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{
    ClassificationRequest, ClassificationResult, ErrorBody, HealthStatus, ModelDetails,
    ModelInfo, Prediction, ResultModelInfo, DEFAULT_THRESHOLD, MAX_MESSAGE_CHARS,
    MIN_MESSAGE_CHARS,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::types::{ClassificationRequest, ClassificationResult, ModelInfo, Prediction};
}
