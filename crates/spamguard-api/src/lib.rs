//! SpamGuard API
//!
//! HTTP surface over the spam classifier: health, model info and predictions,
//! plus the `deploy-models` maintenance command.

pub mod cli;
pub mod config;
pub mod controllers;
pub mod error;
pub mod routes;
pub mod server;
pub mod state;
pub mod telemetry;

pub use config::ServiceConfig;
pub use error::AppError;
pub use routes::create_router;
pub use state::AppState;
