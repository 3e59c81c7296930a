//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

pub mod error;
pub mod health;
pub mod markets;
pub mod payments;
pub mod schemas;
pub mod state;
pub mod validation;

pub use error::ApiResult;

/// JSON extractor settings shared by both services.
///
/// Malformed or mistyped bodies become `400 invalid_request` envelopes
/// instead of Actix's plain-text default.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(16 * 1024)
        .error_handler(|error, _req| validation::invalid_body_error(&error).into())
}
