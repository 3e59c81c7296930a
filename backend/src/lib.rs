//! Payment settlement and market services.
//!
//! The crate follows a ports-and-adapters layout:
//!
//! - [`domain`] owns entities, the settlement pipeline, and port traits.
//! - [`inbound`] exposes the domain over HTTP (Actix Web).
//! - [`outbound`] implements ports against the users service, the currency
//!   quote API, and in-memory stores.
//! - [`server`] wires adapters into runnable HTTP servers.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::{ApiDoc, MarketApiDoc};
pub use domain::TraceId;
pub use middleware::Trace;
