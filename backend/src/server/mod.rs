//! Server construction and middleware wiring.
//!
//! Each service gets an app builder (used directly by tests) and a
//! `create_*_server` function binding it to the configured address.

mod config;
mod state_builders;

pub use config::{MarketSettings, PaymentSettings, SettingsError};

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use crate::Trace;
#[cfg(debug_assertions)]
use crate::doc::{ApiDoc, MarketApiDoc};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::state::{MarketState, PaymentState};
use crate::inbound::http::{json_config, markets, payments};
use state_builders::{build_market_state, build_payment_state};

/// Build the payment service application.
pub fn payment_app(
    health_state: web::Data<HealthState>,
    state: web::Data<PaymentState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(state)
        .app_data(json_config())
        .wrap(Trace)
        .service(payments::create_payment)
        .service(payments::get_payment)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Build the market service application.
pub fn market_app(
    health_state: web::Data<HealthState>,
    state: web::Data<MarketState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(state)
        .app_data(json_config())
        .wrap(Trace)
        .configure(markets::configure)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(
        SwaggerUi::new("/docs").url("/api-docs/openapi.json", MarketApiDoc::openapi()),
    );

    app
}

/// Construct the payment HTTP server.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when the settings are invalid or binding the
/// socket fails.
pub fn create_payment_server(
    health_state: web::Data<HealthState>,
    settings: &PaymentSettings,
) -> std::io::Result<Server> {
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let state = web::Data::new(build_payment_state(settings)?);
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || payment_app(server_health_state.clone(), state.clone()))
        .bind(bind_addr)?
        .run();

    info!(%bind_addr, "payment service listening");
    health_state.mark_ready();
    Ok(server)
}

/// Construct the market HTTP server.
///
/// # Errors
/// Propagates [`std::io::Error`] when the settings are invalid or binding the
/// socket fails.
pub fn create_market_server(
    health_state: web::Data<HealthState>,
    settings: &MarketSettings,
) -> std::io::Result<Server> {
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let state = web::Data::new(build_market_state(settings)?);
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || market_app(server_health_state.clone(), state.clone()))
        .bind(bind_addr)?
        .run();

    info!(%bind_addr, "market service listening");
    health_state.mark_ready();
    Ok(server)
}
