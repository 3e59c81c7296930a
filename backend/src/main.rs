//! Payment service entry-point: loads settings, wires adapters, and serves
//! `/pagamentos` plus health probes.

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr};
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use ada_backend::inbound::http::health::HealthState;
use ada_backend::server::{PaymentSettings, create_payment_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = PaymentSettings::load().wrap_err("failed to load payment settings")?;
    let health_state = web::Data::new(HealthState::new());
    let server = create_payment_server(health_state, &settings)
        .wrap_err("failed to start payment server")?;
    server.await.wrap_err("payment server terminated")?;
    Ok(())
}
