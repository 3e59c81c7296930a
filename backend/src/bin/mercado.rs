//! Market service entry-point: loads settings, wires adapters, and serves
//! `/mercados` plus health probes.

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr};
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use ada_backend::inbound::http::health::HealthState;
use ada_backend::server::{MarketSettings, create_market_server};

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

    let settings = MarketSettings::load().wrap_err("failed to load market settings")?;
    let health_state = web::Data::new(HealthState::new());
    create_market_server(health_state, &settings)
        .wrap_err("failed to start market server")?
        .await
        .wrap_err("market server terminated")?;
    Ok(())
}
