//! Builders wiring outbound adapters into the HTTP states.

use std::io;
use std::sync::Arc;

use mockable::DefaultClock;
use reqwest::Client;
use tracing::info;

use super::config::{MarketSettings, PaymentSettings};
use crate::domain::{MarketService, SettlementPorts, SettlementService};
use crate::inbound::http::state::{MarketState, PaymentState};
use crate::outbound::persistence::{InMemoryMarketRepository, InMemoryTransactionRepository};
use crate::outbound::quotes::HttpCurrencyQuoteSource;
use crate::outbound::users::{HttpReceiptReporter, HttpUserDirectory};

/// Wire the settlement service over the users service and an in-memory
/// transaction store.
///
/// Directory and reporter share one reqwest client.
///
/// # Errors
/// Returns [`io::Error`] when the settings are invalid or the HTTP client
/// cannot be built.
pub(super) fn build_payment_state(settings: &PaymentSettings) -> io::Result<PaymentState> {
    let users_base_url = settings.users_base_url().map_err(io::Error::other)?;
    let client = Client::builder()
        .timeout(settings.client_timeout())
        .build()
        .map_err(io::Error::other)?;

    let directory = HttpUserDirectory::with_client(client.clone(), users_base_url.clone());
    let reporter =
        HttpReceiptReporter::with_client(client, users_base_url.clone()).map_err(io::Error::other)?;
    let config = settings.settlement_config();
    info!(
        users_base_url = %users_base_url,
        report_policy = ?config.report_policy,
        report_attempts = config.report_retry.max_attempts(),
        "payment adapters configured"
    );

    let service = Arc::new(SettlementService::new(
        SettlementPorts::new(
            Arc::new(directory),
            Arc::new(InMemoryTransactionRepository::new()),
            Arc::new(reporter),
        ),
        Arc::new(DefaultClock),
        config,
    ));
    Ok(PaymentState::new(service.clone(), service))
}

/// Wire the market service over an in-memory store and the quotes API.
///
/// # Errors
/// Returns [`io::Error`] when the settings are invalid or the HTTP client
/// cannot be built.
pub(super) fn build_market_state(settings: &MarketSettings) -> io::Result<MarketState> {
    let quotes_base_url = settings.quotes_base_url().map_err(io::Error::other)?;
    let quotes = HttpCurrencyQuoteSource::new(quotes_base_url.clone(), settings.quotes_timeout())
        .map_err(io::Error::other)?;
    info!(quotes_base_url = %quotes_base_url, "market adapters configured");

    let service = Arc::new(MarketService::new(
        Arc::new(InMemoryMarketRepository::new()),
        Arc::new(quotes),
    ));
    Ok(MarketState::new(service.clone(), service))
}
