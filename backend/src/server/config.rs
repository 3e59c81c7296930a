//! Service settings loaded via OrthoConfig.
//!
//! Every field is optional on the wire; accessors supply the defaults so a
//! bare `pagamento` or `mercado` invocation talks to local collaborators.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::domain::{ReportPolicy, ReportRetry, SettlementConfig, SettlementTimeouts};

const DEFAULT_PAYMENT_BIND_ADDR: &str = "0.0.0.0:8081";
const DEFAULT_USERS_BASE_URL: &str = "http://localhost:8080";
const DEFAULT_STAGE_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_REPORT_MAX_ATTEMPTS: u32 = 1;
const DEFAULT_REPORT_RETRY_BACKOFF_MS: u64 = 200;

const DEFAULT_MARKET_BIND_ADDR: &str = "0.0.0.0:8082";
const DEFAULT_QUOTES_BASE_URL: &str = "https://economia.awesomeapi.com.br/";
const DEFAULT_QUOTES_TIMEOUT_MS: u64 = 5_000;

/// Invalid settings detected while preparing the server.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The bind address is not a socket address.
    #[error("invalid bind address {value:?}: {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    /// A collaborator base URL does not parse.
    #[error("invalid {field} {value:?}: {source}")]
    Url {
        field: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },
}

fn parse_bind_addr(value: &str) -> Result<SocketAddr, SettingsError> {
    value.parse().map_err(|source| SettingsError::BindAddr {
        value: value.to_owned(),
        source,
    })
}

fn parse_url(field: &'static str, value: &str) -> Result<Url, SettingsError> {
    Url::parse(value).map_err(|source| SettingsError::Url {
        field,
        value: value.to_owned(),
        source,
    })
}

fn millis_or(value: Option<u64>, default: u64) -> Duration {
    Duration::from_millis(value.unwrap_or(default))
}

/// Settings for the payment service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PAGAMENTO")]
pub struct PaymentSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// Base URL of the users service.
    pub users_base_url: Option<String>,
    /// Deadline for resolving both users, in milliseconds.
    pub directory_timeout_ms: Option<u64>,
    /// Deadline for persisting the transaction, in milliseconds.
    pub store_timeout_ms: Option<u64>,
    /// Deadline per receipt report attempt, in milliseconds.
    pub report_timeout_ms: Option<u64>,
    /// Receipt report attempts, including the first.
    pub report_max_attempts: Option<u32>,
    /// Pause between receipt report attempts, in milliseconds.
    pub report_retry_backoff_ms: Option<u64>,
    /// Fail the request with 502 when the receipt cannot be reported.
    #[ortho_config(default = false)]
    pub strict_reporting: bool,
}

impl PaymentSettings {
    /// Listen address, defaulting to `0.0.0.0:8081`.
    ///
    /// # Errors
    /// Returns [`SettingsError::BindAddr`] when the value does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        parse_bind_addr(self.bind_addr.as_deref().unwrap_or(DEFAULT_PAYMENT_BIND_ADDR))
    }

    /// Users service base URL, defaulting to `http://localhost:8080`.
    ///
    /// # Errors
    /// Returns [`SettingsError::Url`] when the value does not parse.
    pub fn users_base_url(&self) -> Result<Url, SettingsError> {
        parse_url(
            "users_base_url",
            self.users_base_url
                .as_deref()
                .unwrap_or(DEFAULT_USERS_BASE_URL),
        )
    }

    /// The longest single outbound call; used as the HTTP client timeout.
    pub fn client_timeout(&self) -> Duration {
        let timeouts = self.settlement_config().timeouts;
        timeouts.directory.max(timeouts.report)
    }

    /// Settlement pipeline configuration.
    pub fn settlement_config(&self) -> SettlementConfig {
        SettlementConfig {
            timeouts: SettlementTimeouts {
                directory: millis_or(self.directory_timeout_ms, DEFAULT_STAGE_TIMEOUT_MS),
                store: millis_or(self.store_timeout_ms, DEFAULT_STAGE_TIMEOUT_MS),
                report: millis_or(self.report_timeout_ms, DEFAULT_STAGE_TIMEOUT_MS),
            },
            report_policy: if self.strict_reporting {
                ReportPolicy::Strict
            } else {
                ReportPolicy::BestEffort
            },
            report_retry: ReportRetry::new(
                self.report_max_attempts
                    .unwrap_or(DEFAULT_REPORT_MAX_ATTEMPTS),
                millis_or(self.report_retry_backoff_ms, DEFAULT_REPORT_RETRY_BACKOFF_MS),
            ),
        }
    }
}

/// Settings for the market service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "MERCADO")]
pub struct MarketSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// Base URL of the currency quotes API.
    pub quotes_base_url: Option<String>,
    /// Quote request timeout, in milliseconds.
    pub quotes_timeout_ms: Option<u64>,
}

impl MarketSettings {
    /// Listen address, defaulting to `0.0.0.0:8082`.
    ///
    /// # Errors
    /// Returns [`SettingsError::BindAddr`] when the value does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        parse_bind_addr(self.bind_addr.as_deref().unwrap_or(DEFAULT_MARKET_BIND_ADDR))
    }

    /// Quotes API base URL.
    ///
    /// # Errors
    /// Returns [`SettingsError::Url`] when the value does not parse.
    pub fn quotes_base_url(&self) -> Result<Url, SettingsError> {
        parse_url(
            "quotes_base_url",
            self.quotes_base_url
                .as_deref()
                .unwrap_or(DEFAULT_QUOTES_BASE_URL),
        )
    }

    /// Quote request timeout.
    pub fn quotes_timeout(&self) -> Duration {
        millis_or(self.quotes_timeout_ms, DEFAULT_QUOTES_TIMEOUT_MS)
    }
}
