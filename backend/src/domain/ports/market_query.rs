//! Driving port for market reads and currency quotes.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{CurrencyQuote, Error, Market};

/// Domain use-case port for market lookups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketQuery: Send + Sync {
    /// Fetch one market. Fails with `NotFound` if absent.
    async fn find(&self, id: Uuid) -> Result<Market, Error>;

    /// Markets matching `name`. Blank names fail with `InvalidRequest`.
    async fn find_by_name(&self, name: &str) -> Result<Vec<Market>, Error>;

    /// Every market.
    async fn list(&self) -> Result<Vec<Market>, Error>;

    /// Latest quote for `code`. Blank codes fail with `InvalidRequest`;
    /// provider failures and empty answers fail with `NotFound`.
    async fn quote(&self, code: &str) -> Result<CurrencyQuote, Error>;
}
