//! Driving port for market mutations.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Error, Market, MarketDraft};

/// Domain use-case port for creating, updating, and removing markets.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketCommand: Send + Sync {
    /// Store a new market.
    async fn create(&self, draft: MarketDraft) -> Result<Market, Error>;

    /// Replace an existing market's fields. Fails with `NotFound` if absent.
    async fn update(&self, id: Uuid, draft: MarketDraft) -> Result<Market, Error>;

    /// Delete a market. Fails with `NotFound` if absent.
    async fn remove(&self, id: Uuid) -> Result<(), Error>;
}
