//! Driven port for market persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Market, MarketDraft};

use super::define_port_error;

define_port_error! {
    /// Errors raised by market store adapters.
    pub enum MarketRepositoryError {
        /// The store could not be reached.
        Connection { message: String } =>
            "market store connection failed: {message}",
        /// The operation was rejected.
        Query { message: String } =>
            "market store query failed: {message}",
    }
}

/// Port for storing and querying markets.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketRepository: Send + Sync {
    /// Store a new market under a fresh id.
    async fn save(&self, draft: MarketDraft) -> Result<Market, MarketRepositoryError>;

    /// Replace the fields of an existing market. `None` when absent.
    async fn update(
        &self,
        id: &Uuid,
        draft: MarketDraft,
    ) -> Result<Option<Market>, MarketRepositoryError>;

    /// Look up a market by id.
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Market>, MarketRepositoryError>;

    /// Markets whose name equals `name`, ignoring case.
    async fn find_by_name(&self, name: &str) -> Result<Vec<Market>, MarketRepositoryError>;

    /// Every market, ordered by name.
    async fn list_all(&self) -> Result<Vec<Market>, MarketRepositoryError>;

    /// Remove a market. Returns whether it existed.
    async fn delete(&self, id: &Uuid) -> Result<bool, MarketRepositoryError>;
}
