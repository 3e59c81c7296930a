//! Market store held in memory.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::ports::{MarketRepository, MarketRepositoryError};
use crate::domain::{Market, MarketDraft};

/// Thread-safe in-memory [`MarketRepository`].
#[derive(Debug, Default, Clone)]
pub struct InMemoryMarketRepository {
    markets: Arc<RwLock<HashMap<Uuid, Market>>>,
}

impl InMemoryMarketRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn sorted_by_name(mut markets: Vec<Market>) -> Vec<Market> {
    markets.sort_by(|left, right| {
        left.name()
            .cmp(right.name())
            .then_with(|| left.id().cmp(&right.id()))
    });
    markets
}

#[async_trait]
impl MarketRepository for InMemoryMarketRepository {
    async fn save(&self, draft: MarketDraft) -> Result<Market, MarketRepositoryError> {
        let mut markets = self.markets.write().await;
        let mut id = Uuid::new_v4();
        while markets.contains_key(&id) {
            id = Uuid::new_v4();
        }
        let market = draft.into_market(id);
        markets.insert(id, market.clone());
        Ok(market)
    }

    async fn update(
        &self,
        id: &Uuid,
        draft: MarketDraft,
    ) -> Result<Option<Market>, MarketRepositoryError> {
        let mut markets = self.markets.write().await;
        let Some(slot) = markets.get_mut(id) else {
            return Ok(None);
        };
        *slot = draft.into_market(*id);
        Ok(Some(slot.clone()))
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Market>, MarketRepositoryError> {
        Ok(self.markets.read().await.get(id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<Market>, MarketRepositoryError> {
        let markets = self.markets.read().await;
        let matches = markets
            .values()
            .filter(|market| market.name().eq_ignore_ascii_case(name))
            .cloned()
            .collect();
        Ok(sorted_by_name(matches))
    }

    async fn list_all(&self) -> Result<Vec<Market>, MarketRepositoryError> {
        let markets = self.markets.read().await;
        Ok(sorted_by_name(markets.values().cloned().collect()))
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, MarketRepositoryError> {
        Ok(self.markets.write().await.remove(id).is_some())
    }
}
