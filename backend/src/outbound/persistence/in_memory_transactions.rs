//! Append-only transaction store held in memory.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::ports::{TransactionRepository, TransactionRepositoryError};
use crate::domain::{Transaction, TransactionDraft};

/// Thread-safe in-memory [`TransactionRepository`].
#[derive(Debug, Default, Clone)]
pub struct InMemoryTransactionRepository {
    transactions: Arc<RwLock<HashMap<Uuid, Transaction>>>,
}

impl InMemoryTransactionRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TransactionRepository for InMemoryTransactionRepository {
    async fn save(&self, draft: TransactionDraft) -> Result<Transaction, TransactionRepositoryError> {
        let mut transactions = self.transactions.write().await;
        let mut id = Uuid::new_v4();
        while transactions.contains_key(&id) {
            id = Uuid::new_v4();
        }
        let transaction = draft.into_transaction(id);
        transactions.insert(id, transaction.clone());
        Ok(transaction)
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Transaction>, TransactionRepositoryError> {
        let transactions = self.transactions.read().await;
        Ok(transactions.get(id).cloned())
    }

    async fn count(&self) -> Result<usize, TransactionRepositoryError> {
        Ok(self.transactions.read().await.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn draft() -> TransactionDraft {
        TransactionDraft::new("bob", "alice", dec!(10), Utc::now())
    }

    #[rstest]
    #[tokio::test]
    async fn save_assigns_distinct_ids() {
        let store = InMemoryTransactionRepository::new();

        let first = store.save(draft()).await.expect("saved");
        let second = store.save(draft()).await.expect("saved");

        assert_ne!(first.id(), second.id());
        assert_eq!(store.count().await.expect("count"), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn find_by_id_reads_back_saved_transaction() {
        let store = InMemoryTransactionRepository::new();
        let saved = store.save(draft()).await.expect("saved");

        let found = store.find_by_id(&saved.id()).await.expect("lookup");

        assert_eq!(found, Some(saved));
        assert_eq!(store.find_by_id(&Uuid::nil()).await.expect("lookup"), None);
    }

    #[rstest]
    #[tokio::test]
    async fn clones_share_storage() {
        let store = InMemoryTransactionRepository::new();
        let clone = store.clone();

        clone.save(draft()).await.expect("saved");

        assert_eq!(store.count().await.expect("count"), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn concurrent_writes_are_independent_appends() {
        let store = InMemoryTransactionRepository::new();
        let writes = (0..16).map(|_| {
            let store = store.clone();
            tokio::spawn(async move { store.save(draft()).await })
        });

        for handle in futures::future::join_all(writes).await {
            handle.expect("task joined").expect("saved");
        }

        assert_eq!(store.count().await.expect("count"), 16);
    }
}
