//! Driven port for the append-only transaction store.
//!
//! The store assigns identifiers on write. No update or delete exists:
//! a persisted transaction is the source of truth for its receipt.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Transaction, TransactionDraft};

use super::define_port_error;

define_port_error! {
    /// Errors raised by transaction store adapters.
    pub enum TransactionRepositoryError {
        /// The store could not be reached.
        Connection { message: String } =>
            "transaction store connection failed: {message}",
        /// The write or read was rejected.
        Query { message: String } =>
            "transaction store query failed: {message}",
    }
}

/// Port for appending transactions and reading them back.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TransactionRepository: Send + Sync {
    /// Persist `draft`, returning the stored transaction with its new id.
    async fn save(&self, draft: TransactionDraft) -> Result<Transaction, TransactionRepositoryError>;

    /// Look up a transaction by id.
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Transaction>, TransactionRepositoryError>;

    /// Number of stored transactions.
    async fn count(&self) -> Result<usize, TransactionRepositoryError>;
}
