//! Driving port for reading committed receipts.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Error, Receipt};

/// Domain use-case port for receipt lookups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentQuery: Send + Sync {
    /// Return the receipt of a persisted transaction.
    ///
    /// Fails with [`crate::domain::ErrorCode::NotFound`] when no transaction
    /// has the given id.
    async fn find_receipt(&self, id: Uuid) -> Result<Receipt, Error>;
}
