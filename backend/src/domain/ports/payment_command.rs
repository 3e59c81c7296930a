//! Driving port for executing payments.
//!
//! Inbound adapters call this port; the settlement service implements it.

use async_trait::async_trait;

use crate::domain::{PaymentRequest, Settlement, SettlementError};

/// Domain use-case port for settling a payment.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentCommand: Send + Sync {
    /// Settle `request` and return the committed receipt together with the
    /// outcome of the post-commit report.
    async fn settle(&self, request: PaymentRequest) -> Result<Settlement, SettlementError>;
}
