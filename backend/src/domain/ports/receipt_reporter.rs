//! Driven port for posting receipts back to the users service.
//!
//! Reporting happens after the transaction is committed, so its failures are
//! advisory unless the settlement service is configured otherwise.

use async_trait::async_trait;

use crate::domain::Receipt;

use super::define_port_error;

define_port_error! {
    /// Errors surfaced while reporting a receipt.
    pub enum ReceiptReporterError {
        /// Network transport failed before a response arrived.
        Transport { message: String } =>
            "receipt report transport failed: {message}",
        /// The call exceeded its timeout.
        Timeout { message: String } =>
            "receipt report timeout: {message}",
        /// The endpoint refused the receipt or acknowledged a different one.
        Rejected { message: String } =>
            "receipt report rejected: {message}",
    }
}

/// Port for notifying the users service of a committed receipt.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReceiptReporter: Send + Sync {
    /// Post `receipt` and return the acknowledged copy.
    async fn report(&self, receipt: &Receipt) -> Result<Receipt, ReceiptReporterError>;
}
