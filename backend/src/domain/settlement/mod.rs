//! Payment settlement orchestration.
//!
//! The service resolves both parties, validates the payer's balance,
//! persists the transaction, and reports the receipt back to the users
//! service. Every suspension point carries its own timeout. Persistence is
//! the commit point: anything that fails afterwards never undoes the write.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::ports::{
    PaymentCommand, PaymentQuery, ReceiptReporter, TransactionRepository, UserDirectory,
};
use crate::domain::{DirectoryUser, Error, PaymentRequest, Receipt, Transaction, TransactionDraft};

mod error;
mod pairing;
mod stage;

pub use error::{FailureKind, SettlementError};
pub use pairing::{align_to_request, pair_transfer};
pub use stage::SettlementStage;
use stage::StageTracker;

/// Driven adapters used by [`SettlementService`].
#[derive(Clone)]
pub struct SettlementPorts {
    /// Users service client.
    pub directory: Arc<dyn UserDirectory>,
    /// Append-only transaction store.
    pub transactions: Arc<dyn TransactionRepository>,
    /// Receipt notification client.
    pub reporter: Arc<dyn ReceiptReporter>,
}

impl SettlementPorts {
    /// Bundle the settlement adapters.
    pub fn new(
        directory: Arc<dyn UserDirectory>,
        transactions: Arc<dyn TransactionRepository>,
        reporter: Arc<dyn ReceiptReporter>,
    ) -> Self {
        Self {
            directory,
            transactions,
            reporter,
        }
    }
}

/// Per-stage deadlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettlementTimeouts {
    /// Deadline for resolving both users.
    pub directory: Duration,
    /// Deadline for the transaction write.
    pub store: Duration,
    /// Deadline for each report attempt.
    pub report: Duration,
}

impl Default for SettlementTimeouts {
    fn default() -> Self {
        Self {
            directory: Duration::from_secs(5),
            store: Duration::from_secs(5),
            report: Duration::from_secs(5),
        }
    }
}

/// How a failed post-commit report affects the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportPolicy {
    /// Log the failure and still return the committed receipt.
    #[default]
    BestEffort,
    /// Return [`SettlementError::ReportFailed`] although the transaction
    /// stays persisted.
    Strict,
}

/// Bounded retry of the report call. Retries never touch the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportRetry {
    max_attempts: u32,
    backoff: Duration,
}

impl ReportRetry {
    /// Build a retry policy. `max_attempts` counts the first call and is
    /// clamped to at least one.
    pub fn new(max_attempts: u32, backoff: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff,
        }
    }

    /// Total attempts including the first call.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Fixed delay between attempts.
    pub fn backoff(&self) -> Duration {
        self.backoff
    }
}

impl Default for ReportRetry {
    fn default() -> Self {
        Self::new(1, Duration::from_millis(200))
    }
}

/// Settlement behaviour knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SettlementConfig {
    /// Per-stage deadlines.
    pub timeouts: SettlementTimeouts,
    /// Post-commit report failure handling.
    pub report_policy: ReportPolicy,
    /// Report retry budget.
    pub report_retry: ReportRetry,
}

/// Result of the post-commit report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    /// The users service acknowledged the receipt.
    Acknowledged,
    /// Every attempt failed; the transaction is still committed.
    Failed {
        /// Last failure message.
        message: String,
    },
}

impl ReportOutcome {
    /// Whether the receipt was acknowledged.
    pub fn is_acknowledged(&self) -> bool {
        matches!(self, Self::Acknowledged)
    }
}

/// A committed payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settlement {
    /// Receipt of the persisted transaction.
    pub receipt: Receipt,
    /// Outcome of reporting that receipt.
    pub report: ReportOutcome,
}

/// Domain service executing payments end to end.
pub struct SettlementService {
    directory: Arc<dyn UserDirectory>,
    transactions: Arc<dyn TransactionRepository>,
    reporter: Arc<dyn ReceiptReporter>,
    clock: Arc<dyn Clock>,
    config: SettlementConfig,
}

impl SettlementService {
    /// Build a service from its adapters.
    pub fn new(ports: SettlementPorts, clock: Arc<dyn Clock>, config: SettlementConfig) -> Self {
        Self {
            directory: ports.directory,
            transactions: ports.transactions,
            reporter: ports.reporter,
            clock,
            config,
        }
    }

    /// Settle `request` and return only the receipt.
    ///
    /// ```rust,ignore
    /// let receipt = service.pay(request).await?;
    /// assert_eq!(receipt.payer(), "bob");
    /// ```
    pub async fn pay(&self, request: PaymentRequest) -> Result<Receipt, SettlementError> {
        self.settle(request)
            .await
            .map(|settlement| settlement.receipt)
    }

    /// Settle `request`, exposing whether the receipt report succeeded.
    ///
    /// # Errors
    /// The first four [`FailureKind`]s abort before commit and leave the
    /// store untouched. [`SettlementError::ReportFailed`] is only returned
    /// under [`ReportPolicy::Strict`].
    pub async fn settle(&self, request: PaymentRequest) -> Result<Settlement, SettlementError> {
        let mut stages = StageTracker::new();
        info!(
            payer = %request.payer(),
            payee = %request.payee(),
            amount = %request.amount(),
            "settling payment"
        );

        stages.advance();
        let users = self
            .resolve(request.usernames())
            .await
            .map_err(|error| stages.fail(error))?;

        stages.advance();
        let draft = pair_transfer(&users, request.amount(), self.clock.utc())
            .map_err(|error| stages.fail(error))?;

        stages.advance();
        let transaction = self
            .persist(draft)
            .await
            .map_err(|error| stages.fail(error))?;
        let receipt = Receipt::from(&transaction);
        info!(transaction_id = %receipt.id(), "transaction committed");

        stages.advance();
        let report = self.report(&receipt).await;
        if let ReportOutcome::Failed { message } = &report {
            warn!(
                transaction_id = %receipt.id(),
                error = %message,
                "receipt report failed after commit"
            );
            if self.config.report_policy == ReportPolicy::Strict {
                return Err(stages.fail(SettlementError::report_failed(
                    receipt.id(),
                    message.as_str(),
                )));
            }
        }

        stages.advance();
        debug!(stage = ?stages.current(), "settlement finished");
        Ok(Settlement { receipt, report })
    }

    async fn resolve(&self, usernames: &[String]) -> Result<Vec<DirectoryUser>, SettlementError> {
        let users = with_deadline(
            self.config.timeouts.directory,
            self.directory.resolve_users(usernames),
        )
        .await
        .map_err(|elapsed| SettlementError::directory_unavailable(elapsed.to_string()))?
        .map_err(|error| SettlementError::directory_unavailable(error.to_string()))?;
        if let Some(stray) = users.iter().find(|user| !usernames.contains(&user.username)) {
            return Err(SettlementError::invalid_payment_request(format!(
                "directory returned unrequested user {}",
                stray.username
            )));
        }
        let aligned = align_to_request(usernames, &users);
        if aligned.len() != usernames.len() {
            warn!(
                requested = usernames.len(),
                returned = users.len(),
                matched = aligned.len(),
                "directory answer does not cover every requested username"
            );
        }
        debug!(resolved = aligned.len(), "users resolved");
        Ok(aligned)
    }

    async fn persist(&self, draft: TransactionDraft) -> Result<Transaction, SettlementError> {
        with_deadline(self.config.timeouts.store, self.transactions.save(draft))
            .await
            .map_err(|elapsed| SettlementError::store_write_failed(elapsed.to_string()))?
            .map_err(|error| SettlementError::store_write_failed(error.to_string()))
    }

    async fn report(&self, receipt: &Receipt) -> ReportOutcome {
        let retry = self.config.report_retry;
        let mut last_message = String::new();

        for attempt in 1..=retry.max_attempts() {
            let result =
                with_deadline(self.config.timeouts.report, self.reporter.report(receipt)).await;
            match result {
                Ok(Ok(_acknowledged)) => {
                    debug!(attempt, "receipt acknowledged");
                    return ReportOutcome::Acknowledged;
                }
                Ok(Err(error)) => last_message = error.to_string(),
                Err(elapsed) => last_message = elapsed.to_string(),
            }
            if attempt < retry.max_attempts() {
                debug!(attempt, error = %last_message, "retrying receipt report");
                tokio::time::sleep(retry.backoff()).await;
            }
        }

        ReportOutcome::Failed {
            message: last_message,
        }
    }
}

/// Elapsed deadline for one stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("timed out after {}ms", .0.as_millis())]
struct DeadlineElapsed(Duration);

async fn with_deadline<F: Future>(limit: Duration, fut: F) -> Result<F::Output, DeadlineElapsed> {
    tokio::time::timeout(limit, fut)
        .await
        .map_err(|_| DeadlineElapsed(limit))
}

#[async_trait]
impl PaymentCommand for SettlementService {
    async fn settle(&self, request: PaymentRequest) -> Result<Settlement, SettlementError> {
        SettlementService::settle(self, request).await
    }
}

#[async_trait]
impl PaymentQuery for SettlementService {
    async fn find_receipt(&self, id: Uuid) -> Result<Receipt, Error> {
        let transaction = self
            .transactions
            .find_by_id(&id)
            .await
            .map_err(|error| Error::internal(error.to_string()))?;
        transaction
            .as_ref()
            .map(Receipt::from)
            .ok_or_else(|| Error::not_found(format!("transaction {id} not found")))
    }
}
