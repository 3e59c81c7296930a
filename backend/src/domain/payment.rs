//! Payment entities: the request, the directory snapshot, the persisted
//! transaction, and the receipt projected from it.
//!
//! Ownership follows the settlement pipeline: a [`PaymentRequest`] is built
//! by the caller, [`DirectoryUser`] snapshots come from the users service, a
//! [`TransactionDraft`] is produced by pairing, a store turns the draft into
//! a [`Transaction`], and a [`Receipt`] can only be projected from that
//! persisted transaction.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

/// Number of parties in a transfer: one payer followed by one payee.
pub const TRANSFER_PARTIES: usize = 2;

/// Snapshot of a user as reported by the external directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryUser {
    /// Directory username.
    pub username: String,
    /// Balance available to spend at snapshot time.
    pub balance: Decimal,
}

impl DirectoryUser {
    /// Build a snapshot.
    pub fn new(username: impl Into<String>, balance: Decimal) -> Self {
        Self {
            username: username.into(),
            balance,
        }
    }
}

/// Validation failures for [`PaymentRequest`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaymentRequestError {
    /// The request did not name exactly one payer and one payee.
    #[error("expected exactly 2 usernames, got {count}")]
    WrongUsernameCount {
        /// Number of usernames supplied.
        count: usize,
    },
    /// A username was blank.
    #[error("username at position {position} must not be blank")]
    BlankUsername {
        /// Zero-based position of the blank entry.
        position: usize,
    },
    /// The amount was zero or negative.
    #[error("amount must be greater than zero, got {amount}")]
    NonPositiveAmount {
        /// Rejected amount.
        amount: Decimal,
    },
}

/// A validated transfer request.
///
/// ## Invariants
/// - exactly two usernames, payer first, both non-blank after trimming;
/// - `amount > 0`.
///
/// # Examples
/// ```
/// use ada_backend::domain::PaymentRequest;
/// use rust_decimal::Decimal;
///
/// let request = PaymentRequest::new(
///     vec!["bob".to_owned(), "alice".to_owned()],
///     Decimal::new(1000, 2),
/// )
/// .expect("valid request");
/// assert_eq!(request.payer(), "bob");
/// assert_eq!(request.payee(), "alice");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRequest {
    usernames: [String; TRANSFER_PARTIES],
    amount: Decimal,
}

impl PaymentRequest {
    /// Validate and build a request from the ordered username list.
    pub fn new(usernames: Vec<String>, amount: Decimal) -> Result<Self, PaymentRequestError> {
        let count = usernames.len();
        let usernames: [String; TRANSFER_PARTIES] = usernames
            .try_into()
            .map_err(|_| PaymentRequestError::WrongUsernameCount { count })?;
        let usernames = usernames.map(|name| name.trim().to_owned());
        if let Some(position) = usernames.iter().position(String::is_empty) {
            return Err(PaymentRequestError::BlankUsername { position });
        }
        if amount <= Decimal::ZERO {
            return Err(PaymentRequestError::NonPositiveAmount { amount });
        }
        Ok(Self { usernames, amount })
    }

    /// Usernames in request order, payer first.
    pub fn usernames(&self) -> &[String] {
        &self.usernames
    }

    /// Paying user.
    pub fn payer(&self) -> &str {
        let [payer, _] = &self.usernames;
        payer
    }

    /// Receiving user.
    pub fn payee(&self) -> &str {
        let [_, payee] = &self.usernames;
        payee
    }

    /// Amount to transfer.
    pub fn amount(&self) -> Decimal {
        self.amount
    }
}

/// A validated transfer that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionDraft {
    payer: String,
    payee: String,
    amount: Decimal,
    created_at: DateTime<Utc>,
}

impl TransactionDraft {
    /// Build a draft. Balance checks belong to the pairing step, not here.
    pub fn new(
        payer: impl Into<String>,
        payee: impl Into<String>,
        amount: Decimal,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            payer: payer.into(),
            payee: payee.into(),
            amount,
            created_at,
        }
    }

    /// Paying user.
    pub fn payer(&self) -> &str {
        &self.payer
    }

    /// Receiving user.
    pub fn payee(&self) -> &str {
        &self.payee
    }

    /// Transferred amount.
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Turn the draft into a persisted transaction with a store-assigned id.
    ///
    /// Only transaction stores should call this, once the write is durable.
    pub fn into_transaction(self, id: Uuid) -> Transaction {
        Transaction {
            id,
            payer: self.payer,
            payee: self.payee,
            amount: self.amount,
            created_at: self.created_at,
        }
    }
}

/// A persisted, immutable transfer record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    id: Uuid,
    payer: String,
    payee: String,
    amount: Decimal,
    created_at: DateTime<Utc>,
}

impl Transaction {
    /// Store-assigned identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Paying user.
    pub fn payer(&self) -> &str {
        &self.payer
    }

    /// Receiving user.
    pub fn payee(&self) -> &str {
        &self.payee
    }

    /// Transferred amount.
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Proof that a transaction was committed.
///
/// There is no way to build a receipt except from a [`Transaction`], so a
/// receipt always refers to a persisted record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    id: Uuid,
    payer: String,
    payee: String,
    amount: Decimal,
    created_at: DateTime<Utc>,
}

impl Receipt {
    /// Identifier of the underlying transaction.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Paying user.
    pub fn payer(&self) -> &str {
        &self.payer
    }

    /// Receiving user.
    pub fn payee(&self) -> &str {
        &self.payee
    }

    /// Transferred amount.
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Transaction timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl From<&Transaction> for Receipt {
    fn from(transaction: &Transaction) -> Self {
        Self {
            id: transaction.id,
            payer: transaction.payer.clone(),
            payee: transaction.payee.clone(),
            amount: transaction.amount,
            created_at: transaction.created_at,
        }
    }
}
