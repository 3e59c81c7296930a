//! Pairing and balance validation.
//!
//! Pure and synchronous: given the resolved directory snapshots and the
//! amount, decide whether the transfer may proceed and build its draft.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::SettlementError;
use crate::domain::{DirectoryUser, TransactionDraft};

/// Reorder directory snapshots to follow the requested usernames.
///
/// Each requested name takes the first snapshot with that exact username.
/// Names the directory did not return are skipped, as are snapshots nobody
/// asked for, so a missing or substituted user leaves fewer entries than
/// were requested.
pub fn align_to_request(usernames: &[String], users: &[DirectoryUser]) -> Vec<DirectoryUser> {
    usernames
        .iter()
        .filter_map(|name| users.iter().find(|user| &user.username == name))
        .cloned()
        .collect()
}

/// Pair the payer (position 0) with the payee (position 1) and validate the
/// payer's balance.
///
/// Pairing is positional; usernames are never matched against the request.
/// Balances are compared exactly, with no rounding tolerance.
///
/// # Errors
/// - [`SettlementError::InvalidPaymentRequest`] unless exactly two users
///   were resolved. Checked before any balance comparison.
/// - [`SettlementError::InsufficientBalance`] when `payer.balance < amount`.
pub fn pair_transfer(
    users: &[DirectoryUser],
    amount: Decimal,
    now: DateTime<Utc>,
) -> Result<TransactionDraft, SettlementError> {
    let [payer, payee] = users else {
        return Err(SettlementError::invalid_payment_request(format!(
            "expected 2 resolved users, directory returned {}",
            users.len()
        )));
    };

    if payer.balance < amount {
        return Err(SettlementError::insufficient_balance(payer.username.as_str()));
    }

    Ok(TransactionDraft::new(
        payer.username.as_str(),
        payee.username.as_str(),
        amount,
        now,
    ))
}
