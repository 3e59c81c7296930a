//! Settlement failure taxonomy.

use uuid::Uuid;

use crate::domain::ports::define_port_error;
use crate::domain::Error;

define_port_error! {
    /// Why a settlement did not complete.
    ///
    /// The first four kinds abort the request before anything is reported.
    /// `ReportFailed` happens after commit and only surfaces as an error
    /// under [`super::ReportPolicy::Strict`].
    pub enum SettlementError {
        /// The request or the directory response is malformed.
        InvalidPaymentRequest { message: String } =>
            "invalid payment request: {message}",
        /// The payer cannot cover the amount.
        InsufficientBalance { username: String } =>
            "insufficient balance for user {username}",
        /// The users service could not resolve the parties.
        DirectoryUnavailable { message: String } =>
            "user directory unavailable: {message}",
        /// The transaction could not be persisted.
        StoreWriteFailed { message: String } =>
            "transaction store write failed: {message}",
        /// The committed receipt could not be reported.
        ReportFailed { transaction_id: Uuid, message: String } =>
            "receipt report failed for committed transaction {transaction_id}: {message}",
    }
}

/// Discriminant of [`SettlementError`], carried by the failed stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// See [`SettlementError::InvalidPaymentRequest`].
    InvalidPaymentRequest,
    /// See [`SettlementError::InsufficientBalance`].
    InsufficientBalance,
    /// See [`SettlementError::DirectoryUnavailable`].
    DirectoryUnavailable,
    /// See [`SettlementError::StoreWriteFailed`].
    StoreWriteFailed,
    /// See [`SettlementError::ReportFailed`].
    ReportFailed,
}

impl SettlementError {
    /// Failure category.
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::InvalidPaymentRequest { .. } => FailureKind::InvalidPaymentRequest,
            Self::InsufficientBalance { .. } => FailureKind::InsufficientBalance,
            Self::DirectoryUnavailable { .. } => FailureKind::DirectoryUnavailable,
            Self::StoreWriteFailed { .. } => FailureKind::StoreWriteFailed,
            Self::ReportFailed { .. } => FailureKind::ReportFailed,
        }
    }

    /// Whether a transaction was persisted before this failure.
    pub fn is_post_commit(&self) -> bool {
        matches!(self, Self::ReportFailed { .. })
    }
}

impl From<SettlementError> for Error {
    fn from(error: SettlementError) -> Self {
        let message = error.to_string();
        match error {
            SettlementError::InvalidPaymentRequest { .. } => Error::invalid_request(message),
            SettlementError::InsufficientBalance { username } => {
                Error::insufficient_balance(message)
                    .with_details(serde_json::json!({ "username": username }))
            }
            SettlementError::DirectoryUnavailable { .. } => Error::service_unavailable(message),
            SettlementError::StoreWriteFailed { .. } => Error::internal(message),
            SettlementError::ReportFailed { transaction_id, .. } => Error::bad_gateway(message)
                .with_details(serde_json::json!({ "transactionId": transaction_id })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(SettlementError::invalid_payment_request("x"), ErrorCode::InvalidRequest)]
    #[case(SettlementError::insufficient_balance("bob"), ErrorCode::InsufficientBalance)]
    #[case(SettlementError::directory_unavailable("x"), ErrorCode::ServiceUnavailable)]
    #[case(SettlementError::store_write_failed("x"), ErrorCode::InternalError)]
    #[case(SettlementError::report_failed(Uuid::nil(), "x"), ErrorCode::BadGateway)]
    fn maps_every_kind_to_a_distinct_code(
        #[case] error: SettlementError,
        #[case] expected: ErrorCode,
    ) {
        assert_eq!(Error::from(error).code(), expected);
    }

    #[rstest]
    fn insufficient_balance_names_the_payer() {
        let error = Error::from(SettlementError::insufficient_balance("bob"));
        assert!(error.message().contains("bob"));
        assert_eq!(
            error.details(),
            Some(&serde_json::json!({ "username": "bob" }))
        );
    }

    #[rstest]
    fn only_report_failures_are_post_commit() {
        assert!(SettlementError::report_failed(Uuid::nil(), "x").is_post_commit());
        assert!(!SettlementError::store_write_failed("x").is_post_commit());
    }
}
