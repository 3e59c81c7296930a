//! Domain primitives, services, and ports.
//!
//! Purpose: keep the payment and market rules free of transport and
//! storage concerns. Adapters reach the domain only through [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure envelope.
//! - TraceId: per-request correlation identifier.
//! - PaymentRequest, DirectoryUser, TransactionDraft, Transaction, Receipt:
//!   the payment entities.
//! - SettlementService: the payment pipeline.
//! - Market, MarketDraft, CurrencyCode, CurrencyQuote, MarketService: the
//!   market catalogue.

pub mod error;
pub mod market;
pub mod market_service;
pub mod payment;
pub mod ports;
pub mod settlement;
pub mod trace_id;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::market::{CurrencyCode, CurrencyQuote, Market, MarketDraft, MarketValidationError};
pub use self::market_service::MarketService;
pub use self::payment::{
    DirectoryUser, PaymentRequest, PaymentRequestError, Receipt, TRANSFER_PARTIES, Transaction,
    TransactionDraft,
};
pub use self::settlement::{
    FailureKind, ReportOutcome, ReportPolicy, ReportRetry, Settlement, SettlementConfig,
    SettlementError, SettlementPorts, SettlementService, SettlementStage, SettlementTimeouts,
    align_to_request,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use ada_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
