//! Payment API handlers.
//!
//! ```text
//! POST /pagamentos {"usernames":["bob","alice"],"valor":40.0}
//! GET /pagamentos/{id}
//! ```

use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::{HttpResponse, ResponseError, get, post, web};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::{
    Error, PaymentRequest, PaymentRequestError, Receipt, ReportOutcome, SettlementError,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::PaymentState;
use crate::inbound::http::validation::{FieldName, parse_uuid};

/// Response header telling clients whether the receipt reached the users
/// service.
pub const RECEIPT_REPORT_HEADER: &str = "Receipt-Report";

/// Payment request body for `POST /pagamentos`.
///
/// Example JSON:
/// `{"usernames":["bob","alice"],"valor":40.0}`
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct PaymentRequestBody {
    /// Payer first, payee second.
    #[schema(example = json!(["bob", "alice"]))]
    pub usernames: Vec<String>,
    /// Amount to transfer.
    #[schema(value_type = f64, example = 40.0)]
    pub valor: Decimal,
}

/// Receipt of a committed payment.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct ReceiptResponse {
    /// Transaction identifier.
    pub id: Uuid,
    /// Paying user.
    pub pagador: String,
    /// Receiving user.
    pub recebedor: String,
    /// Transferred amount.
    #[schema(value_type = f64)]
    pub valor: Decimal,
    /// Transaction timestamp.
    pub data: DateTime<Utc>,
}

impl From<&Receipt> for ReceiptResponse {
    fn from(receipt: &Receipt) -> Self {
        Self {
            id: receipt.id(),
            pagador: receipt.payer().to_owned(),
            recebedor: receipt.payee().to_owned(),
            valor: receipt.amount(),
            data: receipt.created_at(),
        }
    }
}

fn map_request_error(error: PaymentRequestError) -> Error {
    let field = match error {
        PaymentRequestError::WrongUsernameCount { .. }
        | PaymentRequestError::BlankUsername { .. } => "usernames",
        PaymentRequestError::NonPositiveAmount { .. } => "valor",
    };
    Error::invalid_request(format!("invalid payment request: {error}"))
        .with_details(json!({ "field": field }))
}

fn report_header_value(outcome: &ReportOutcome) -> &'static str {
    match outcome {
        ReportOutcome::Acknowledged => "acknowledged",
        ReportOutcome::Failed { .. } => "failed",
    }
}

/// Error response for a failure raised after the transaction was stored.
///
/// The body is the usual error envelope; the report header tells clients
/// the payment itself went through.
fn committed_failure_response(error: SettlementError) -> HttpResponse {
    warn!(error = %error, "payment committed but reported as failed");
    let mut response = Error::from(error).error_response();
    response.headers_mut().insert(
        HeaderName::from_static("receipt-report"),
        HeaderValue::from_static("failed"),
    );
    response
}

/// Execute a payment between two users.
#[utoipa::path(
    post,
    path = "/pagamentos",
    request_body = PaymentRequestBody,
    responses(
        (status = 201, description = "Payment committed", body = ReceiptResponse,
            headers(("Receipt-Report" = String, description = "acknowledged or failed"))),
        (status = 400, description = "Invalid payment request", body = ErrorSchema),
        (status = 422, description = "Insufficient balance", body = ErrorSchema),
        (status = 502, description = "Committed but the receipt report failed", body = ErrorSchema),
        (status = 503, description = "Users service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["pagamentos"],
    operation_id = "createPayment"
)]
#[post("/pagamentos")]
pub async fn create_payment(
    state: web::Data<PaymentState>,
    payload: web::Json<PaymentRequestBody>,
) -> ApiResult<HttpResponse> {
    let PaymentRequestBody { usernames, valor } = payload.into_inner();
    let request = PaymentRequest::new(usernames, valor).map_err(map_request_error)?;
    let settlement = match state.payments.settle(request).await {
        Ok(settlement) => settlement,
        Err(error) if error.is_post_commit() => return Ok(committed_failure_response(error)),
        Err(error) => return Err(error.into()),
    };
    info!(
        transaction_id = %settlement.receipt.id(),
        report = report_header_value(&settlement.report),
        "payment settled"
    );
    Ok(HttpResponse::Created()
        .insert_header((RECEIPT_REPORT_HEADER, report_header_value(&settlement.report)))
        .json(ReceiptResponse::from(&settlement.receipt)))
}

/// Fetch the receipt of a committed payment.
#[utoipa::path(
    get,
    path = "/pagamentos/{id}",
    params(("id" = String, Path, description = "Transaction identifier")),
    responses(
        (status = 200, description = "Receipt", body = ReceiptResponse),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 404, description = "Unknown transaction", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["pagamentos"],
    operation_id = "getPayment"
)]
#[get("/pagamentos/{id}")]
pub async fn get_payment(
    state: web::Data<PaymentState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ReceiptResponse>> {
    let id = parse_uuid(path.into_inner(), FieldName::new("id"))?;
    let receipt = state.receipts.find_receipt(id).await?;
    Ok(web::Json(ReceiptResponse::from(&receipt)))
}
