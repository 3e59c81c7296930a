//! Reqwest-backed receipt reporter.
//!
//! Posts the receipt to `{base}/users/pagamentos` and accepts the echo only
//! when it names the same transaction.

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use super::dto::ComprovanteDto;
use crate::domain::Receipt;
use crate::domain::ports::{ReceiptReporter, ReceiptReporterError};
use crate::outbound::http_support::{join_path, status_message};

const RECEIPTS_PATH: &str = "users/pagamentos";

/// Reporter adapter performing one POST per attempt.
#[derive(Debug, Clone)]
pub struct HttpReceiptReporter {
    client: Client,
    endpoint: Url,
}

impl HttpReceiptReporter {
    /// Build an adapter over an existing, shared client.
    ///
    /// # Errors
    ///
    /// Returns an error when the receipts endpoint cannot be derived from
    /// `base_url`.
    pub fn with_client(client: Client, base_url: Url) -> Result<Self, ReceiptReporterError> {
        let endpoint = join_path(&base_url, RECEIPTS_PATH).map_err(|error| {
            ReceiptReporterError::transport(format!("invalid users service URL: {error}"))
        })?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl ReceiptReporter for HttpReceiptReporter {
    async fn report(&self, receipt: &Receipt) -> Result<Receipt, ReceiptReporterError> {
        debug!(transaction_id = %receipt.id(), endpoint = %self.endpoint, "reporting receipt");
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&ComprovanteDto::from(receipt))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        parse_echo(receipt, body.as_ref())
    }
}

fn parse_echo(sent: &Receipt, body: &[u8]) -> Result<Receipt, ReceiptReporterError> {
    let echo: ComprovanteDto = serde_json::from_slice(body).map_err(|error| {
        ReceiptReporterError::rejected(format!("invalid receipt acknowledgement: {error}"))
    })?;
    if echo.id != sent.id() {
        return Err(ReceiptReporterError::rejected(format!(
            "acknowledged receipt {} instead of {}",
            echo.id,
            sent.id()
        )));
    }
    Ok(echo.into_receipt())
}

fn map_transport_error(error: reqwest::Error) -> ReceiptReporterError {
    if error.is_timeout() {
        ReceiptReporterError::timeout(error.to_string())
    } else {
        ReceiptReporterError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> ReceiptReporterError {
    let message = status_message(status, body);
    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            ReceiptReporterError::timeout(message)
        }
        _ if status.is_client_error() => ReceiptReporterError::rejected(message),
        _ => ReceiptReporterError::transport(message),
    }
}
