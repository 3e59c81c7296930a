//! Reqwest-backed currency quote source.
//!
//! Calls `GET {base}/{CODE}` and keeps the first element of the returned
//! array.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};

use super::dto::MoedaDto;
use crate::domain::ports::{CurrencyQuoteSource, CurrencyQuoteSourceError};
use crate::domain::{CurrencyCode, CurrencyQuote};
use crate::outbound::http_support::{join_path, status_message};

/// Quote source adapter.
#[derive(Debug, Clone)]
pub struct HttpCurrencyQuoteSource {
    client: Client,
    base_url: Url,
}

impl HttpCurrencyQuoteSource {
    /// Build an adapter using a reqwest client with an explicit request
    /// timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    fn quote_url(&self, code: &CurrencyCode) -> Result<Url, CurrencyQuoteSourceError> {
        join_path(&self.base_url, code.as_str()).map_err(|error| {
            CurrencyQuoteSourceError::transport(format!("invalid quotes URL: {error}"))
        })
    }
}

#[async_trait]
impl CurrencyQuoteSource for HttpCurrencyQuoteSource {
    async fn fetch_quote(
        &self,
        code: &CurrencyCode,
    ) -> Result<CurrencyQuote, CurrencyQuoteSourceError> {
        let response = self
            .client
            .get(self.quote_url(code)?)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(CurrencyQuoteSourceError::status(
                status.as_u16(),
                status_message(status, body.as_ref()),
            ));
        }
        parse_first_quote(code, body.as_ref())
    }
}

fn parse_first_quote(
    code: &CurrencyCode,
    body: &[u8],
) -> Result<CurrencyQuote, CurrencyQuoteSourceError> {
    let decoded: Vec<MoedaDto> = serde_json::from_slice(body).map_err(|error| {
        CurrencyQuoteSourceError::decode(format!("invalid quotes payload: {error}"))
    })?;
    decoded
        .into_iter()
        .next()
        .map(CurrencyQuote::from)
        .ok_or_else(|| CurrencyQuoteSourceError::empty(code.as_str()))
}

fn map_transport_error(error: reqwest::Error) -> CurrencyQuoteSourceError {
    if error.is_timeout() {
        CurrencyQuoteSourceError::timeout(error.to_string())
    } else {
        CurrencyQuoteSourceError::transport(error.to_string())
    }
}
