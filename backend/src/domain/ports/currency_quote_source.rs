//! Driven port for the external currency quotes API.

use async_trait::async_trait;

use crate::domain::{CurrencyCode, CurrencyQuote};

use super::define_port_error;

define_port_error! {
    /// Errors raised by quote sources.
    pub enum CurrencyQuoteSourceError {
        /// Network transport failed before a response arrived.
        Transport { message: String } =>
            "quote source transport failed: {message}",
        /// The call exceeded its timeout.
        Timeout { message: String } =>
            "quote source timeout: {message}",
        /// The provider answered with a non-success status.
        Status { status: u16, message: String } =>
            "quote source returned status {status}: {message}",
        /// The response body could not be decoded.
        Decode { message: String } =>
            "quote source response decode failed: {message}",
        /// The provider returned no quote for the code.
        Empty { code: String } =>
            "quote source returned no quote for {code}",
    }
}

/// Port for fetching the latest quote of a currency.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CurrencyQuoteSource: Send + Sync {
    /// Fetch the first quote the provider lists for `code`.
    async fn fetch_quote(
        &self,
        code: &CurrencyCode,
    ) -> Result<CurrencyQuote, CurrencyQuoteSourceError>;
}
