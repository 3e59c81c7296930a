//! Market domain service.
//!
//! Implements the market driving ports over a [`MarketRepository`] and a
//! [`CurrencyQuoteSource`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;
use uuid::Uuid;

use crate::domain::ports::{
    CurrencyQuoteSource, MarketCommand, MarketQuery, MarketRepository, MarketRepositoryError,
};
use crate::domain::{CurrencyCode, CurrencyQuote, Error, Market, MarketDraft, MarketValidationError};

/// Market service implementing [`MarketCommand`] and [`MarketQuery`].
#[derive(Clone)]
pub struct MarketService<R, Q> {
    markets: Arc<R>,
    quotes: Arc<Q>,
}

impl<R, Q> MarketService<R, Q> {
    /// Create a service over the given adapters.
    pub fn new(markets: Arc<R>, quotes: Arc<Q>) -> Self {
        Self { markets, quotes }
    }
}

fn map_repository_error(error: MarketRepositoryError) -> Error {
    match error {
        MarketRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("market store unavailable: {message}"))
        }
        MarketRepositoryError::Query { message } => {
            Error::internal(format!("market store error: {message}"))
        }
    }
}

fn missing_market(id: Uuid) -> Error {
    Error::not_found(format!("market {id} not found"))
}

impl From<MarketValidationError> for Error {
    fn from(error: MarketValidationError) -> Self {
        Error::invalid_request(error.to_string())
    }
}

#[async_trait]
impl<R, Q> MarketCommand for MarketService<R, Q>
where
    R: MarketRepository,
    Q: CurrencyQuoteSource,
{
    async fn create(&self, draft: MarketDraft) -> Result<Market, Error> {
        self.markets
            .save(draft)
            .await
            .map_err(map_repository_error)
    }

    async fn update(&self, id: Uuid, draft: MarketDraft) -> Result<Market, Error> {
        self.markets
            .update(&id, draft)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| missing_market(id))
    }

    async fn remove(&self, id: Uuid) -> Result<(), Error> {
        let removed = self
            .markets
            .delete(&id)
            .await
            .map_err(map_repository_error)?;
        if removed { Ok(()) } else { Err(missing_market(id)) }
    }
}

#[async_trait]
impl<R, Q> MarketQuery for MarketService<R, Q>
where
    R: MarketRepository,
    Q: CurrencyQuoteSource,
{
    async fn find(&self, id: Uuid) -> Result<Market, Error> {
        self.markets
            .find_by_id(&id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| missing_market(id))
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<Market>, Error> {
        let name = name.trim();
        if name.is_empty() {
            return Err(MarketValidationError::BlankSearch.into());
        }
        self.markets
            .find_by_name(name)
            .await
            .map_err(map_repository_error)
    }

    async fn list(&self) -> Result<Vec<Market>, Error> {
        self.markets.list_all().await.map_err(map_repository_error)
    }

    async fn quote(&self, code: &str) -> Result<CurrencyQuote, Error> {
        let code = CurrencyCode::new(code)?;
        self.quotes.fetch_quote(&code).await.map_err(|error| {
            warn!(currency = %code, error = %error, "currency quote lookup failed");
            Error::not_found(error.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{
        CurrencyQuoteSourceError, MockCurrencyQuoteSource, MockMarketRepository,
    };
    use rstest::rstest;

    fn make_service(
        markets: MockMarketRepository,
        quotes: MockCurrencyQuoteSource,
    ) -> MarketService<MockMarketRepository, MockCurrencyQuoteSource> {
        MarketService::new(Arc::new(markets), Arc::new(quotes))
    }

    fn draft(name: &str) -> MarketDraft {
        MarketDraft::new(name, None).expect("valid draft")
    }

    #[rstest]
    #[tokio::test]
    async fn create_returns_stored_market() {
        let id = Uuid::new_v4();
        let mut markets = MockMarketRepository::new();
        markets
            .expect_save()
            .times(1)
            .return_once(move |draft| Ok(draft.into_market(id)));

        let market = make_service(markets, MockCurrencyQuoteSource::new())
            .create(draft("Feira"))
            .await
            .expect("created");

        assert_eq!(market.id(), id);
        assert_eq!(market.name(), "Feira");
    }

    #[rstest]
    #[tokio::test]
    async fn update_of_missing_market_is_not_found() {
        let mut markets = MockMarketRepository::new();
        markets.expect_update().times(1).return_once(|_, _| Ok(None));

        let err = make_service(markets, MockCurrencyQuoteSource::new())
            .update(Uuid::nil(), draft("Feira"))
            .await
            .expect_err("missing");

        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[tokio::test]
    async fn remove_of_missing_market_is_not_found() {
        let mut markets = MockMarketRepository::new();
        markets.expect_delete().times(1).return_once(|_| Ok(false));

        let err = make_service(markets, MockCurrencyQuoteSource::new())
            .remove(Uuid::nil())
            .await
            .expect_err("missing");

        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[tokio::test]
    async fn blank_name_search_skips_the_store() {
        let mut markets = MockMarketRepository::new();
        markets.expect_find_by_name().never();

        let err = make_service(markets, MockCurrencyQuoteSource::new())
            .find_by_name("  ")
            .await
            .expect_err("blank");

        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[rstest]
    #[case(MarketRepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case(MarketRepositoryError::query("broken"), ErrorCode::InternalError)]
    #[tokio::test]
    async fn store_errors_are_mapped(
        #[case] error: MarketRepositoryError,
        #[case] expected: ErrorCode,
    ) {
        let mut markets = MockMarketRepository::new();
        markets.expect_list_all().times(1).return_once(move || Err(error));

        let err = make_service(markets, MockCurrencyQuoteSource::new())
            .list()
            .await
            .expect_err("store failed");

        assert_eq!(err.code(), expected);
    }

    #[rstest]
    #[tokio::test]
    async fn quote_uppercases_the_code() {
        let mut quotes = MockCurrencyQuoteSource::new();
        quotes
            .expect_fetch_quote()
            .withf(|code| code.as_str() == "USD")
            .times(1)
            .return_once(|_| {
                Ok(CurrencyQuote {
                    code: "USD".to_owned(),
                    codein: "BRL".to_owned(),
                    bid: "5.10".to_owned(),
                    ..CurrencyQuote::default()
                })
            });

        let quote = make_service(MockMarketRepository::new(), quotes)
            .quote("usd")
            .await
            .expect("quote");

        assert_eq!(quote.bid, "5.10");
    }

    #[rstest]
    #[case("", ErrorCode::InvalidRequest)]
    #[case("XYZ", ErrorCode::NotFound)]
    #[tokio::test]
    async fn quote_failures_are_mapped(#[case] code: &str, #[case] expected: ErrorCode) {
        let mut quotes = MockCurrencyQuoteSource::new();
        quotes
            .expect_fetch_quote()
            .returning(|code| Err(CurrencyQuoteSourceError::empty(code.as_str())));

        let err = make_service(MockMarketRepository::new(), quotes)
            .quote(code)
            .await
            .expect_err("failed");

        assert_eq!(err.code(), expected);
    }
}
