//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (directory, stores, reporter, quote source) are implemented
//! by `outbound` adapters. Driving ports (payment and market commands and
//! queries) are implemented by domain services and called by `inbound`.

mod macros;
pub(crate) use macros::define_port_error;

mod currency_quote_source;
mod market_command;
mod market_query;
mod market_repository;
mod payment_command;
mod payment_query;
mod receipt_reporter;
mod transaction_repository;
mod user_directory;

#[cfg(test)]
pub use currency_quote_source::MockCurrencyQuoteSource;
pub use currency_quote_source::{CurrencyQuoteSource, CurrencyQuoteSourceError};
#[cfg(test)]
pub use market_command::MockMarketCommand;
pub use market_command::MarketCommand;
#[cfg(test)]
pub use market_query::MockMarketQuery;
pub use market_query::MarketQuery;
#[cfg(test)]
pub use market_repository::MockMarketRepository;
pub use market_repository::{MarketRepository, MarketRepositoryError};
#[cfg(test)]
pub use payment_command::MockPaymentCommand;
pub use payment_command::PaymentCommand;
#[cfg(test)]
pub use payment_query::MockPaymentQuery;
pub use payment_query::PaymentQuery;
#[cfg(test)]
pub use receipt_reporter::MockReceiptReporter;
pub use receipt_reporter::{ReceiptReporter, ReceiptReporterError};
#[cfg(test)]
pub use transaction_repository::MockTransactionRepository;
pub use transaction_repository::{TransactionRepository, TransactionRepositoryError};
#[cfg(test)]
pub use user_directory::MockUserDirectory;
pub use user_directory::{UserDirectory, UserDirectoryError};
