//! Shared HTTP adapter state.
//!
//! HTTP handlers accept these states via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{MarketCommand, MarketQuery, PaymentCommand, PaymentQuery};

/// Dependency bundle for the payment handlers.
#[derive(Clone)]
pub struct PaymentState {
    pub payments: Arc<dyn PaymentCommand>,
    pub receipts: Arc<dyn PaymentQuery>,
}

impl PaymentState {
    /// Bundle the payment ports.
    pub fn new(payments: Arc<dyn PaymentCommand>, receipts: Arc<dyn PaymentQuery>) -> Self {
        Self { payments, receipts }
    }
}

/// Dependency bundle for the market handlers.
#[derive(Clone)]
pub struct MarketState {
    pub markets: Arc<dyn MarketCommand>,
    pub markets_query: Arc<dyn MarketQuery>,
}

impl MarketState {
    /// Bundle the market ports.
    pub fn new(markets: Arc<dyn MarketCommand>, markets_query: Arc<dyn MarketQuery>) -> Self {
        Self {
            markets,
            markets_query,
        }
    }
}
