//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] documents the payment service and [`MarketApiDoc`] the market
//! service. Both register the shared error envelope through the external
//! schemas in [`crate::inbound::http::schemas`], keeping domain types free of
//! utoipa derives.
//!
//! The documents back Swagger UI in debug builds and are exported via
//! `cargo run --bin openapi-dump [pagamento|mercado]`.

use crate::inbound::http::markets::{MercadoBody, MercadoResponse, MoedaResponse};
use crate::inbound::http::payments::{PaymentRequestBody, ReceiptResponse};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::OpenApi;

/// OpenAPI document for the payment service.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Pagamento API",
        description = "Settles transfers between two users and exposes the resulting receipts."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::payments::create_payment,
        crate::inbound::http::payments::get_payment,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        PaymentRequestBody,
        ReceiptResponse,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "pagamentos", description = "Payment settlement"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

/// OpenAPI document for the market service.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Mercado API",
        description = "Market registry and BRL currency quotes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::markets::create_market,
        crate::inbound::http::markets::update_market,
        crate::inbound::http::markets::get_market,
        crate::inbound::http::markets::find_markets_by_name,
        crate::inbound::http::markets::list_markets,
        crate::inbound::http::markets::delete_market,
        crate::inbound::http::markets::get_quote,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        MercadoBody,
        MercadoResponse,
        MoedaResponse,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "mercados", description = "Markets and currency quotes"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct MarketApiDoc;
