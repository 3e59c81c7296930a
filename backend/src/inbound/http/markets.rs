//! Market API handlers.
//!
//! ```text
//! POST /mercados {"nome":"Feira Central","descricao":"Sábados"}
//! GET /mercados/nomes?nome=Feira
//! GET /mercados/moedas?moeda=USD
//! GET /mercados/{id}
//! ```
//!
//! The literal `/nomes` and `/moedas` routes must be registered before
//! `/{id}`; see [`configure`].

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{CurrencyQuote, Error, Market, MarketDraft};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::MarketState;
use crate::inbound::http::validation::{FieldName, parse_uuid, required_text};

/// Market body for create and update.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct MercadoBody {
    /// Market name.
    #[schema(example = "Feira Central")]
    pub nome: Option<String>,
    /// Optional description.
    pub descricao: Option<String>,
}

impl TryFrom<MercadoBody> for MarketDraft {
    type Error = Error;

    fn try_from(body: MercadoBody) -> Result<Self, Self::Error> {
        let nome = required_text(body.nome, FieldName::new("nome"))?;
        Ok(MarketDraft::new(nome, body.descricao)?)
    }
}

/// Stored market.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct MercadoResponse {
    pub id: Uuid,
    pub nome: String,
    pub descricao: Option<String>,
}

impl From<Market> for MercadoResponse {
    fn from(market: Market) -> Self {
        Self {
            id: market.id(),
            nome: market.name().to_owned(),
            descricao: market.description().map(str::to_owned),
        }
    }
}

/// Currency quote, forwarded as provided.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct MoedaResponse {
    pub code: String,
    pub codein: String,
    pub name: String,
    pub high: String,
    pub low: String,
    pub bid: String,
    pub ask: String,
    pub create_date: String,
}

impl From<CurrencyQuote> for MoedaResponse {
    fn from(quote: CurrencyQuote) -> Self {
        let CurrencyQuote {
            code,
            codein,
            name,
            high,
            low,
            bid,
            ask,
            create_date,
        } = quote;
        Self {
            code,
            codein,
            name,
            high,
            low,
            bid,
            ask,
            create_date,
        }
    }
}

/// Query string for `GET /mercados/nomes`.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct NomeQuery {
    /// Name to search for.
    pub nome: Option<String>,
}

/// Query string for `GET /mercados/moedas`.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct MoedaQuery {
    /// Currency code, e.g. `USD`.
    pub moeda: Option<String>,
}

fn list_response(markets: Vec<Market>) -> HttpResponse {
    if markets.is_empty() {
        return HttpResponse::NoContent().finish();
    }
    let body: Vec<MercadoResponse> = markets.into_iter().map(MercadoResponse::from).collect();
    HttpResponse::Ok().json(body)
}

/// Register market routes with literal segments ahead of `/{id}`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_market)
        .service(list_markets)
        .service(find_markets_by_name)
        .service(get_quote)
        .service(get_market)
        .service(update_market)
        .service(delete_market);
}

/// Create a market.
#[utoipa::path(
    post,
    path = "/mercados",
    request_body = MercadoBody,
    responses(
        (status = 201, description = "Market created", body = MercadoResponse),
        (status = 400, description = "Invalid market", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["mercados"],
    operation_id = "createMarket"
)]
#[post("/mercados")]
pub async fn create_market(
    state: web::Data<MarketState>,
    payload: web::Json<MercadoBody>,
) -> ApiResult<HttpResponse> {
    let draft = MarketDraft::try_from(payload.into_inner())?;
    let market = state.markets.create(draft).await?;
    Ok(HttpResponse::Created().json(MercadoResponse::from(market)))
}

/// Replace a market's name and description.
#[utoipa::path(
    put,
    path = "/mercados/{id}",
    params(("id" = String, Path, description = "Market identifier")),
    request_body = MercadoBody,
    responses(
        (status = 200, description = "Market updated", body = MercadoResponse),
        (status = 400, description = "Invalid market", body = ErrorSchema),
        (status = 404, description = "Unknown market", body = ErrorSchema)
    ),
    tags = ["mercados"],
    operation_id = "updateMarket"
)]
#[put("/mercados/{id}")]
pub async fn update_market(
    state: web::Data<MarketState>,
    path: web::Path<String>,
    payload: web::Json<MercadoBody>,
) -> ApiResult<web::Json<MercadoResponse>> {
    let id = parse_uuid(path.into_inner(), FieldName::new("id"))?;
    let draft = MarketDraft::try_from(payload.into_inner())?;
    let market = state.markets.update(id, draft).await?;
    Ok(web::Json(MercadoResponse::from(market)))
}

/// Fetch one market.
#[utoipa::path(
    get,
    path = "/mercados/{id}",
    params(("id" = String, Path, description = "Market identifier")),
    responses(
        (status = 200, description = "Market", body = MercadoResponse),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 404, description = "Unknown market", body = ErrorSchema)
    ),
    tags = ["mercados"],
    operation_id = "getMarket"
)]
#[get("/mercados/{id}")]
pub async fn get_market(
    state: web::Data<MarketState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<MercadoResponse>> {
    let id = parse_uuid(path.into_inner(), FieldName::new("id"))?;
    let market = state.markets_query.find(id).await?;
    Ok(web::Json(MercadoResponse::from(market)))
}

/// Search markets by name.
#[utoipa::path(
    get,
    path = "/mercados/nomes",
    params(NomeQuery),
    responses(
        (status = 200, description = "Matching markets", body = [MercadoResponse]),
        (status = 204, description = "No match"),
        (status = 400, description = "Blank name", body = ErrorSchema)
    ),
    tags = ["mercados"],
    operation_id = "findMarketsByName"
)]
#[get("/mercados/nomes")]
pub async fn find_markets_by_name(
    state: web::Data<MarketState>,
    query: web::Query<NomeQuery>,
) -> ApiResult<HttpResponse> {
    let nome = required_text(query.into_inner().nome, FieldName::new("nome"))?;
    let markets = state.markets_query.find_by_name(&nome).await?;
    Ok(list_response(markets))
}

/// List every market.
#[utoipa::path(
    get,
    path = "/mercados",
    responses(
        (status = 200, description = "Markets", body = [MercadoResponse]),
        (status = 204, description = "No markets stored")
    ),
    tags = ["mercados"],
    operation_id = "listMarkets"
)]
#[get("/mercados")]
pub async fn list_markets(state: web::Data<MarketState>) -> ApiResult<HttpResponse> {
    let markets = state.markets_query.list().await?;
    Ok(list_response(markets))
}

/// Delete a market.
#[utoipa::path(
    delete,
    path = "/mercados/{id}",
    params(("id" = String, Path, description = "Market identifier")),
    responses(
        (status = 200, description = "Market deleted"),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 404, description = "Unknown market", body = ErrorSchema)
    ),
    tags = ["mercados"],
    operation_id = "deleteMarket"
)]
#[delete("/mercados/{id}")]
pub async fn delete_market(
    state: web::Data<MarketState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_uuid(path.into_inner(), FieldName::new("id"))?;
    state.markets.remove(id).await?;
    Ok(HttpResponse::Ok().finish())
}

/// Latest quote for a currency against BRL.
#[utoipa::path(
    get,
    path = "/mercados/moedas",
    params(MoedaQuery),
    responses(
        (status = 200, description = "Quote", body = MoedaResponse),
        (status = 400, description = "Blank currency code", body = ErrorSchema),
        (status = 404, description = "No quote available", body = ErrorSchema)
    ),
    tags = ["mercados"],
    operation_id = "getCurrencyQuote"
)]
#[get("/mercados/moedas")]
pub async fn get_quote(
    state: web::Data<MarketState>,
    query: web::Query<MoedaQuery>,
) -> ApiResult<web::Json<MoedaResponse>> {
    let moeda = required_text(query.into_inner().moeda, FieldName::new("moeda"))?;
    let quote = state.markets_query.quote(&moeda).await?;
    Ok(web::Json(MoedaResponse::from(quote)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::ports::{MockMarketCommand, MockMarketQuery};
    use crate::inbound::http::json_config;
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use serde_json::{Value, json};

    const ID: Uuid = Uuid::from_u128(9);

    fn market(name: &str) -> Market {
        MarketDraft::new(name, Some("sábados".to_owned()))
            .expect("valid draft")
            .into_market(ID)
    }

    async fn call(
        command: MockMarketCommand,
        query: MockMarketQuery,
        request: actix_test::TestRequest,
    ) -> actix_web::dev::ServiceResponse {
        let state = MarketState::new(Arc::new(command), Arc::new(query));
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .app_data(json_config())
                .configure(configure),
        )
        .await;
        actix_test::call_service(&app, request.to_request()).await
    }

    #[rstest]
    #[actix_web::test]
    async fn create_returns_created_market() {
        let mut command = MockMarketCommand::new();
        command
            .expect_create()
            .withf(|draft| draft.name() == "Feira Central")
            .times(1)
            .return_once(|draft| Ok(draft.into_market(ID)));

        let response = call(
            command,
            MockMarketQuery::new(),
            actix_test::TestRequest::post()
                .uri("/mercados")
                .set_json(json!({"nome": "  Feira Central ", "descricao": "sábados"})),
        )
        .await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let body: MercadoResponse = actix_test::read_body_json(response).await;
        assert_eq!(body.id, ID);
        assert_eq!(body.nome, "Feira Central");
        assert_eq!(body.descricao.as_deref(), Some("sábados"));
    }

    #[rstest]
    #[case(json!({"descricao": "x"}), "missing_field")]
    #[case(json!({"nome": "   "}), "blank_field")]
    #[actix_web::test]
    async fn create_rejects_missing_or_blank_names(#[case] body: Value, #[case] code: &str) {
        let mut command = MockMarketCommand::new();
        command.expect_create().never();

        let response = call(
            command,
            MockMarketQuery::new(),
            actix_test::TestRequest::post().uri("/mercados").set_json(body),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["details"]["field"], "nome");
        assert_eq!(body["details"]["code"], code);
    }

    #[rstest]
    #[actix_web::test]
    async fn update_of_missing_market_is_not_found() {
        let mut command = MockMarketCommand::new();
        command
            .expect_update()
            .times(1)
            .return_once(|id, _| Err(Error::not_found(format!("market {id} not found"))));

        let response = call(
            command,
            MockMarketQuery::new(),
            actix_test::TestRequest::put()
                .uri(&format!("/mercados/{ID}"))
                .set_json(json!({"nome": "Feira"})),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[rstest]
    #[actix_web::test]
    async fn get_returns_the_market() {
        let mut query = MockMarketQuery::new();
        query
            .expect_find()
            .withf(|id| *id == ID)
            .times(1)
            .return_once(|_| Ok(market("Feira")));

        let response = call(
            MockMarketCommand::new(),
            query,
            actix_test::TestRequest::get().uri(&format!("/mercados/{ID}")),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body, json!({"id": ID, "nome": "Feira", "descricao": "sábados"}));
    }

    #[rstest]
    #[actix_web::test]
    async fn name_search_route_wins_over_id_route() {
        let mut query = MockMarketQuery::new();
        query.expect_find().never();
        query
            .expect_find_by_name()
            .withf(|name| name == "Feira")
            .times(1)
            .return_once(|_| Ok(vec![market("Feira")]));

        let response = call(
            MockMarketCommand::new(),
            query,
            actix_test::TestRequest::get().uri("/mercados/nomes?nome=Feira"),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: Vec<MercadoResponse> = actix_test::read_body_json(response).await;
        assert_eq!(body.len(), 1);
    }

    #[rstest]
    #[case("/mercados/nomes?nome=Nada")]
    #[case("/mercados")]
    #[actix_web::test]
    async fn empty_listings_are_no_content(#[case] uri: &str) {
        let mut query = MockMarketQuery::new();
        query.expect_find_by_name().returning(|_| Ok(Vec::new()));
        query.expect_list().returning(|| Ok(Vec::new()));

        let response = call(
            MockMarketCommand::new(),
            query,
            actix_test::TestRequest::get().uri(uri),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[rstest]
    #[case("/mercados/nomes?nome=%20")]
    #[case("/mercados/nomes")]
    #[case("/mercados/moedas?moeda=")]
    #[actix_web::test]
    async fn blank_search_parameters_are_bad_requests(#[case] uri: &str) {
        let mut query = MockMarketQuery::new();
        query.expect_find_by_name().never();
        query.expect_quote().never();

        let response = call(
            MockMarketCommand::new(),
            query,
            actix_test::TestRequest::get().uri(uri),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[rstest]
    #[case(Ok(()), StatusCode::OK)]
    #[case(Err(Error::not_found("market not found")), StatusCode::NOT_FOUND)]
    #[actix_web::test]
    async fn delete_reports_outcome(#[case] outcome: Result<(), Error>, #[case] status: StatusCode) {
        let mut command = MockMarketCommand::new();
        command.expect_remove().times(1).return_once(move |_| outcome);

        let response = call(
            command,
            MockMarketQuery::new(),
            actix_test::TestRequest::delete().uri(&format!("/mercados/{ID}")),
        )
        .await;

        assert_eq!(response.status(), status);
    }

    #[rstest]
    #[actix_web::test]
    async fn quote_is_forwarded() {
        let mut query = MockMarketQuery::new();
        query
            .expect_quote()
            .withf(|code| code == "usd")
            .times(1)
            .return_once(|_| {
                Ok(CurrencyQuote {
                    code: "USD".to_owned(),
                    codein: "BRL".to_owned(),
                    bid: "5.1".to_owned(),
                    ..CurrencyQuote::default()
                })
            });

        let response = call(
            MockMarketCommand::new(),
            query,
            actix_test::TestRequest::get().uri("/mercados/moedas?moeda=usd"),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: MoedaResponse = actix_test::read_body_json(response).await;
        assert_eq!(body.code, "USD");
        assert_eq!(body.bid, "5.1");
    }

    #[rstest]
    #[actix_web::test]
    async fn unknown_quote_is_not_found() {
        let mut query = MockMarketQuery::new();
        query
            .expect_quote()
            .times(1)
            .return_once(|_| Err(Error::not_found("no quote for XYZ")));

        let response = call(
            MockMarketCommand::new(),
            query,
            actix_test::TestRequest::get().uri("/mercados/moedas?moeda=XYZ"),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
