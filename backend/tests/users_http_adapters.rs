//! Users service adapters exercised against a loopback Actix server.
//!
//! The fake users service answers `GET /users/usernames` and
//! `POST /users/pagamentos` according to a per-test [`Mode`].

use std::sync::Arc;
use std::time::Duration;

use actix_web::dev::ServerHandle;
use actix_web::http::StatusCode;
use actix_web::{App, HttpResponse, HttpServer, test, web};
use ada_backend::domain::ports::{
    ReceiptReporter, ReceiptReporterError, UserDirectory, UserDirectoryError,
};
use ada_backend::domain::{
    DirectoryUser, Receipt, SettlementConfig, SettlementPorts, SettlementService, TransactionDraft,
};
use ada_backend::inbound::http::health::HealthState;
use ada_backend::inbound::http::state::PaymentState;
use ada_backend::outbound::persistence::InMemoryTransactionRepository;
use ada_backend::outbound::users::{HttpReceiptReporter, HttpUserDirectory};
use ada_backend::server::payment_app;
use chrono::{TimeZone, Utc};
use mockable::DefaultClock;
use reqwest::Url;
use rstest::{fixture, rstest};
use rust_decimal_macros::dec;
use serde::Deserialize;
use serde_json::{Value, json};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Healthy,
    Reversed,
    Unavailable,
    WrongEcho,
    RejectReports,
}

#[derive(Deserialize)]
struct UsersQuery {
    users: String,
}

async fn usernames(mode: web::Data<Mode>, query: web::Query<UsersQuery>) -> HttpResponse {
    if **mode == Mode::Unavailable {
        return HttpResponse::ServiceUnavailable().body("maintenance");
    }
    let balances = [("bob", 100.0), ("alice", 5.5)];
    let mut body: Vec<Value> = query
        .users
        .split(',')
        .filter_map(|name| balances.iter().find(|(known, _)| *known == name))
        .map(|(name, balance)| json!({"username": name, "balance": balance}))
        .collect();
    if **mode == Mode::Reversed {
        body.reverse();
    }
    HttpResponse::Ok().json(body)
}

async fn pagamentos(mode: web::Data<Mode>, body: web::Json<Value>) -> HttpResponse {
    match **mode {
        Mode::RejectReports => HttpResponse::Conflict().body("duplicate receipt"),
        Mode::WrongEcho => {
            let mut echo = body.into_inner();
            echo["id"] = json!(Uuid::nil());
            HttpResponse::Created().json(echo)
        }
        Mode::Healthy | Mode::Reversed | Mode::Unavailable => {
            HttpResponse::Created().json(body.into_inner())
        }
    }
}

struct FakeUsersService {
    base_url: Url,
    handle: ServerHandle,
}

impl FakeUsersService {
    fn start(mode: Mode) -> Self {
        let mode = web::Data::new(mode);
        let server = HttpServer::new(move || {
            App::new()
                .app_data(mode.clone())
                .route("/users/usernames", web::get().to(usernames))
                .route("/users/pagamentos", web::post().to(pagamentos))
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("bind loopback listener");
        let addr = *server.addrs().first().expect("bound address");
        let server = server.run();
        let handle = server.handle();
        actix_web::rt::spawn(server);
        Self {
            base_url: Url::parse(&format!("http://{addr}/")).expect("loopback URL"),
            handle,
        }
    }

    fn client() -> reqwest::Client {
        reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .expect("reqwest client")
    }

    fn directory(&self) -> HttpUserDirectory {
        HttpUserDirectory::with_client(Self::client(), self.base_url.clone())
    }

    fn reporter(&self) -> HttpReceiptReporter {
        HttpReceiptReporter::with_client(Self::client(), self.base_url.clone())
            .expect("reporter endpoint")
    }

    async fn stop(self) {
        self.handle.stop(true).await;
    }
}

#[fixture]
fn receipt() -> Receipt {
    let created_at = Utc
        .with_ymd_and_hms(2026, 3, 1, 12, 0, 0)
        .single()
        .expect("valid time");
    Receipt::from(
        &TransactionDraft::new("bob", "alice", dec!(40), created_at)
            .into_transaction(Uuid::from_u128(11)),
    )
}

#[rstest]
#[case(Mode::Healthy)]
#[case(Mode::Reversed)]
#[actix_web::test]
async fn directory_resolves_users_in_request_order(#[case] mode: Mode) {
    let service = FakeUsersService::start(mode);

    let users = service
        .directory()
        .resolve_users(&["alice".to_owned(), "bob".to_owned()])
        .await
        .expect("users resolve");

    assert_eq!(
        users,
        vec![
            DirectoryUser::new("alice", dec!(5.5)),
            DirectoryUser::new("bob", dec!(100)),
        ]
    );
    service.stop().await;
}

#[rstest]
#[actix_web::test]
async fn directory_omits_unknown_users() {
    let service = FakeUsersService::start(Mode::Reversed);

    let users = service
        .directory()
        .resolve_users(&["bob".to_owned(), "carol".to_owned()])
        .await
        .expect("users resolve");

    assert_eq!(users, vec![DirectoryUser::new("bob", dec!(100))]);
    service.stop().await;
}

#[rstest]
#[actix_web::test]
async fn directory_surfaces_upstream_status() {
    let service = FakeUsersService::start(Mode::Unavailable);

    let error = service
        .directory()
        .resolve_users(&["bob".to_owned(), "alice".to_owned()])
        .await
        .expect_err("directory is down");

    assert!(
        matches!(error, UserDirectoryError::Status { status: 503, .. }),
        "unexpected error: {error}"
    );
    service.stop().await;
}

#[rstest]
#[actix_web::test]
async fn reporter_accepts_matching_echo(receipt: Receipt) {
    let service = FakeUsersService::start(Mode::Healthy);

    let echo = service.reporter().report(&receipt).await.expect("report accepted");

    assert_eq!(echo, receipt);
    service.stop().await;
}

#[rstest]
#[case(Mode::WrongEcho)]
#[case(Mode::RejectReports)]
#[actix_web::test]
async fn reporter_rejects_bad_acknowledgements(#[case] mode: Mode, receipt: Receipt) {
    let service = FakeUsersService::start(mode);

    let error = service
        .reporter()
        .report(&receipt)
        .await
        .expect_err("report rejected");

    assert!(
        matches!(error, ReceiptReporterError::Rejected { .. }),
        "unexpected error: {error}"
    );
    service.stop().await;
}

async fn post_payment(service: &FakeUsersService) -> (StatusCode, Option<String>, Value) {
    let settlement = Arc::new(SettlementService::new(
        SettlementPorts::new(
            Arc::new(service.directory()),
            Arc::new(InMemoryTransactionRepository::new()),
            Arc::new(service.reporter()),
        ),
        Arc::new(DefaultClock),
        SettlementConfig::default(),
    ));
    let state = web::Data::new(PaymentState::new(settlement.clone(), settlement));
    let app = test::init_service(payment_app(web::Data::new(HealthState::new()), state)).await;

    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/pagamentos")
            .set_json(json!({"usernames": ["bob", "alice"], "valor": 40}))
            .to_request(),
    )
    .await;
    let status = response.status();
    let report = response
        .headers()
        .get("Receipt-Report")
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let body: Value = test::read_body_json(response).await;
    (status, report, body)
}

#[rstest]
#[case(Mode::Healthy)]
#[case(Mode::Reversed)]
#[actix_web::test]
async fn payment_endpoint_settles_against_the_users_service(#[case] mode: Mode) {
    let service = FakeUsersService::start(mode);

    let (status, report, body) = post_payment(&service).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(report.as_deref(), Some("acknowledged"));
    assert_eq!(body["pagador"], "bob");
    assert_eq!(body["recebedor"], "alice");
    assert_eq!(body["valor"], 40.0);
    service.stop().await;
}

#[rstest]
#[actix_web::test]
async fn payment_endpoint_keeps_receipt_when_report_is_rejected() {
    let service = FakeUsersService::start(Mode::RejectReports);

    let (status, report, body) = post_payment(&service).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(report.as_deref(), Some("failed"));
    assert_eq!(body["pagador"], "bob");
    service.stop().await;
}

#[rstest]
#[actix_web::test]
async fn payment_endpoint_maps_directory_outage_to_503() {
    let service = FakeUsersService::start(Mode::Unavailable);

    let (status, _, body) = post_payment(&service).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], "service_unavailable");
    service.stop().await;
}
