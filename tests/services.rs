use std::sync::Arc;

use serde_json::json;
use tempfile::tempdir;
use url::Url;
use wiremock::matchers::{body_json, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use wallet_client::credentials::{FileSecureStore, MemorySecureStore, SecureStore};
use wallet_client::http::{ApiClient, ApiErrorKind};
use wallet_client::models::{LoginRequest, PayoutProvider, PayoutRequest, TransactionStatus, TransactionType, TransactionsParams};
use wallet_client::presentation::{UNAUTHORIZED_MESSAGE, error_message};
use wallet_client::services::retry::{default_policy, with_retry};
use wallet_client::services::{AuthService, PayoutsService, TransactionsService, WalletService, next_page};

fn client(server: &MockServer, store: Arc<dyn SecureStore>) -> Arc<ApiClient> {
    Arc::new(ApiClient::new(Url::parse(&server.uri()).unwrap(), store).unwrap())
}

fn login_body() -> serde_json::Value {
    json!({
        "auth": {
            "access_token": "access-123",
            "access_token_expire": "2026-10-20T10:00:00Z",
            "refresh_token": "refresh-456",
            "refresh_token_expire": "2026-10-27T10:00:00Z"
        },
        "tfa": { "enabled": false, "type": null }
    })
}

fn no_bearer(request: &Request) -> bool {
    !request.headers.contains_key("authorization")
}

#[tokio::test]
async fn test_session_lifecycle_against_file_store() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({ "email": "jane@example.com", "password": "hunter22" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(login_body()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/balances"))
        .and(header("authorization", "Bearer access-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "id": 7,
                "user_id": "u-1",
                "currency_id": 1,
                "available_balance": "120.50",
                "current_balance": "130.50",
                "reserved_balance": "10.00",
                "reference_number": "REF-7"
            }],
            "message": [],
            "status": 200,
            "type": "success"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let credentials = dir.path().join("credentials.json");
    let api = client(&server, Arc::new(FileSecureStore::new(&credentials)));
    let auth = AuthService::new(api.clone());

    assert!(!auth.is_authenticated().await);
    auth.login(&LoginRequest {
        email: "jane@example.com".into(),
        password: "hunter22".into(),
    })
    .await
    .unwrap();
    assert!(auth.is_authenticated().await);

    // A fresh client over the same file sees the persisted session.
    let reopened = client(&server, Arc::new(FileSecureStore::new(&credentials)));
    let balances = WalletService::new(reopened).get_balances().await.unwrap();
    assert_eq!(balances.data.len(), 1);
    assert_eq!(balances.data[0].available_balance, "120.50");

    auth.logout().await;
    assert!(!auth.is_authenticated().await);
    assert_eq!(api.get_refresh_token().await, None);
}

#[tokio::test]
async fn test_failed_login_stores_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "Invalid credentials" })))
        .mount(&server)
        .await;

    let api = client(&server, Arc::new(MemorySecureStore::new()));
    let auth = AuthService::new(api.clone());

    let err = auth
        .login(&LoginRequest {
            email: "jane@example.com".into(),
            password: "wrong".into(),
        })
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ApiErrorKind::Unauthorized);
    assert_eq!(err.message(), "Invalid credentials");
    assert!(err.is_auth_error());
    assert_eq!(error_message(&err), UNAUTHORIZED_MESSAGE);
    assert!(!auth.is_authenticated().await);
}

#[tokio::test]
async fn test_transactions_filters_and_paging() {
    let server = MockServer::start().await;
    let page = |current: u32, has_more: bool| {
        json!({
            "data": {
                "current_page": current,
                "per_page": 1,
                "total": 2,
                "last_page": 2,
                "has_more": has_more,
                "items": [{
                    "id": current,
                    "wallet_id": 7,
                    "type": "withdrawal",
                    "status": "completed",
                    "reason": "Payout",
                    "amount": 25.0,
                    "currency_id": 1,
                    "created_at": "2026-10-01T09:30:00Z"
                }]
            },
            "message": "",
            "status": 200,
            "type": "success"
        })
    };
    Mock::given(method("GET"))
        .and(path("/transactions"))
        .and(query_param("type", "withdrawal"))
        .and(query_param("status", "completed"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(2, false)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/transactions"))
        .and(query_param("type", "withdrawal"))
        .and(query_param("status", "completed"))
        .and(query_param("per_page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(1, true)))
        .mount(&server)
        .await;

    let service = TransactionsService::new(client(&server, Arc::new(MemorySecureStore::new())));
    let params = TransactionsParams {
        per_page: Some(1),
        kind: Some(TransactionType::Withdrawal),
        status: Some(TransactionStatus::Completed),
        ..Default::default()
    };

    let first = service.get_transactions(Some(&params)).await.unwrap();
    assert_eq!(first.data.current_page, 1);
    assert_eq!(first.data.items[0].kind, TransactionType::Withdrawal);

    let params = next_page(&params, &first).unwrap();
    assert_eq!(params.page, Some(2));
    let second = service.get_transactions(Some(&params)).await.unwrap();
    assert_eq!(second.data.current_page, 2);
    assert!(next_page(&params, &second).is_none());

    let requests = server.received_requests().await.unwrap();
    assert!(requests.iter().all(|r| r.url.query_pairs().all(|(key, _)| key != "search")));
}

#[tokio::test]
async fn test_payout_validation_error_keeps_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/payouts"))
        .and(body_json(json!({
            "wallet_id": 7,
            "provider": "bank",
            "amount": 5000.0,
            "currency_id": 1
        })))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({ "error": "Insufficient funds" })))
        .mount(&server)
        .await;

    let service = PayoutsService::new(client(&server, Arc::new(MemorySecureStore::new())));
    let err = service
        .create_payout(&PayoutRequest {
            wallet_id: 7,
            provider: PayoutProvider::Bank,
            amount: 5000.0,
            currency_id: 1,
            bank_id: None,
        })
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ApiErrorKind::ValidationError);
    assert_eq!(err.status(), 422);
    assert_eq!(error_message(&err), "Insufficient funds");
}

#[tokio::test]
async fn test_balances_retry_through_server_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/balances"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/balances"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [],
            "status": 200,
            "type": "success"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let service = WalletService::new(client(&server, Arc::new(MemorySecureStore::new())));
    let balances = with_retry(&default_policy(2), || service.get_balances()).await.unwrap();
    assert!(balances.data.is_empty());
}

#[tokio::test]
async fn test_anonymous_requests_carry_no_bearer() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/balances"))
        .and(header_exists("content-type"))
        .and(no_bearer)
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [],
            "status": 200,
            "type": "success"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let service = WalletService::new(client(&server, Arc::new(MemorySecureStore::new())));
    service.get_balances().await.unwrap();
}
