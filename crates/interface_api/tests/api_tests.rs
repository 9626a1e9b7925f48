//! HTTP tests for the accounts routes

use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};

use core_kernel::PortError;
use domain_account::{AccountPort, AccountService, InMemoryAccountAdapter, MockAccountPort, PortOperation};
use interface_api::create_router;
use interface_api::dto::account::{AccountResponse, AddressResponse};
use interface_api::error::ErrorResponse;
use test_utils::duke_account;

fn server_with(port: Arc<dyn AccountPort>) -> TestServer {
    let service = Arc::new(AccountService::new(port));
    TestServer::new(create_router(service)).unwrap()
}

fn server() -> TestServer {
    server_with(Arc::new(InMemoryAccountAdapter::new()))
}

fn minimal_request() -> Value {
    json!({
        "firstName": "Minimal",
        "lastName": "CreateAccount",
        "emailAddress": "dukefirst.last@enjoy.com",
        "addresses": [{
            "address1": "100",
            "city": "Food Forest City",
            "state": "FL",
            "postalCode": "33000",
            "country": "US"
        }]
    })
}

async fn create_minimal(server: &TestServer) -> AccountResponse {
    let response = server.post("/accounts").json(&minimal_request()).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    response.json::<AccountResponse>()
}

#[tokio::test]
async fn test_create_account() {
    let server = server();

    let created = create_minimal(&server).await;

    assert!(created.id.is_some());
    assert!(created.account_ref_id.is_some());
    assert!(created.create_date_time.is_some());
    assert_eq!(created.addresses.len(), 1);
    assert!(created.addresses[0].id.is_some());
}

#[tokio::test]
async fn test_create_keeps_supplied_account_ref_id() {
    let server = server();
    let mut request = minimal_request();
    request["accountRefId"] = json!("REF-000001");

    let response = server.post("/accounts").json(&request).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<AccountResponse>().account_ref_id.as_deref(), Some("REF-000001"));
}

#[tokio::test]
async fn test_create_without_addresses_is_rejected() {
    let server = server();
    let mut request = minimal_request();
    request["addresses"] = json!([]);

    let response = server.post("/accounts").json(&request).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<ErrorResponse>().error, "validation_error");
}

#[tokio::test]
async fn test_create_with_invalid_email_is_rejected() {
    let server = server();
    let mut request = minimal_request();
    request["emailAddress"] = json!("email@example");

    let response = server.post("/accounts").json(&request).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body = response.json::<ErrorResponse>();
    assert_eq!(body.error, "validation_error");
    assert!(body.message.contains("e-mail"));
}

#[tokio::test]
async fn test_create_with_duplicate_email_conflicts() {
    let server = server();
    create_minimal(&server).await;

    let response = server.post("/accounts").json(&minimal_request()).await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    assert_eq!(response.json::<ErrorResponse>().error, "conflict");
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let server = server();

    let response = server.post("/accounts").text("{ not json").await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<ErrorResponse>().error, "bad_request");
}

#[tokio::test]
async fn test_update_changes_address_in_place() {
    let server = server();
    let created = create_minimal(&server).await;
    let id = created.id.unwrap();
    let address_id = created.addresses[0].id.unwrap();

    let mut request = minimal_request();
    request["firstName"] = json!("Updated");
    request["addresses"][0]["id"] = json!(address_id);
    request["addresses"][0]["address1"] = json!("1001 New Lane");

    let response = server.put(&format!("/accounts/{id}")).json(&request).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let updated = response.json::<AccountResponse>();
    assert_eq!(updated.first_name, "Updated");
    assert_eq!(updated.account_ref_id, created.account_ref_id);
    assert_eq!(updated.addresses.len(), 1);
    assert_eq!(updated.addresses[0].id, Some(address_id));
    assert_eq!(updated.addresses[0].address1, "1001 New Lane");
}

#[tokio::test]
async fn test_update_unknown_account_is_not_found() {
    let server = server();

    let response = server.put("/accounts/999").json(&minimal_request()).await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(response.json::<ErrorResponse>().error, "not_found");
}

#[tokio::test]
async fn test_delete_then_get_is_not_found() {
    let server = server();
    let id = create_minimal(&server).await.id.unwrap();

    let response = server.delete(&format!("/accounts/{id}")).await;
    assert_eq!(response.status_code(), StatusCode::ACCEPTED);

    let response = server.get(&format!("/accounts/{id}")).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_unknown_account_is_accepted() {
    let server = server();

    let response = server.delete("/accounts/12345").await;

    assert_eq!(response.status_code(), StatusCode::ACCEPTED);
}

#[tokio::test]
async fn test_get_by_account_ref_id() {
    let (port, _) = MockAccountPort::with_accounts(vec![duke_account()]).await;
    let server = server_with(Arc::new(port));

    let response = server.get("/accounts/ref/REF-DUKE-0001").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<AccountResponse>().email_address, "dukefirstlast@duke.com");

    let response = server.get("/accounts/ref/REF-MISSING").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_accounts_and_addresses() {
    let (port, stored) = MockAccountPort::with_accounts(vec![duke_account()]).await;
    let server = server_with(Arc::new(port));
    let id = stored[0].id.unwrap();

    let accounts = server.get("/accounts").await.json::<Vec<AccountResponse>>();
    assert_eq!(accounts.len(), 1);

    let response = server.get(&format!("/accounts/{}/addresses", id.value())).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Vec<AddressResponse>>().len(), 2);

    let response = server.get("/accounts/999/addresses").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_storage_failure_is_internal_error() {
    let port = MockAccountPort::new();
    port.fail_on(PortOperation::FindAll, || PortError::connection("connection refused")).await;
    let server = server_with(Arc::new(port));

    let response = server.get("/accounts").await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.json::<ErrorResponse>();
    assert_eq!(body.error, "internal_error");
    assert!(!body.message.contains("refused"));
}

#[tokio::test]
async fn test_health_endpoints() {
    let server = server();

    let response = server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["status"], "healthy");

    let response = server.get("/health/ready").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["storage"], "in-memory-account-adapter");
}

#[tokio::test]
async fn test_readiness_fails_when_storage_is_down() {
    let port = MockAccountPort::new();
    port.set_unhealthy("connection refused").await;
    let server = server_with(Arc::new(port));

    let response = server.get("/health/ready").await;

    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let server = server();

    let response = server.get("/health").await;

    assert!(response.headers().contains_key("x-request-id"));
}
