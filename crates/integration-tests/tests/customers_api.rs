//! Integration tests for the customer API.
//!
//! Requires a running back office with seeded users. See the crate docs.

use armarinho_core::{DocumentKind, format_document};
use armarinho_integration_tests::{
    TestUser, base_url, client, create_customer, delete_customer, logged_in, unique_document,
};
use reqwest::StatusCode;
use serde_json::{Value, json};

#[tokio::test]
#[ignore = "Requires running back office and seeded database"]
async fn test_anonymous_requests_are_unauthorized() {
    let resp = client()
        .post(format!("{}/api/customers", base_url()))
        .json(&json!({"name": "X", "kind": "individual", "document": "12345678901"}))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running back office and seeded database"]
async fn test_create_normalizes_document() {
    let client = logged_in(TestUser::Operator).await;
    let digits = unique_document(DocumentKind::Individual);
    let punctuated = format_document(&digits, DocumentKind::Individual);

    let customer = create_customer(
        &client,
        &json!({
            "name": "  Maria Teste  ",
            "kind": "individual",
            "document": punctuated,
            "phone": "84999999999",
            "email": "",
        }),
    )
    .await;

    assert_eq!(customer["name"], "Maria Teste");
    assert_eq!(customer["document"], digits.as_str());
    assert_eq!(customer["kind"], "individual");
    assert_eq!(customer["email"], Value::Null);

    delete_customer(&client, &customer["id"]).await;
}

#[tokio::test]
#[ignore = "Requires running back office and seeded database"]
async fn test_wrong_length_document_is_rejected() {
    let client = logged_in(TestUser::Operator).await;

    let resp = client
        .post(format!("{}/api/customers", base_url()))
        .json(&json!({"name": "Acme", "kind": "company", "document": "12.345.678/0001-9"}))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("Invalid JSON");
    assert_eq!(body["error"], "CNPJ must have exactly 14 digits (got 13)");
}

#[tokio::test]
#[ignore = "Requires running back office and seeded database"]
async fn test_duplicate_document_conflicts() {
    let client = logged_in(TestUser::Admin).await;
    let digits = unique_document(DocumentKind::Company);

    let first = create_customer(
        &client,
        &json!({"name": "Acme", "kind": "company", "document": digits}),
    )
    .await;

    let resp = client
        .post(format!("{}/api/customers", base_url()))
        .json(&json!({
            "name": "Acme Again",
            "kind": "company",
            "document": format_document(&digits, DocumentKind::Company),
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = resp.json().await.expect("Invalid JSON");
    assert_eq!(body["field"], "document");

    delete_customer(&client, &first["id"]).await;
}

#[tokio::test]
#[ignore = "Requires running back office and seeded database"]
async fn test_update_keeps_document() {
    let client = logged_in(TestUser::Operator).await;
    let digits = unique_document(DocumentKind::Individual);

    let created = create_customer(
        &client,
        &json!({"name": "Before", "kind": "individual", "document": digits}),
    )
    .await;
    let id = &created["id"];

    let resp = client
        .put(format!("{}/api/customers/{id}", base_url()))
        .json(&json!({"name": "After", "document": "00000000000", "address": "Rua A, 1"}))
        .send()
        .await
        .expect("Failed to update");
    assert_eq!(resp.status(), StatusCode::OK);

    let updated: Value = resp.json().await.expect("Invalid JSON");
    assert_eq!(updated["name"], "After");
    assert_eq!(updated["address"], "Rua A, 1");
    assert_eq!(updated["document"], digits.as_str());

    delete_customer(&client, id).await;
}

#[tokio::test]
#[ignore = "Requires running back office and seeded database"]
async fn test_delete_then_get_is_not_found() {
    let client = logged_in(TestUser::Operator).await;
    let digits = unique_document(DocumentKind::Individual);

    let created = create_customer(
        &client,
        &json!({"name": "Temporary", "kind": "individual", "document": digits}),
    )
    .await;
    let id = &created["id"];

    let resp = client
        .delete(format!("{}/api/customers/{id}", base_url()))
        .send()
        .await
        .expect("Failed to delete");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Invalid JSON");
    assert_eq!(body, json!({"success": true}));

    let resp = client
        .get(format!("{}/api/customers/{id}", base_url()))
        .send()
        .await
        .expect("Failed to get");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running back office and seeded database"]
async fn test_search_by_name_and_document() {
    let client = logged_in(TestUser::Operator).await;

    let resp = client
        .get(format!("{}/api/customers?search=maria", base_url()))
        .send()
        .await
        .expect("Failed to search");
    assert_eq!(resp.status(), StatusCode::OK);
    let found: Vec<Value> = resp.json().await.expect("Invalid JSON");
    assert!(found.iter().any(|c| c["name"] == "Maria Silva"));

    // Punctuated CNPJ fragment matches the digits-only stored document
    let resp = client
        .get(format!("{}/api/customers?search=0001-90", base_url()))
        .send()
        .await
        .expect("Failed to search");
    let found: Vec<Value> = resp.json().await.expect("Invalid JSON");
    assert!(found.iter().any(|c| c["document"] == "12345678000190"));

    let resp = client
        .get(format!("{}/api/customers", base_url()))
        .send()
        .await
        .expect("Failed to list");
    let all: Vec<Value> = resp.json().await.expect("Invalid JSON");
    assert!(all.len() <= 50);
}
