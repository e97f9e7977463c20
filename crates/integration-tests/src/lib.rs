//! Integration tests for the Armarinho back office.
//!
//! The tests talk HTTP to a running server backed by a migrated and seeded
//! database, so they are `#[ignore]`d by default.
//!
//! # Running Tests
//!
//! ```bash
//! cargo run -p armarinho-cli -- migrate
//! cargo run -p armarinho-cli -- seed --admin-password ... --operator-password ...
//! BACKOFFICE_TRUST_PROXY=true cargo run -p armarinho-backoffice &
//! TEST_ADMIN_PASSWORD=... TEST_OPERATOR_PASSWORD=... \
//!     cargo test -p armarinho-integration-tests -- --ignored
//! ```
//!
//! # Environment Variables
//!
//! - `BACKOFFICE_TEST_URL` - server URL (default `http://localhost:5000`)
//! - `TEST_ADMIN_LOGIN` / `TEST_ADMIN_PASSWORD` - admin credentials (login defaults to `admin`)
//! - `TEST_OPERATOR_LOGIN` / `TEST_OPERATOR_PASSWORD` - operator credentials
//!   (login defaults to `operador`)

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use uuid::Uuid;

/// Base URL of the server under test.
#[must_use]
pub fn base_url() -> String {
    std::env::var("BACKOFFICE_TEST_URL").unwrap_or_else(|_| "http://localhost:5000".to_owned())
}

/// Seeded user to log in as.
#[derive(Debug, Clone, Copy)]
pub enum TestUser {
    Admin,
    Operator,
}

impl TestUser {
    fn credentials(self) -> (String, String) {
        let (login_var, default_login, password_var) = match self {
            Self::Admin => ("TEST_ADMIN_LOGIN", "admin", "TEST_ADMIN_PASSWORD"),
            Self::Operator => ("TEST_OPERATOR_LOGIN", "operador", "TEST_OPERATOR_PASSWORD"),
        };
        let login = std::env::var(login_var).unwrap_or_else(|_| default_login.to_owned());
        let password = std::env::var(password_var)
            .unwrap_or_else(|_| panic!("{password_var} must be set for integration tests"));
        (login, password)
    }
}

/// A random private address for `X-Forwarded-For`.
///
/// Login is rate limited per client IP; each test client presents its own.
/// The server must run with `BACKOFFICE_TRUST_PROXY=true` to honor it.
#[must_use]
pub fn fresh_ip() -> String {
    let bytes = Uuid::new_v4().into_bytes();
    format!("10.{}.{}.{}", bytes[0], bytes[1], bytes[2])
}

/// A client with a cookie store and no automatic redirects.
///
/// # Panics
///
/// Panics if the client cannot be built.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Failed to create HTTP client")
}

/// A client logged in as `user` through the JSON login endpoint.
///
/// # Panics
///
/// Panics if login fails.
pub async fn logged_in(user: TestUser) -> Client {
    let (login, password) = user.credentials();
    let client = client();
    let response = client
        .post(format!("{}/login", base_url()))
        .header("x-forwarded-for", fresh_ip())
        .json(&json!({"loginName": login, "password": password}))
        .send()
        .await
        .expect("Failed to send login request");
    assert_eq!(response.status(), StatusCode::OK, "login as {user:?} failed");
    client
}

/// A random digits-only document of the right length for `kind`.
#[must_use]
pub fn unique_document(kind: armarinho_core::DocumentKind) -> String {
    let digits = Uuid::new_v4().as_u128().to_string();
    let len = kind.expected_len();
    format!("{digits:0>len$}")
        .chars()
        .rev()
        .take(len)
        .collect()
}

/// Create a customer and return the response body.
///
/// # Panics
///
/// Panics unless the server answers 201.
pub async fn create_customer(client: &Client, body: &Value) -> Value {
    let response = client
        .post(format!("{}/api/customers", base_url()))
        .json(body)
        .send()
        .await
        .expect("Failed to create customer");
    assert_eq!(response.status(), StatusCode::CREATED);
    response.json().await.expect("Invalid customer JSON")
}

/// Delete a customer, ignoring the outcome.
pub async fn delete_customer(client: &Client, id: &Value) {
    let _ = client
        .delete(format!("{}/api/customers/{id}", base_url()))
        .send()
        .await;
}
