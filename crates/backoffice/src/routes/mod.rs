//! HTTP route handlers for the back office.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                          - Redirect by role
//! GET  /health                    - Liveness check
//! GET  /health/ready              - Readiness check (database)
//!
//! # Auth
//! GET  /login                     - Login page
//! POST /login                     - Login action (JSON or form, rate limited)
//! GET  /logout                    - Logout and redirect to /login
//!
//! # Pages
//! GET  /customers                 - Customer management (any user)
//! GET  /sales                     - Sales screen (operator)
//! GET  /admin                     - Dashboard (admin)
//!
//! # API (JSON, session required)
//! GET    /api/customers?search=   - Search or list customers
//! POST   /api/customers           - Create customer
//! GET    /api/customers/{id}      - Get customer
//! PUT    /api/customers/{id}      - Update customer
//! DELETE /api/customers/{id}      - Delete customer
//! GET    /api/products/search?q=  - Product search
//! POST   /api/sales               - Register a sale
//! POST   /api/cash/withdrawals    - Cash withdrawal (admin password)
//! POST   /api/cash/supplies       - Cash supply (admin password)
//! ```

pub mod auth;
pub mod cash;
pub mod customers;
pub mod pages;
pub mod products;
pub mod sales;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use tower_http::services::ServeDir;

use crate::middleware::{
    create_session_layer, login_rate_limiter, request_id_middleware, security_headers_middleware,
};
use crate::config::BackofficeConfig;
use crate::state::AppState;

/// Customer API routes.
fn customer_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(customers::list).post(customers::create))
        .route(
            "/{id}",
            get(customers::show)
                .put(customers::update)
                .delete(customers::delete),
        )
}

/// Sales-screen API routes.
fn sales_api_routes() -> Router<AppState> {
    Router::new()
        .route("/products/search", get(products::search))
        .route("/sales", post(sales::create))
        .route("/cash/withdrawals", post(cash::withdrawal))
        .route("/cash/supplies", post(cash::supply))
}

/// Create all routes for the back office.
pub fn routes(config: &BackofficeConfig) -> Router<AppState> {
    Router::new()
        .route("/", get(auth::index))
        // Only login attempts count against the rate limit
        .route(
            "/login",
            get(auth::login_page)
                .merge(post(auth::login).layer(login_rate_limiter(config.trust_proxy_headers))),
        )
        .route("/logout", get(auth::logout))
        // Pages
        .route("/customers", get(pages::customers))
        .route("/sales", get(pages::sales))
        .route("/admin", get(pages::admin))
        // JSON API
        .nest("/api/customers", customer_routes())
        .nest("/api", sales_api_routes())
}

/// Build the full application with health checks, static files and the
/// session, request-id and security-header middleware.
///
/// Tracing and Sentry layers are added by the binary.
pub fn app(state: AppState) -> Router {
    let session_layer = create_session_layer(state.config());

    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(routes(state.config()))
        .nest_service("/static", ServeDir::new("crates/backoffice/static"))
        .layer(axum::middleware::from_fn(security_headers_middleware))
        .layer(session_layer)
        .layer(axum::middleware::from_fn(request_id_middleware))
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the database is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match sqlx::query("SELECT 1").fetch_one(state.pool()).await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}
