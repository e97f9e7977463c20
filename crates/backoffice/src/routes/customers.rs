//! Customer JSON API.
//!
//! Handlers pass the session context straight to [`CustomerService`], which
//! rejects anonymous callers before touching storage.

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use armarinho_core::CustomerId;

use crate::db::PgCustomerRepository;
use crate::error::Result;
use crate::middleware::OptionalAuth;
use crate::models::{CreateCustomer, Customer, UpdateCustomer};
use crate::services::{CustomerService, require_auth};
use crate::state::AppState;

/// Query parameters for listing customers.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub search: String,
}

/// Body of a successful delete.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

fn service(state: &AppState) -> CustomerService<PgCustomerRepository<'_>> {
    CustomerService::new(PgCustomerRepository::new(state.pool()))
}

/// `GET /api/customers?search=`
pub async fn list(
    OptionalAuth(ctx): OptionalAuth,
    State(state): State<AppState>,
    query: std::result::Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<Vec<Customer>>> {
    require_auth(ctx.as_ref())?;
    let Query(query) = query?;

    let customers = service(&state).search(ctx.as_ref(), &query.search).await?;
    Ok(Json(customers))
}

/// `POST /api/customers`
pub async fn create(
    OptionalAuth(ctx): OptionalAuth,
    State(state): State<AppState>,
    body: std::result::Result<Json<CreateCustomer>, JsonRejection>,
) -> Result<(StatusCode, Json<Customer>)> {
    // Anonymous callers get 401 even when the request is malformed
    require_auth(ctx.as_ref())?;
    let Json(input) = body?;

    let customer = service(&state).create(ctx.as_ref(), input).await?;
    Ok((StatusCode::CREATED, Json(customer)))
}

/// `GET /api/customers/{id}`
pub async fn show(
    OptionalAuth(ctx): OptionalAuth,
    State(state): State<AppState>,
    path: std::result::Result<Path<CustomerId>, PathRejection>,
) -> Result<Json<Customer>> {
    require_auth(ctx.as_ref())?;
    let Path(id) = path?;

    let customer = service(&state).get(ctx.as_ref(), id).await?;
    Ok(Json(customer))
}

/// `PUT /api/customers/{id}`
pub async fn update(
    OptionalAuth(ctx): OptionalAuth,
    State(state): State<AppState>,
    path: std::result::Result<Path<CustomerId>, PathRejection>,
    body: std::result::Result<Json<UpdateCustomer>, JsonRejection>,
) -> Result<Json<Customer>> {
    require_auth(ctx.as_ref())?;
    let Path(id) = path?;
    let Json(input) = body?;

    let customer = service(&state).update(ctx.as_ref(), id, input).await?;
    Ok(Json(customer))
}

/// `DELETE /api/customers/{id}`
pub async fn delete(
    OptionalAuth(ctx): OptionalAuth,
    State(state): State<AppState>,
    path: std::result::Result<Path<CustomerId>, PathRejection>,
) -> Result<Json<DeleteResponse>> {
    require_auth(ctx.as_ref())?;
    let Path(id) = path?;

    service(&state).delete(ctx.as_ref(), id).await?;
    Ok(Json(DeleteResponse { success: true }))
}
