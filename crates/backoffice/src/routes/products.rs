//! Product search for the sales screen.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use serde::Deserialize;

use crate::error::Result;
use crate::middleware::OptionalAuth;
use crate::models::Product;
use crate::services::{SalesService, require_auth};
use crate::state::AppState;

/// Query parameters for product search.
#[derive(Debug, Deserialize)]
pub struct ProductQuery {
    #[serde(default)]
    pub q: String,
}

/// `GET /api/products/search?q=`
pub async fn search(
    OptionalAuth(ctx): OptionalAuth,
    State(state): State<AppState>,
    query: std::result::Result<Query<ProductQuery>, QueryRejection>,
) -> Result<Json<Vec<Product>>> {
    require_auth(ctx.as_ref())?;
    let Query(query) = query?;

    let products = SalesService::new(state.pool())
        .search_products(ctx.as_ref(), &query.q)
        .await?;
    Ok(Json(products))
}
