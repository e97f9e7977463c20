//! Cash-drawer withdrawals and supplies.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::Serialize;

use armarinho_core::{CashMovementId, CashMovementKind};

use crate::error::Result;
use crate::middleware::OptionalAuth;
use crate::models::{AuthContext, CashMovementRequest};
use crate::services::{CashService, require_auth};
use crate::state::AppState;

/// Body of a recorded movement.
#[derive(Debug, Serialize)]
pub struct MovementResponse {
    pub success: bool,
    pub id: CashMovementId,
}

async fn record(
    state: &AppState,
    ctx: Option<&AuthContext>,
    kind: CashMovementKind,
    body: std::result::Result<Json<CashMovementRequest>, JsonRejection>,
) -> Result<Json<MovementResponse>> {
    require_auth(ctx)?;
    let Json(request) = body?;

    let movement = CashService::new(state.pool())
        .record(ctx, kind, request)
        .await?;
    Ok(Json(MovementResponse {
        success: true,
        id: movement.id,
    }))
}

/// `POST /api/cash/withdrawals`
pub async fn withdrawal(
    OptionalAuth(ctx): OptionalAuth,
    State(state): State<AppState>,
    body: std::result::Result<Json<CashMovementRequest>, JsonRejection>,
) -> Result<Json<MovementResponse>> {
    record(&state, ctx.as_ref(), CashMovementKind::Withdrawal, body).await
}

/// `POST /api/cash/supplies`
pub async fn supply(
    OptionalAuth(ctx): OptionalAuth,
    State(state): State<AppState>,
    body: std::result::Result<Json<CashMovementRequest>, JsonRejection>,
) -> Result<Json<MovementResponse>> {
    record(&state, ctx.as_ref(), CashMovementKind::Supply, body).await
}
