//! Login, logout and the role-based landing redirect.
//!
//! `POST /login` accepts either a JSON body (the login page script) or a
//! classic form post, and answers in the same style.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Json,
    extract::{FromRequest, Query, Request, State},
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use armarinho_core::Role;

use crate::db::PgUserRepository;
use crate::error::{AppError, clear_sentry_user, set_sentry_user};
use crate::middleware::OptionalAuth;
use crate::middleware::auth::LOGIN_PATH;
use crate::services::AuthError;
use crate::services::session::{self, SessionGate};
use crate::state::AppState;

// =============================================================================
// Request / Response Types
// =============================================================================

/// Login credentials, as JSON or form fields.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    pub login_name: String,
    #[serde(default)]
    pub password: String,
}

impl LoginRequest {
    /// Strip surrounding whitespace from the login name.
    fn trimmed(mut self) -> Self {
        let trimmed = self.login_name.trim();
        if trimmed.len() != self.login_name.len() {
            self.login_name = trimmed.to_owned();
        }
        self
    }
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("login_name", &self.login_name)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// A login submission, remembering how it was sent.
#[derive(Debug)]
pub enum LoginSubmission {
    Json(LoginRequest),
    Form(LoginRequest),
}

impl<S> FromRequest<S> for LoginSubmission
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/json"));

        if is_json {
            let Json(body) = Json::<LoginRequest>::from_request(req, state).await?;
            Ok(Self::Json(body.trimmed()))
        } else {
            let Form(body) = Form::<LoginRequest>::from_request(req, state).await?;
            Ok(Self::Form(body.trimmed()))
        }
    }
}

/// JSON answer to a successful login.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub role: Role,
    pub redirect_hint: &'static str,
}

/// Query parameters of the login page.
#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    pub error: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub error: Option<&'static str>,
}

fn error_message(code: &str) -> &'static str {
    match code {
        "credentials" => "Invalid login or password.",
        "unavailable" => "Login is temporarily unavailable. Try again shortly.",
        _ => "Could not log in.",
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// `GET /` - send each user to their landing page.
pub async fn index(OptionalAuth(ctx): OptionalAuth) -> Redirect {
    match ctx {
        Some(ctx) => Redirect::to(ctx.role.landing_path()),
        None => Redirect::to(LOGIN_PATH),
    }
}

/// `GET /login`
pub async fn login_page(
    OptionalAuth(ctx): OptionalAuth,
    Query(query): Query<LoginQuery>,
) -> Response {
    if let Some(ctx) = ctx {
        return Redirect::to(ctx.role.landing_path()).into_response();
    }

    LoginTemplate {
        error: query.error.as_deref().map(error_message),
    }
    .into_response()
}

/// `POST /login`
#[tracing::instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    submission: LoginSubmission,
) -> Response {
    let (request, wants_json) = match submission {
        LoginSubmission::Json(request) => (request, true),
        LoginSubmission::Form(request) => (request, false),
    };

    let gate = SessionGate::new(PgUserRepository::new(state.pool()));
    match gate
        .login(&session, &request.login_name, &request.password)
        .await
    {
        Ok(ctx) => {
            set_sentry_user(&ctx.user_id, &request.login_name);
            let redirect_hint = ctx.role.landing_path();
            if wants_json {
                Json(LoginResponse {
                    role: ctx.role,
                    redirect_hint,
                })
                .into_response()
            } else {
                Redirect::to(redirect_hint).into_response()
            }
        }
        Err(AuthError::InvalidCredentials) => {
            if wants_json {
                AppError::Unauthorized("Invalid login or password".to_owned()).into_response()
            } else {
                Redirect::to("/login?error=credentials").into_response()
            }
        }
        Err(e) => {
            if wants_json {
                AppError::from(e).into_response()
            } else {
                tracing::error!(error = %e, "Login failed");
                Redirect::to("/login?error=unavailable").into_response()
            }
        }
    }
}

/// `GET /logout`
pub async fn logout(session: Session) -> Redirect {
    if let Err(e) = session::logout(&session).await {
        tracing::warn!(error = %e, "Failed to clear session on logout");
    }
    clear_sentry_user();
    Redirect::to(LOGIN_PATH)
}
