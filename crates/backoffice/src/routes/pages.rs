//! Server-rendered pages.
//!
//! Anonymous visitors are redirected to the login page by [`RequireAuth`];
//! a logged-in user with the wrong role gets a 403 page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{Local, TimeZone, Utc};
use serde::Deserialize;

use armarinho_core::{Money, ReceiptKind, Role};

use crate::db::PgCustomerRepository;
use crate::db::sales::SaleRepository;
use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::models::{AuthContext, Customer, Sale};
use crate::services::{CustomerService, require_role};
use crate::state::AppState;

/// Sales listed on the dashboard.
const RECENT_SALES: i64 = 10;

// =============================================================================
// View Models
// =============================================================================

/// One line of the customer table.
pub struct CustomerView {
    pub id: i32,
    pub name: String,
    pub kind: &'static str,
    pub document: String,
    pub phone: String,
    pub email: String,
}

impl From<&Customer> for CustomerView {
    fn from(customer: &Customer) -> Self {
        Self {
            id: customer.id.as_i32(),
            name: customer.name.clone(),
            kind: customer.kind.label(),
            document: customer.formatted_document(),
            phone: customer.phone.clone().unwrap_or_default(),
            email: customer.email.clone().unwrap_or_default(),
        }
    }
}

/// One line of the dashboard's recent sales.
pub struct SaleView {
    pub id: i32,
    pub date: String,
    pub total: String,
    pub receipt: &'static str,
}

impl From<&Sale> for SaleView {
    fn from(sale: &Sale) -> Self {
        Self {
            id: sale.id.as_i32(),
            date: sale
                .created_at
                .with_timezone(&Local)
                .format("%d/%m/%Y %H:%M")
                .to_string(),
            total: sale.total.display(),
            receipt: match sale.receipt_kind {
                ReceiptKind::Fiscal => "Fiscal",
                ReceiptKind::NonFiscal => "Non-fiscal",
            },
        }
    }
}

/// Query parameters of the customer page.
#[derive(Debug, Deserialize)]
pub struct CustomerPageQuery {
    #[serde(default)]
    pub search: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Customer management page.
#[derive(Template, WebTemplate)]
#[template(path = "customers.html")]
pub struct CustomersTemplate {
    pub user: AuthContext,
    pub search: String,
    pub customers: Vec<CustomerView>,
}

/// Sales screen.
#[derive(Template, WebTemplate)]
#[template(path = "sales.html")]
pub struct SalesTemplate {
    pub user: AuthContext,
}

/// Admin dashboard.
#[derive(Template, WebTemplate)]
#[template(path = "admin.html")]
pub struct AdminTemplate {
    pub user: AuthContext,
    pub customer_count: i64,
    pub sales_today: i64,
    pub revenue_today: String,
    pub recent_sales: Vec<SaleView>,
}

/// Shown to a logged-in user whose role does not allow the page.
#[derive(Template, WebTemplate)]
#[template(path = "forbidden.html")]
pub struct ForbiddenTemplate {
    pub user: AuthContext,
}

fn forbidden(user: AuthContext) -> Response {
    (StatusCode::FORBIDDEN, ForbiddenTemplate { user }).into_response()
}

// =============================================================================
// Handlers
// =============================================================================

/// `GET /customers`
pub async fn customers(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Query(query): Query<CustomerPageQuery>,
) -> Result<Response> {
    let service = CustomerService::new(PgCustomerRepository::new(state.pool()));
    let found = service.search(Some(&user), &query.search).await?;

    Ok(CustomersTemplate {
        user,
        search: query.search,
        customers: found.iter().map(CustomerView::from).collect(),
    }
    .into_response())
}

/// `GET /sales`
pub async fn sales(RequireAuth(user): RequireAuth) -> Response {
    if require_role(Some(&user), Role::Operator).is_err() {
        return forbidden(user);
    }
    SalesTemplate { user }.into_response()
}

/// `GET /admin`
pub async fn admin(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> Result<Response> {
    if require_role(Some(&user), Role::Admin).is_err() {
        return Ok(forbidden(user));
    }

    let sales = SaleRepository::new(state.pool());
    let summary = sales.summary_since(start_of_today()).await?;
    let recent = sales.recent(RECENT_SALES).await?;
    let customer_count = PgCustomerRepository::new(state.pool()).count().await?;

    Ok(AdminTemplate {
        user,
        customer_count,
        sales_today: summary.count,
        revenue_today: Money::new(summary.total)
            .map_or_else(|_| "R$ 0,00".to_owned(), |m| m.display()),
        recent_sales: recent.iter().map(SaleView::from).collect(),
    }
    .into_response())
}

/// Local midnight, in UTC.
fn start_of_today() -> chrono::DateTime<Utc> {
    let today = Local::now().date_naive();
    today
        .and_hms_opt(0, 0, 0)
        .and_then(|midnight| Local.from_local_datetime(&midnight).earliest())
        .map_or_else(Utc::now, |start| start.with_timezone(&Utc))
}
