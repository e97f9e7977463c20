//! Sale registration.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use chrono::Local;
use serde::Serialize;

use armarinho_core::{Money, SaleId};

use crate::error::Result;
use crate::middleware::OptionalAuth;
use crate::models::{NewSale, Sale};
use crate::services::{SalesService, require_auth};
use crate::state::AppState;

/// Receipt data returned to the sales screen.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleResponse {
    pub success: bool,
    pub sale_id: SaleId,
    /// Local time, `dd/mm/YYYY HH:MM:SS`.
    pub date: String,
    pub total: Money,
}

impl From<&Sale> for SaleResponse {
    fn from(sale: &Sale) -> Self {
        Self {
            success: true,
            sale_id: sale.id,
            date: sale
                .created_at
                .with_timezone(&Local)
                .format("%d/%m/%Y %H:%M:%S")
                .to_string(),
            total: sale.total,
        }
    }
}

/// `POST /api/sales`
pub async fn create(
    OptionalAuth(ctx): OptionalAuth,
    State(state): State<AppState>,
    body: std::result::Result<Json<NewSale>, JsonRejection>,
) -> Result<Json<SaleResponse>> {
    require_auth(ctx.as_ref())?;
    let Json(sale) = body?;

    let sale = SalesService::new(state.pool())
        .record(ctx.as_ref(), sale)
        .await?;
    Ok(Json(SaleResponse::from(&sale)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use armarinho_core::{ReceiptKind, UserId};
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn test_sale_response_shape() {
        let created_at = Utc.with_ymd_and_hms(2026, 3, 5, 15, 4, 9).unwrap();
        let sale = Sale {
            id: SaleId::new(12),
            created_at,
            user_id: UserId::new(2),
            customer_id: None,
            total: Money::new(Decimal::new(4590, 2)).unwrap(),
            receipt_kind: ReceiptKind::NonFiscal,
        };

        let json = serde_json::to_value(SaleResponse::from(&sale)).unwrap();
        let expected_date = created_at
            .with_timezone(&Local)
            .format("%d/%m/%Y %H:%M:%S")
            .to_string();
        assert_eq!(
            json,
            serde_json::json!({
                "success": true,
                "saleId": 12,
                "date": expected_date,
                "total": "45.90",
            })
        );
    }

    #[test]
    fn test_date_format() {
        let created_at = Utc.with_ymd_and_hms(2026, 3, 5, 15, 4, 9).unwrap();
        let sale = Sale {
            id: SaleId::new(1),
            created_at,
            user_id: UserId::new(1),
            customer_id: None,
            total: Money::new(Decimal::ONE).unwrap(),
            receipt_kind: ReceiptKind::Fiscal,
        };

        let date = SaleResponse::from(&sale).date;
        // dd/mm/YYYY HH:MM:SS
        assert_eq!(date.len(), 19);
        assert_eq!(&date[2..3], "/");
        assert_eq!(&date[5..6], "/");
        assert!(date.contains("/2026 "));
    }
}
