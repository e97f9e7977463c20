//! Sale models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use armarinho_core::{CustomerId, Money, ReceiptKind, SaleId, UserId};

/// Body of a sale registration request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSale {
    pub customer_id: Option<CustomerId>,
    pub total: Money,
    #[serde(default)]
    pub receipt_kind: ReceiptKind,
}

/// A registered sale.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: SaleId,
    pub created_at: DateTime<Utc>,
    pub user_id: UserId,
    pub customer_id: Option<CustomerId>,
    pub total: Money,
    pub receipt_kind: ReceiptKind,
}
