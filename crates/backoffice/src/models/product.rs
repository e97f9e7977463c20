//! Product catalog model.

use rust_decimal::Decimal;
use serde::Serialize;

use armarinho_core::ProductId;

/// A product as returned by the sales-screen search.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub code: Option<String>,
    pub description: String,
    pub sale_price: Decimal,
    pub stock: i32,
}
