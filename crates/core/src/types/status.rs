//! Status enums for sales and cash-drawer records.

use serde::{Deserialize, Serialize};

/// Kind of receipt issued for a sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "pos.receipt_kind", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum ReceiptKind {
    #[default]
    NonFiscal,
    Fiscal,
}

/// Direction of a cash-drawer movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "pos.cash_movement_kind", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum CashMovementKind {
    /// Money taken out of the drawer ("sangria").
    Withdrawal,
    /// Money put into the drawer ("suprimento").
    Supply,
}

impl std::fmt::Display for CashMovementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Withdrawal => write!(f, "withdrawal"),
            Self::Supply => write!(f, "supply"),
        }
    }
}
