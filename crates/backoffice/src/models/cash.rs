//! Cash-drawer movement models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use armarinho_core::{CashMovementId, CashMovementKind, Money, UserId};

/// Body of a withdrawal or supply request.
///
/// Implements `Debug` manually to redact the admin password.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashMovementRequest {
    pub amount: Money,
    pub note: Option<String>,
    pub admin_password: String,
}

impl std::fmt::Debug for CashMovementRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CashMovementRequest")
            .field("amount", &self.amount)
            .field("note", &self.note)
            .field("admin_password", &"[REDACTED]")
            .finish()
    }
}

/// A recorded cash-drawer movement.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CashMovement {
    pub id: CashMovementId,
    pub created_at: DateTime<Utc>,
    pub user_id: UserId,
    pub kind: CashMovementKind,
    pub amount: Money,
    pub note: Option<String>,
    /// Admin whose password authorized the movement.
    pub authorized_by: UserId,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_request_debug_redacts_password() {
        let request: CashMovementRequest = serde_json::from_str(
            r#"{"amount": "50.00", "note": "troco", "adminPassword": "java1814"}"#,
        )
        .unwrap();
        let debug_output = format!("{request:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("java1814"));
    }
}
