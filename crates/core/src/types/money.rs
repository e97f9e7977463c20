//! Monetary amounts in Brazilian reais, using decimal arithmetic.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing [`Money`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MoneyError {
    #[error("amount must be greater than zero")]
    NotPositive,
    #[error("amount has more than two decimal places")]
    TooPrecise,
}

/// A strictly positive amount with at most two decimal places.
///
/// Used for sale totals and cash-drawer movements.
///
/// ```
/// use armarinho_core::Money;
/// use rust_decimal::Decimal;
///
/// let total = Money::new(Decimal::new(1250, 2)).unwrap();
/// assert_eq!(total.display(), "R$ 12,50");
///
/// assert!(Money::new(Decimal::ZERO).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Money(Decimal);

impl Money {
    /// Validate and wrap an amount.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::NotPositive`] for zero or negative amounts and
    /// [`MoneyError::TooPrecise`] for fractions of a centavo.
    pub fn new(amount: Decimal) -> Result<Self, MoneyError> {
        if amount <= Decimal::ZERO {
            return Err(MoneyError::NotPositive);
        }
        if amount.normalize().scale() > 2 {
            return Err(MoneyError::TooPrecise);
        }
        Ok(Self(amount))
    }

    /// The wrapped amount.
    #[must_use]
    pub const fn amount(self) -> Decimal {
        self.0
    }

    /// Format for display with the Brazilian decimal comma (e.g., "R$ 5,00").
    #[must_use]
    pub fn display(self) -> String {
        format!("R$ {:.2}", self.0).replace('.', ",")
    }
}

impl TryFrom<Decimal> for Money {
    type Error = MoneyError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Money> for Decimal {
    fn from(value: Money) -> Self {
        value.0
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Money {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <Decimal as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <Decimal as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Money {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let amount = <Decimal as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self::new(amount)?)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Money {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <Decimal as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_positive() {
        assert_eq!(Money::new(Decimal::ZERO), Err(MoneyError::NotPositive));
        assert_eq!(Money::new(Decimal::new(-1, 0)), Err(MoneyError::NotPositive));
    }

    #[test]
    fn test_rejects_sub_centavo() {
        assert_eq!(Money::new(Decimal::new(1001, 3)), Err(MoneyError::TooPrecise));
        // Trailing zeros are fine
        assert!(Money::new(Decimal::new(5000, 3)).is_ok());
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::new(Decimal::new(5, 0)).unwrap().display(), "R$ 5,00");
        assert_eq!(Money::new(Decimal::new(2550, 2)).unwrap().display(), "R$ 25,50");
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: Money = serde_json::from_str("\"12.50\"").unwrap();
        assert_eq!(ok.amount(), Decimal::new(1250, 2));
        let ok: Money = serde_json::from_str("12.5").unwrap();
        assert_eq!(ok.amount(), Decimal::new(125, 1));
        assert!(serde_json::from_str::<Money>("0").is_err());
        assert!(serde_json::from_str::<Money>("\"-3\"").is_err());
    }
}
