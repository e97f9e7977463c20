//! Brazilian tax-id documents (CPF and CNPJ).
//!
//! Documents are always stored and transmitted as digits only. Punctuation is
//! stripped by [`normalize`] before validation, and re-inserted by
//! [`format_document`] for display.
//!
//! Only the digit count is checked. CPF/CNPJ check digits are not verified.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Which kind of registration number a customer holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "pos.document_kind", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Natural person, identified by an 11-digit CPF.
    #[default]
    Individual,
    /// Legal entity, identified by a 14-digit CNPJ.
    Company,
}

impl DocumentKind {
    /// Number of digits a document of this kind must have.
    #[must_use]
    pub const fn expected_len(self) -> usize {
        match self {
            Self::Individual => 11,
            Self::Company => 14,
        }
    }

    /// Short human-readable name of the document ("CPF" or "CNPJ").
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Individual => "CPF",
            Self::Company => "CNPJ",
        }
    }

    /// Wire name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Individual => "individual",
            Self::Company => "company",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DocumentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "individual" => Ok(Self::Individual),
            "company" => Ok(Self::Company),
            _ => Err(format!("invalid document kind: {s}")),
        }
    }
}

/// Errors that can occur when validating a [`Document`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// The number of digits does not match the document kind.
    #[error("{} must have exactly {expected} digits (got {actual})", kind.label())]
    InvalidLength {
        /// Kind the document was validated against.
        kind: DocumentKind,
        /// Required digit count for `kind`.
        expected: usize,
        /// Digit count that was supplied.
        actual: usize,
    },
}

/// Strip every character that is not an ASCII decimal digit.
///
/// ```
/// use armarinho_core::normalize;
///
/// assert_eq!(normalize("123.456.789-01"), "12345678901");
/// assert_eq!(normalize("12.345.678/0001-90"), "12345678000190");
/// ```
#[must_use]
pub fn normalize(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Check that an already-normalized document has the length its kind requires.
///
/// # Errors
///
/// Returns [`DocumentError::InvalidLength`] when the digit count is wrong.
pub fn validate(digits: &str, kind: DocumentKind) -> Result<(), DocumentError> {
    let expected = kind.expected_len();
    let actual = digits.len();
    if actual == expected {
        Ok(())
    } else {
        Err(DocumentError::InvalidLength {
            kind,
            expected,
            actual,
        })
    }
}

/// Insert the conventional CPF/CNPJ punctuation for display.
///
/// Input that is not a complete digits-only document of `kind` is returned
/// unchanged.
///
/// ```
/// use armarinho_core::{DocumentKind, format_document};
///
/// assert_eq!(format_document("12345678901", DocumentKind::Individual), "123.456.789-01");
/// assert_eq!(format_document("12345678000190", DocumentKind::Company), "12.345.678/0001-90");
/// assert_eq!(format_document("1234", DocumentKind::Company), "1234");
/// ```
#[must_use]
pub fn format_document(digits: &str, kind: DocumentKind) -> String {
    const CPF_SEPARATORS: &[(usize, char)] = &[(3, '.'), (6, '.'), (9, '-')];
    const CNPJ_SEPARATORS: &[(usize, char)] = &[(2, '.'), (5, '.'), (8, '/'), (12, '-')];

    if digits.len() != kind.expected_len() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return digits.to_owned();
    }

    let separators = match kind {
        DocumentKind::Individual => CPF_SEPARATORS,
        DocumentKind::Company => CNPJ_SEPARATORS,
    };

    let mut out = String::with_capacity(digits.len() + separators.len());
    for (i, c) in digits.chars().enumerate() {
        if let Some((_, sep)) = separators.iter().find(|(pos, _)| *pos == i) {
            out.push(*sep);
        }
        out.push(c);
    }
    out
}

/// A validated, digits-only tax-id document.
///
/// ## Constraints
///
/// - Contains only ASCII decimal digits
/// - 11 digits for [`DocumentKind::Individual`], 14 for [`DocumentKind::Company`]
///
/// ## Examples
///
/// ```
/// use armarinho_core::{Document, DocumentKind};
///
/// let doc = Document::parse("123.456.789-01", DocumentKind::Individual).unwrap();
/// assert_eq!(doc.as_str(), "12345678901");
///
/// assert!(Document::parse("12.345.678/0001-9", DocumentKind::Company).is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Document(String);

impl Document {
    /// Normalize `raw` and validate it against `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::InvalidLength`] if the digit count after
    /// normalization does not match `kind`.
    pub fn parse(raw: &str, kind: DocumentKind) -> Result<Self, DocumentError> {
        let digits = normalize(raw);
        validate(&digits, kind)?;
        Ok(Self(digits))
    }

    /// Returns the digits as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Document` and returns its digits.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Display form with punctuation for `kind`.
    #[must_use]
    pub fn formatted(&self, kind: DocumentKind) -> String {
        format_document(&self.0, kind)
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Document {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Document {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Document {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        // The column CHECK constraint guarantees digits only
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Document {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_strips_punctuation() {
        assert_eq!(normalize("123.456.789-01"), "12345678901");
        assert_eq!(normalize("123-456-789-01"), "12345678901");
        assert_eq!(normalize(" 12.345.678/0001-90 "), "12345678000190");
        assert_eq!(normalize("abc"), "");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_normalize_ignores_non_ascii_digits() {
        // Arabic-Indic digits are not treated as document digits
        assert_eq!(normalize("١٢٣"), "");
    }

    #[test]
    fn test_validate_cpf() {
        assert!(validate("12345678901", DocumentKind::Individual).is_ok());
        assert_eq!(
            validate("1234567890", DocumentKind::Individual),
            Err(DocumentError::InvalidLength {
                kind: DocumentKind::Individual,
                expected: 11,
                actual: 10,
            })
        );
    }

    #[test]
    fn test_validate_cnpj() {
        assert!(validate("12345678000190", DocumentKind::Company).is_ok());
        assert!(validate("1234567800019", DocumentKind::Company).is_err());
        assert!(validate("12345678901", DocumentKind::Company).is_err());
    }

    #[test]
    fn test_error_message_names_the_document() {
        let err = validate("123", DocumentKind::Individual).unwrap_err();
        assert_eq!(err.to_string(), "CPF must have exactly 11 digits (got 3)");

        let err = validate("123", DocumentKind::Company).unwrap_err();
        assert_eq!(err.to_string(), "CNPJ must have exactly 14 digits (got 3)");
    }

    #[test]
    fn test_parse_examples() {
        let cpf = Document::parse("123.456.789-01", DocumentKind::Individual).unwrap();
        assert_eq!(cpf.as_str(), "12345678901");

        let cnpj = Document::parse("12.345.678/0001-90", DocumentKind::Company).unwrap();
        assert_eq!(cnpj.as_str(), "12345678000190");

        assert!(Document::parse("12.345.678/0001-9", DocumentKind::Company).is_err());
    }

    #[test]
    fn test_formatted() {
        let cpf = Document::parse("12345678901", DocumentKind::Individual).unwrap();
        assert_eq!(cpf.formatted(DocumentKind::Individual), "123.456.789-01");
        // Wrong kind leaves the digits untouched
        assert_eq!(cpf.formatted(DocumentKind::Company), "12345678901");
    }

    #[test]
    fn test_kind_serde() {
        assert_eq!(
            serde_json::to_string(&DocumentKind::Company).unwrap(),
            "\"company\""
        );
        let kind: DocumentKind = serde_json::from_str("\"individual\"").unwrap();
        assert_eq!(kind, DocumentKind::Individual);
        assert!(serde_json::from_str::<DocumentKind>("\"cpf\"").is_err());
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("company".parse(), Ok(DocumentKind::Company));
        assert!("cnpj".parse::<DocumentKind>().is_err());
    }

    proptest! {
        #[test]
        fn prop_normalize_is_idempotent(raw in ".*") {
            let once = normalize(&raw);
            prop_assert_eq!(normalize(&once), once.clone());
        }

        #[test]
        fn prop_normalize_yields_only_digits(raw in ".*") {
            prop_assert!(normalize(&raw).bytes().all(|b| b.is_ascii_digit()));
        }

        #[test]
        fn prop_individual_accepts_exactly_eleven(digits in "[0-9]{0,30}") {
            let ok = validate(&digits, DocumentKind::Individual).is_ok();
            prop_assert_eq!(ok, digits.len() == 11);
        }

        #[test]
        fn prop_company_accepts_exactly_fourteen(digits in "[0-9]{0,30}") {
            let ok = validate(&digits, DocumentKind::Company).is_ok();
            prop_assert_eq!(ok, digits.len() == 14);
        }

        #[test]
        fn prop_format_then_normalize_recovers_digits(digits in "[0-9]{14}") {
            let formatted = format_document(&digits, DocumentKind::Company);
            prop_assert_eq!(normalize(&formatted), digits);
        }
    }
}
