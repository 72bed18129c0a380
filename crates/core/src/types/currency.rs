//! ISO 4217 style currency codes.

use serde::Serialize;

/// Errors that can occur when parsing a [`CurrencyCode`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CurrencyError {
    /// The code is not exactly three characters long.
    #[error("currency code must be exactly {expected} letters")]
    InvalidLength {
        /// Required length.
        expected: usize,
    },
    /// The code contains something other than `A`-`Z`.
    #[error("currency code must only contain uppercase ASCII letters")]
    InvalidCharacter,
}

/// A three-letter uppercase currency code such as `USD` or `EUR`.
///
/// ## Examples
///
/// ```
/// use phone_catalog_core::CurrencyCode;
///
/// assert!(CurrencyCode::parse("USD").is_ok());
/// assert!(CurrencyCode::parse("usd").is_err());
/// assert!(CurrencyCode::parse("EURO").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct CurrencyCode([u8; 3]);

impl CurrencyCode {
    /// Required length of a currency code.
    pub const LENGTH: usize = 3;

    /// US dollar.
    pub const USD: Self = Self(*b"USD");

    /// Parse a `CurrencyCode` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not exactly three uppercase ASCII letters.
    pub fn parse(s: &str) -> Result<Self, CurrencyError> {
        let bytes: [u8; 3] = s
            .as_bytes()
            .try_into()
            .map_err(|_| CurrencyError::InvalidLength {
                expected: Self::LENGTH,
            })?;

        if !bytes.iter().all(u8::is_ascii_uppercase) {
            return Err(CurrencyError::InvalidCharacter);
        }

        Ok(Self(bytes))
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        // Only ASCII uppercase bytes are ever stored.
        core::str::from_utf8(&self.0).unwrap_or("???")
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.as_str().to_owned()
    }
}
