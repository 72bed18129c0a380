//! Catalog error taxonomy.

use phone_catalog_core::{CategoryId, PhoneId, ValidationErrors};
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors returned by catalog operations.
///
/// Every variant is deterministic for a given input; nothing here is worth
/// retrying.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No entity with the given id exists.
    #[error("{kind} not found with id: {id}")]
    NotFound { kind: &'static str, id: String },

    /// One or more fields violated a constraint. Nothing was mutated.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// `min_price` was greater than `max_price`.
    #[error("Minimum price cannot be greater than maximum price ({min} > {max})")]
    InvalidRange { min: Decimal, max: Decimal },

    /// A broken internal invariant, such as a poisoned lock.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CatalogError {
    #[must_use]
    pub fn phone_not_found(id: &PhoneId) -> Self {
        Self::NotFound {
            kind: "Phone",
            id: id.to_string(),
        }
    }

    #[must_use]
    pub fn category_not_found(id: &CategoryId) -> Self {
        Self::NotFound {
            kind: "Category",
            id: id.to_string(),
        }
    }

    pub(crate) fn poisoned(what: &str) -> Self {
        Self::Internal(format!("{what} lock poisoned"))
    }
}

/// Result type alias for `CatalogError`.
pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CatalogError::phone_not_found(&PhoneId::new("abc"));
        assert_eq!(err.to_string(), "Phone not found with id: abc");

        let err = CatalogError::InvalidRange {
            min: Decimal::from(10),
            max: Decimal::from(5),
        };
        assert_eq!(
            err.to_string(),
            "Minimum price cannot be greater than maximum price (10 > 5)"
        );
    }

    #[test]
    fn test_validation_is_transparent() {
        let err = CatalogError::from(ValidationErrors::single("name", "Phone name is required"));
        assert_eq!(
            err.to_string(),
            "validation failed: name: Phone name is required"
        );
    }
}
