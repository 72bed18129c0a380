//! Phone categories (Budget, Flagship, ...).

use serde::{Deserialize, Serialize};

use super::id::CategoryId;
use super::validation::ValidationErrors;

/// Input for creating a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCategory {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl NewCategory {
    pub const NAME_LENGTH: (usize, usize) = (3, 50);
    pub const MAX_DESCRIPTION_LENGTH: usize = 200;

    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: Some(description.into()),
        }
    }

    /// # Errors
    ///
    /// Returns field errors for a blank or out-of-range name or an overlong
    /// description.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let (min, max) = Self::NAME_LENGTH;

        if self.name.trim().is_empty() {
            errors.add("name", "Category name is required");
        } else {
            let len = self.name.chars().count();
            if len < min || len > max {
                errors.add(
                    "name",
                    format!("Category name must be between {min} and {max} characters"),
                );
            }
        }

        if self
            .description
            .as_ref()
            .is_some_and(|d| d.chars().count() > Self::MAX_DESCRIPTION_LENGTH)
        {
            errors.add(
                "description",
                "Description cannot exceed 200 characters",
            );
        }

        errors.into_result()
    }
}

/// A stored category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub description: Option<String>,
}
