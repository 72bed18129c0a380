//! Registry of phone categories.

use std::sync::RwLock;

use phone_catalog_core::{Category, CategoryId, NewCategory};
use tracing::info;

use crate::error::{CatalogError, Result};

/// In-memory list of categories, kept in creation order.
#[derive(Default)]
pub struct CategoryRegistry {
    categories: RwLock<Vec<Category>>,
}

impl CategoryRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    ///
    /// Returns `CatalogError::Internal` if the registry lock is poisoned.
    pub fn list(&self) -> Result<Vec<Category>> {
        Ok(self
            .categories
            .read()
            .map_err(|_| CatalogError::poisoned("category registry"))?
            .clone())
    }

    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if no category has this id.
    pub fn get(&self, id: &CategoryId) -> Result<Category> {
        self.categories
            .read()
            .map_err(|_| CatalogError::poisoned("category registry"))?
            .iter()
            .find(|c| &c.id == id)
            .cloned()
            .ok_or_else(|| CatalogError::category_not_found(id))
    }

    /// # Errors
    ///
    /// Returns `CatalogError::Validation` if the name or description is out of range.
    pub fn create(&self, new: NewCategory) -> Result<Category> {
        new.validate()?;

        let category = Category {
            id: CategoryId::generate(),
            name: new.name,
            description: new.description,
        };
        self.categories
            .write()
            .map_err(|_| CatalogError::poisoned("category registry"))?
            .push(category.clone());

        info!(id = %category.id, name = %category.name, "Category created");
        Ok(category)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_create_list_get() {
        let registry = CategoryRegistry::new();
        let budget = registry
            .create(NewCategory::new("Budget", "Affordable smartphones for everyone"))
            .unwrap();
        registry
            .create(NewCategory::new("Flagship", "Top-of-the-line premium phones"))
            .unwrap();

        let names: Vec<_> = registry.list().unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, ["Budget", "Flagship"]);
        assert_eq!(registry.get(&budget.id).unwrap(), budget);
    }

    #[test]
    fn test_get_missing() {
        let registry = CategoryRegistry::new();
        let err = registry.get(&CategoryId::new("nope")).unwrap_err();
        assert!(matches!(err, CatalogError::NotFound { kind: "Category", .. }));
    }

    #[test]
    fn test_invalid_category_not_stored() {
        let registry = CategoryRegistry::new();
        assert!(registry.create(NewCategory::new("X", "")).is_err());
        assert!(registry.list().unwrap().is_empty());
    }
}
