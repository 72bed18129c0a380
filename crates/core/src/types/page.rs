//! Zero-based pagination types.

use serde::{Deserialize, Serialize};

use super::validation::ValidationErrors;

/// A validated request for one page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    page: usize,
    size: usize,
}

impl PageRequest {
    /// Default page size when a client does not ask for one.
    pub const DEFAULT_SIZE: usize = 10;

    /// Create a page request. `page` is zero-based.
    ///
    /// # Errors
    ///
    /// Returns a `size` field error if `size` is zero.
    pub fn new(page: usize, size: usize) -> Result<Self, ValidationErrors> {
        if size == 0 {
            return Err(ValidationErrors::single(
                "size",
                "Page size must be at least 1",
            ));
        }
        Ok(Self { page, size })
    }

    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Index of the first item on this page (saturating).
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.page.saturating_mul(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: Self::DEFAULT_SIZE,
        }
    }
}

/// One page of results plus the size of the full result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: usize,
    pub total_pages: usize,
    pub page: usize,
    pub size: usize,
}

impl<T> Page<T> {
    /// Assemble a page from its content and the total result count.
    #[must_use]
    pub fn new(content: Vec<T>, total_elements: usize, request: PageRequest) -> Self {
        Self {
            content,
            total_elements,
            total_pages: total_elements.div_ceil(request.size),
            page: request.page,
            size: request.size,
        }
    }

    /// Transform each item, keeping the page metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            page: self.page,
            size: self.size,
        }
    }
}
