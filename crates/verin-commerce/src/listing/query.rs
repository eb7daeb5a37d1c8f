//! Listing query builders.
//!
//! Builders render to ordered `(name, value)` pairs; unset filters are
//! omitted instead of being sent empty.

use serde::{Deserialize, Serialize};

/// Filters for the product listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductQuery {
    /// Category slug.
    pub category: Option<String>,
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Items per page.
    pub page_size: Option<u32>,
    pub is_featured: Option<bool>,
    pub is_popular: Option<bool>,
    /// Free-text search.
    pub search: Option<String>,
}

impl ProductQuery {
    /// Create an unfiltered query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to a category slug. Blank slugs are ignored.
    pub fn with_category(mut self, slug: impl Into<String>) -> Self {
        self.category = non_blank(slug.into());
        self
    }

    /// Set pagination.
    pub fn with_pagination(mut self, page: u32, page_size: u32) -> Self {
        self.page = Some(page.max(1));
        self.page_size = Some(page_size.clamp(1, 100));
        self
    }

    /// Limit the number of results on the first page.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.page_size = Some(limit.clamp(1, 100));
        self
    }

    pub fn featured(mut self) -> Self {
        self.is_featured = Some(true);
        self
    }

    pub fn popular(mut self) -> Self {
        self.is_popular = Some(true);
        self
    }

    /// Set the text search. Blank text is ignored.
    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search = non_blank(text.into());
        self
    }

    /// Render as query-string pairs.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(category) = &self.category {
            pairs.push(("category", category.clone()));
        }
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(size) = self.page_size {
            pairs.push(("page_size", size.to_string()));
        }
        if let Some(featured) = self.is_featured {
            pairs.push(("is_featured", featured.to_string()));
        }
        if let Some(popular) = self.is_popular {
            pairs.push(("is_popular", popular.to_string()));
        }
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        pairs
    }
}

/// Plain pagination for category and blog listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl PageQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page.max(1));
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size.clamp(1, 100));
        self
    }

    /// Render as query-string pairs.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(size) = self.page_size {
            pairs.push(("page_size", size.to_string()));
        }
        pairs
    }
}

fn non_blank(s: String) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_has_no_pairs() {
        assert!(ProductQuery::new().to_pairs().is_empty());
        assert!(PageQuery::new().to_pairs().is_empty());
    }

    #[test]
    fn test_product_query_pairs() {
        let query = ProductQuery::new()
            .with_category("shoes")
            .with_limit(4)
            .featured()
            .with_search("  runner ");

        assert_eq!(
            query.to_pairs(),
            vec![
                ("category", "shoes".to_string()),
                ("page_size", "4".to_string()),
                ("is_featured", "true".to_string()),
                ("search", "runner".to_string()),
            ]
        );
    }

    #[test]
    fn test_blank_filters_ignored() {
        let query = ProductQuery::new().with_category("  ").with_search("");
        assert_eq!(query.category, None);
        assert_eq!(query.search, None);
    }

    #[test]
    fn test_pagination_is_clamped() {
        let query = ProductQuery::new().with_pagination(0, 500);
        assert_eq!(query.page, Some(1));
        assert_eq!(query.page_size, Some(100));

        let pages = PageQuery::new().with_page(2).with_page_size(0);
        assert_eq!(
            pages.to_pairs(),
            vec![("page", "2".to_string()), ("page_size", "1".to_string())]
        );
    }
}
