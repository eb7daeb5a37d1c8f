//! Paginated results.

use serde::{Deserialize, Serialize};

/// One page of a listing, as returned by the storefront API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    /// Total number of items across all pages.
    #[serde(default)]
    pub count: u64,
    /// URL of the next page.
    #[serde(default)]
    pub next: Option<String>,
    /// URL of the previous page.
    #[serde(default)]
    pub previous: Option<String>,
    /// The items on this page.
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

impl<T> Page<T> {
    /// Wrap a complete, unpaginated list.
    pub fn single(results: Vec<T>) -> Self {
        Self {
            count: results.len() as u64,
            next: None,
            previous: None,
            results,
        }
    }

    /// Whether there's a next page.
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Whether there's a previous page.
    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Total number of pages for a given page size.
    pub fn total_pages(&self, page_size: u32) -> u64 {
        if self.count == 0 || page_size == 0 {
            return 1;
        }
        self.count.div_ceil(u64::from(page_size))
    }

    /// Transform the items, keeping the paging links.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            count: self.count,
            next: self.next,
            previous: self.previous,
            results: self.results.into_iter().map(f).collect(),
        }
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::single(Vec::new())
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_page_from_api() {
        let page: Page<u32> = serde_json::from_value(json!({
            "count": 45,
            "next": "https://shop.example/api/product/?page=2",
            "previous": null,
            "results": [1, 2, 3]
        }))
        .unwrap();

        assert_eq!(page.len(), 3);
        assert!(page.has_next());
        assert!(!page.has_previous());
        assert_eq!(page.total_pages(20), 3);
    }

    #[test]
    fn test_total_pages_edge_cases() {
        let empty: Page<u32> = Page::default();
        assert_eq!(empty.total_pages(10), 1);

        let exact = Page {
            count: 20,
            ..Page::<u32>::default()
        };
        assert_eq!(exact.total_pages(10), 2);
        assert_eq!(exact.total_pages(0), 1);
    }

    #[test]
    fn test_map_keeps_links() {
        let page = Page {
            count: 2,
            next: Some("n".into()),
            previous: None,
            results: vec![1, 2],
        };
        let mapped = page.map(|n| n * 10);
        assert_eq!(mapped.results, vec![10, 20]);
        assert_eq!(mapped.next.as_deref(), Some("n"));
    }
}
