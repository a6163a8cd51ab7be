//! Menu query builder.

use crate::ids::HotelId;
use serde::{Deserialize, Serialize};

/// Records per listing page. A response with fewer marks the last page.
pub const PAGE_SIZE: i64 = 20;

/// A menu listing query: hotel, filters, and a page counter.
///
/// Category and search are independent UI selections; both default to
/// "everything". The query doubles as the response-cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MenuQuery {
    /// Tenant whose menu is being listed.
    pub hotel: HotelId,
    /// Category filter; `None` means "All".
    pub category: Option<String>,
    /// Free-text search filter; empty means unfiltered.
    pub search: String,
    /// Current page (1-indexed).
    pub page: i64,
}

impl MenuQuery {
    /// Create a query for page 1 of a hotel's full menu.
    pub fn new(hotel: HotelId) -> Self {
        Self {
            hotel,
            category: None,
            search: String::new(),
            page: 1,
        }
    }

    /// Set the category filter. "All" and the empty string clear it.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        let category = category.into();
        self.category = if category.is_empty() || category == "All" {
            None
        } else {
            Some(category)
        };
        self
    }

    /// Set the search filter.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Set the page, clamped to 1 or above.
    pub fn with_page(mut self, page: i64) -> Self {
        self.page = page.max(1);
        self
    }

    /// The same query, one page further.
    pub fn next_page(&self) -> Self {
        self.clone().with_page(self.page + 1)
    }

    /// The same query, reset to page 1.
    pub fn first_page(&self) -> Self {
        self.clone().with_page(1)
    }

    /// Response-cache key: `(category, search, hotel, page)`.
    pub fn cache_key(&self) -> String {
        format!(
            "menu:{}:{}:{}:{}",
            self.category.as_deref().unwrap_or("All"),
            self.search,
            self.hotel,
            self.page
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_defaults() {
        let q = MenuQuery::new(HotelId::new("h1"));
        assert_eq!(q.page, 1);
        assert!(q.category.is_none());
        assert!(q.search.is_empty());
    }

    #[test]
    fn test_all_category_clears_filter() {
        let q = MenuQuery::new(HotelId::new("h1")).with_category("All");
        assert!(q.category.is_none());

        let q = q.with_category("Sweets");
        assert_eq!(q.category.as_deref(), Some("Sweets"));
    }

    #[test]
    fn test_next_page() {
        let q = MenuQuery::new(HotelId::new("h1")).with_page(3);
        assert_eq!(q.next_page().page, 4);
        assert_eq!(q.first_page().page, 1);
    }

    #[test]
    fn test_cache_key_distinguishes_filters() {
        let base = MenuQuery::new(HotelId::new("h1"));
        let by_cat = base.clone().with_category("Sweets");
        let by_search = base.clone().with_search("dosa");
        let by_page = base.clone().with_page(2);

        let keys = [
            base.cache_key(),
            by_cat.cache_key(),
            by_search.cache_key(),
            by_page.cache_key(),
        ];
        for (i, a) in keys.iter().enumerate() {
            for b in keys.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}
