//! Listing page results.

use crate::catalog::FoodItem;
use crate::menu::PAGE_SIZE;
use serde::{Deserialize, Serialize};

/// One page of listing results.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuPage {
    /// The records in this page.
    pub items: Vec<FoodItem>,
    /// Page number (1-indexed).
    pub page: i64,
    /// Whether this is the last page (fewer than `PAGE_SIZE` records).
    pub is_last: bool,
}

impl MenuPage {
    /// Build a page from a server response, deriving the last-page flag.
    pub fn from_items(items: Vec<FoodItem>, page: i64) -> Self {
        let is_last = (items.len() as i64) < PAGE_SIZE;
        Self {
            items,
            page,
            is_last,
        }
    }

    /// An empty terminal page.
    pub fn empty(page: i64) -> Self {
        Self {
            items: Vec::new(),
            page,
            is_last: true,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
