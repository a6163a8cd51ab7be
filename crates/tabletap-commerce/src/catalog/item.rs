//! Food item records and category grouping.

use crate::cart::is_weight_priced;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A product record as rendered on menu cards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FoodItem {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Unit price, or the per-100g reference for weight-priced items.
    pub price: Money,
    /// Short description for the card.
    pub description: String,
    /// Average rating, 0.0 to 5.0.
    pub rating: f64,
    /// Card image URL.
    pub image_url: String,
    /// Category this item belongs to.
    pub category: String,
}

impl FoodItem {
    /// Check whether this item is priced per 100g.
    pub fn is_weight_priced(&self) -> bool {
        is_weight_priced(&self.name)
    }
}

/// Items of one category, in listing order.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryGroup {
    pub name: String,
    pub items: Vec<FoodItem>,
}

/// Group items by category, preserving first-seen category order and the
/// item order within each category. This is the display grouping for the
/// menu view.
pub fn group_by_category(items: &[FoodItem]) -> Vec<CategoryGroup> {
    let mut groups: Vec<CategoryGroup> = Vec::new();
    for item in items {
        match groups.iter_mut().find(|g| g.name == item.category) {
            Some(group) => group.items.push(item.clone()),
            None => groups.push(CategoryGroup {
                name: item.category.clone(),
                items: vec![item.clone()],
            }),
        }
    }
    groups
}

/// The infinite-scroll sentinel: the last item of the last category group.
/// When its card becomes visible the next page is requested.
pub fn sentinel_item(groups: &[CategoryGroup]) -> Option<&FoodItem> {
    groups.last().and_then(|g| g.items.last())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn item(id: &str, name: &str, category: &str) -> FoodItem {
        FoodItem {
            id: ProductId::new(id),
            name: name.to_string(),
            price: Money::from_decimal(100.0, Currency::INR),
            description: String::new(),
            rating: 4.2,
            image_url: format!("https://img.example/{id}.jpg"),
            category: category.to_string(),
        }
    }

    #[test]
    fn test_grouping_preserves_first_seen_order() {
        let items = vec![
            item("1", "Dosa", "South Indian"),
            item("2", "Paneer Tikka", "Starters"),
            item("3", "Idli", "South Indian"),
        ];

        let groups = group_by_category(&items);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].name, "South Indian");
        assert_eq!(groups[0].items.len(), 2);
        assert_eq!(groups[1].name, "Starters");
    }

    #[test]
    fn test_sentinel_is_last_item_of_last_group() {
        let items = vec![
            item("1", "Dosa", "South Indian"),
            item("2", "Paneer Tikka", "Starters"),
            item("3", "Malai Kofta", "Starters"),
        ];

        let groups = group_by_category(&items);
        assert_eq!(sentinel_item(&groups).unwrap().id, ProductId::new("3"));
    }

    #[test]
    fn test_sentinel_empty() {
        assert!(sentinel_item(&[]).is_none());
    }

    #[test]
    fn test_weight_priced_flag() {
        assert!(item("9", "Kaju Katli", "Sweets").is_weight_priced());
        assert!(!item("1", "Dosa", "South Indian").is_weight_priced());
    }
}
