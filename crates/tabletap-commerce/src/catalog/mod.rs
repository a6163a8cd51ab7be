//! Catalog: food item records and category grouping.

mod item;

pub use item::{group_by_category, sentinel_item, CategoryGroup, FoodItem};
