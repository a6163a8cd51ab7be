//! Wire envelopes for the backend REST API.
//!
//! The backend speaks camelCase JSON with decimal prices and tolerates
//! both `_id` and `id` on product records. All conversion between wire
//! shapes and domain types happens here and only here.

use serde::{Deserialize, Serialize};
use tabletap_commerce::cart::{Cart, CartLine, WeightSelection, WeightUnit};
use tabletap_commerce::catalog::FoodItem;
use tabletap_commerce::error::CommerceError;
use tabletap_commerce::ids::{HotelId, OrderId, ProductId, TableNumber, UserId};
use tabletap_commerce::money::{Currency, Money};
use tabletap_commerce::order::{OrderStatus, PendingOrder};

/// `GET /categories/{hotelId}` response.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoriesResponse {
    pub success: bool,
    #[serde(default)]
    pub categories: Vec<String>,
}

/// One product record from `GET /get_food_items`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodItemRecord {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub price: f64,
    #[serde(default, alias = "desc")]
    pub description: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub category: String,
}

impl FoodItemRecord {
    pub fn into_domain(self, currency: Currency) -> FoodItem {
        FoodItem {
            id: ProductId::new(self.id),
            name: self.name,
            price: Money::from_decimal(self.price, currency),
            description: self.description,
            rating: self.rating,
            image_url: self.image_url,
            category: self.category,
        }
    }
}

/// A cart line as it crosses the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineRecord {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub qty: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
}

impl CartLineRecord {
    pub fn from_domain(line: &CartLine) -> Self {
        Self {
            id: line.id.as_str().to_string(),
            name: line.name.clone(),
            price: line.unit_price.to_decimal(),
            qty: line.quantity,
            weight: line.weight.map(|w| w.quantity),
            unit: line.weight.map(|w| w.unit.as_str().to_string()),
            original_price: line.original_price.map(|p| p.to_decimal()),
        }
    }

    pub fn into_domain(self, currency: Currency) -> CartLine {
        let weight = match (self.weight, self.unit.as_deref()) {
            (Some(quantity), Some("kg")) => Some(WeightSelection {
                quantity,
                unit: WeightUnit::Kilograms,
            }),
            (Some(quantity), _) => Some(WeightSelection {
                quantity,
                unit: WeightUnit::Grams,
            }),
            (None, _) => None,
        };
        CartLine {
            id: ProductId::new(self.id),
            name: self.name,
            unit_price: Money::from_decimal(self.price, currency),
            quantity: self.qty,
            weight,
            original_price: self.original_price.map(|p| Money::from_decimal(p, currency)),
        }
    }
}

/// A pending order as it crosses the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingOrderRecord {
    pub order_id: String,
    pub hotel_id: String,
    pub table_number: String,
    #[serde(default)]
    pub cart_items: Vec<CartLineRecord>,
    pub status: OrderStatus,
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
}

impl PendingOrderRecord {
    pub fn into_domain(self, currency: Currency) -> PendingOrder {
        // Older backend records omit the total; derive it from the lines.
        let total = match self.total {
            Some(t) => Money::from_decimal(t, currency),
            None => {
                let sum: f64 = self
                    .cart_items
                    .iter()
                    .map(|l| l.price * l.qty as f64)
                    .sum();
                Money::from_decimal(sum, currency)
            }
        };
        PendingOrder {
            id: OrderId::new(self.order_id),
            hotel_id: HotelId::new(self.hotel_id),
            table_number: TableNumber::new(self.table_number),
            items: self
                .cart_items
                .into_iter()
                .map(|l| l.into_domain(currency))
                .collect(),
            total,
            status: self.status,
            placed_at: self.timestamp,
        }
    }
}

/// `GET /orders/pending/{hotelId}/{tableNumber}` response.
#[derive(Debug, Clone, Deserialize)]
pub struct PendingOrderResponse {
    pub success: bool,
    #[serde(default)]
    pub order: Option<PendingOrderRecord>,
}

/// `POST /orders` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    pub user_id: Option<String>,
    pub hotel_id: String,
    pub cart_items: Vec<CartLineRecord>,
    pub total: f64,
    pub table_number: String,
}

impl PlaceOrderRequest {
    /// Build the request body from the current cart.
    pub fn from_cart(
        user: Option<&UserId>,
        hotel: &HotelId,
        table: &TableNumber,
        cart: &Cart,
    ) -> Result<Self, CommerceError> {
        Ok(Self {
            user_id: user.map(|u| u.as_str().to_string()),
            hotel_id: hotel.as_str().to_string(),
            cart_items: cart.lines().iter().map(CartLineRecord::from_domain).collect(),
            total: cart.subtotal()?.to_decimal(),
            table_number: table.as_str().to_string(),
        })
    }
}

/// `POST /orders` response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderResponse {
    pub order_id: String,
}

/// `PUT /orders/{orderId}/add-items` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppendItemsRequest {
    pub items: Vec<CartLineRecord>,
    pub total: f64,
}

impl AppendItemsRequest {
    /// Build the merge body from the current cart.
    pub fn from_cart(cart: &Cart) -> Result<Self, CommerceError> {
        Ok(Self {
            items: cart.lines().iter().map(CartLineRecord::from_domain).collect(),
            total: cart.subtotal()?.to_decimal(),
        })
    }
}

/// Generic `{ success }` acknowledgement.
#[derive(Debug, Clone, Deserialize)]
pub struct AckResponse {
    pub success: bool,
}

/// `GET /orders/{hotelId}` response (admin board).
#[derive(Debug, Clone, Deserialize)]
pub struct OpenOrdersResponse {
    pub success: bool,
    #[serde(default)]
    pub orders: Vec<PendingOrderRecord>,
}
