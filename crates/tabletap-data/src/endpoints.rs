//! URL builders for the backend routes.

use tabletap_commerce::ids::{HotelId, OrderId, TableNumber};
use tabletap_commerce::menu::MenuQuery;

/// Builder over the backend base URL.
#[derive(Debug, Clone)]
pub struct Endpoints {
    base: String,
}

impl Endpoints {
    /// Create a builder, normalizing away a trailing slash.
    pub fn new(base: impl Into<String>) -> Self {
        let mut base = base.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self { base }
    }

    /// `GET /categories/{hotelId}`
    pub fn categories(&self, hotel: &HotelId) -> String {
        format!("{}/categories/{}", self.base, hotel)
    }

    /// `GET /get_food_items?category&search&hotel_id&page`
    pub fn food_items(&self, query: &MenuQuery) -> String {
        format!(
            "{}/get_food_items?category={}&search={}&hotel_id={}&page={}",
            self.base,
            encode(query.category.as_deref().unwrap_or("All")),
            encode(&query.search),
            encode(query.hotel.as_str()),
            query.page
        )
    }

    /// `GET /orders/pending/{hotelId}/{tableNumber}`
    pub fn pending_order(&self, hotel: &HotelId, table: &TableNumber) -> String {
        format!("{}/orders/pending/{}/{}", self.base, hotel, table)
    }

    /// `POST /orders`
    pub fn place_order(&self) -> String {
        format!("{}/orders", self.base)
    }

    /// `PUT /orders/{orderId}/add-items`
    pub fn add_items(&self, order: &OrderId) -> String {
        format!("{}/orders/{}/add-items", self.base, order)
    }

    /// `PUT /orders/{orderId}/complete`
    pub fn complete_order(&self, order: &OrderId) -> String {
        format!("{}/orders/{}/complete", self.base, order)
    }

    /// `GET /orders/{hotelId}` (admin board listing)
    pub fn open_orders(&self, hotel: &HotelId) -> String {
        format!("{}/orders/{}", self.base, hotel)
    }
}

/// Percent-encode a query value. Unreserved characters pass through.
fn encode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}
