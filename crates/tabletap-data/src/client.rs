//! The backend client: the `StorefrontApi` seam and its HTTP implementation.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

use tabletap_commerce::ids::{HotelId, OrderId, TableNumber};
use tabletap_commerce::menu::{MenuPage, MenuQuery};
use tabletap_commerce::money::Currency;
use tabletap_commerce::order::PendingOrder;

use crate::endpoints::Endpoints;
use crate::envelope::{
    AckResponse, AppendItemsRequest, CategoriesResponse, FoodItemRecord, OpenOrdersResponse,
    PendingOrderResponse, PlaceOrderRequest, PlaceOrderResponse,
};
use crate::error::ApiError;
use crate::policy::FetchPolicy;

/// The backend surface the storefront core consumes.
///
/// Orchestration code programs against this trait; tests substitute an
/// in-memory implementation.
#[async_trait]
pub trait StorefrontApi: Send + Sync {
    /// `GET /categories/{hotelId}`
    async fn categories(&self, hotel: &HotelId) -> Result<Vec<String>, ApiError>;

    /// `GET /get_food_items?category&search&hotel_id&page`
    async fn menu_page(&self, query: &MenuQuery) -> Result<MenuPage, ApiError>;

    /// `GET /orders/pending/{hotelId}/{tableNumber}`
    async fn pending_order(
        &self,
        hotel: &HotelId,
        table: &TableNumber,
    ) -> Result<Option<PendingOrder>, ApiError>;

    /// `POST /orders`
    async fn place_order(&self, request: &PlaceOrderRequest) -> Result<OrderId, ApiError>;

    /// `PUT /orders/{orderId}/add-items`
    async fn append_items(
        &self,
        order: &OrderId,
        request: &AppendItemsRequest,
    ) -> Result<(), ApiError>;

    /// `PUT /orders/{orderId}/complete`
    async fn complete_order(&self, order: &OrderId) -> Result<(), ApiError>;

    /// `GET /orders/{hotelId}` (admin board)
    async fn open_orders(&self, hotel: &HotelId) -> Result<Vec<PendingOrder>, ApiError>;
}

/// HTTP implementation of [`StorefrontApi`].
///
/// Uses reqwest natively and Spin's outbound HTTP on wasm32.
pub struct HttpApi {
    endpoints: Endpoints,
    policy: FetchPolicy,
    currency: Currency,
    #[cfg(not(target_arch = "wasm32"))]
    http: reqwest::Client,
}

impl HttpApi {
    /// Create a client over the backend base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        Ok(Self {
            endpoints: Endpoints::new(base_url),
            policy: FetchPolicy::default(),
            currency: Currency::INR,
            #[cfg(not(target_arch = "wasm32"))]
            http: reqwest::Client::builder()
                .build()
                .map_err(|e| ApiError::Request(e.to_string()))?,
        })
    }

    /// Override the fetch policy.
    pub fn with_policy(mut self, policy: FetchPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Override the currency wire prices are interpreted in.
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl HttpApi {
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        timeout: Duration,
    ) -> Result<T, ApiError> {
        debug!(url, "GET");
        let resp = self
            .http
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(ApiError::from_reqwest)?;

        let status = resp.status().as_u16();
        if status >= 400 {
            warn!(url, status, "GET failed");
            return Err(ApiError::Http {
                status,
                url: url.to_string(),
            });
        }
        resp.json::<T>().await.map_err(ApiError::from_reqwest)
    }

    async fn send_json<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        method: reqwest::Method,
        url: &str,
        body: &B,
        timeout: Duration,
    ) -> Result<T, ApiError> {
        debug!(url, %method, "send");
        let resp = self
            .http
            .request(method, url)
            .timeout(timeout)
            .json(body)
            .send()
            .await
            .map_err(ApiError::from_reqwest)?;

        let status = resp.status().as_u16();
        if status >= 400 {
            warn!(url, status, "write failed");
            return Err(ApiError::Http {
                status,
                url: url.to_string(),
            });
        }
        resp.json::<T>().await.map_err(ApiError::from_reqwest)
    }

    async fn post_json<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.send_json(reqwest::Method::POST, url, body, self.policy.write_timeout)
            .await
    }

    async fn put_json<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.send_json(reqwest::Method::PUT, url, body, self.policy.write_timeout)
            .await
    }
}

#[cfg(target_arch = "wasm32")]
impl HttpApi {
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        _timeout: Duration,
    ) -> Result<T, ApiError> {
        let req = spin_sdk::http::Request::get(url);
        let resp: spin_sdk::http::Response = spin_sdk::http::send(req)
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;

        let status = *resp.status();
        if status >= 400 {
            return Err(ApiError::Http {
                status,
                url: url.to_string(),
            });
        }
        serde_json::from_slice(resp.body()).map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    async fn send_json<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        method: spin_sdk::http::Method,
        url: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let bytes = serde_json::to_vec(body).map_err(|e| ApiError::Request(e.to_string()))?;
        let req = spin_sdk::http::Request::builder()
            .method(method)
            .uri(url)
            .header("content-type", "application/json")
            .body(bytes)
            .build();
        let resp: spin_sdk::http::Response = spin_sdk::http::send(req)
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;

        let status = *resp.status();
        if status >= 400 {
            return Err(ApiError::Http {
                status,
                url: url.to_string(),
            });
        }
        serde_json::from_slice(resp.body()).map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    async fn post_json<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.send_json(spin_sdk::http::Method::Post, url, body).await
    }

    async fn put_json<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.send_json(spin_sdk::http::Method::Put, url, body).await
    }
}

#[async_trait]
impl StorefrontApi for HttpApi {
    async fn categories(&self, hotel: &HotelId) -> Result<Vec<String>, ApiError> {
        let url = self.endpoints.categories(hotel);
        let resp: CategoriesResponse = self.get_json(&url, self.policy.read_timeout).await?;
        Ok(resp.categories)
    }

    async fn menu_page(&self, query: &MenuQuery) -> Result<MenuPage, ApiError> {
        let url = self.endpoints.food_items(query);
        let records: Vec<FoodItemRecord> = self.get_json(&url, self.policy.read_timeout).await?;
        let items = records
            .into_iter()
            .map(|r| r.into_domain(self.currency))
            .collect();
        Ok(MenuPage::from_items(items, query.page))
    }

    async fn pending_order(
        &self,
        hotel: &HotelId,
        table: &TableNumber,
    ) -> Result<Option<PendingOrder>, ApiError> {
        let url = self.endpoints.pending_order(hotel, table);
        let resp: PendingOrderResponse = self.get_json(&url, self.policy.read_timeout).await?;
        if !resp.success {
            // The backend reports "no pending order" as an unsuccessful
            // lookup; the checkout path treats it as absence.
            return Ok(None);
        }
        Ok(resp.order.map(|o| o.into_domain(self.currency)))
    }

    async fn place_order(&self, request: &PlaceOrderRequest) -> Result<OrderId, ApiError> {
        let url = self.endpoints.place_order();
        let resp: PlaceOrderResponse = self.post_json(&url, request).await?;
        Ok(OrderId::new(resp.order_id))
    }

    async fn append_items(
        &self,
        order: &OrderId,
        request: &AppendItemsRequest,
    ) -> Result<(), ApiError> {
        let url = self.endpoints.add_items(order);
        let resp: AckResponse = self.put_json(&url, request).await?;
        if !resp.success {
            return Err(ApiError::Request(format!(
                "backend rejected add-items for order {order}"
            )));
        }
        Ok(())
    }

    async fn complete_order(&self, order: &OrderId) -> Result<(), ApiError> {
        let url = self.endpoints.complete_order(order);
        let resp: AckResponse = self.put_json(&url, &serde_json::json!({})).await?;
        if !resp.success {
            return Err(ApiError::Request(format!(
                "backend rejected completion for order {order}"
            )));
        }
        Ok(())
    }

    async fn open_orders(&self, hotel: &HotelId) -> Result<Vec<PendingOrder>, ApiError> {
        let url = self.endpoints.open_orders(hotel);
        let resp: OpenOrdersResponse = self.get_json(&url, self.policy.read_timeout).await?;
        Ok(resp
            .orders
            .into_iter()
            .map(|o| o.into_domain(self.currency))
            .collect())
    }
}
