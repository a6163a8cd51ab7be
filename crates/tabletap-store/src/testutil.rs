//! In-memory `StorefrontApi` used by the orchestration tests.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Mutex;

use tabletap_commerce::catalog::FoodItem;
use tabletap_commerce::ids::{HotelId, OrderId, ProductId, TableNumber};
use tabletap_commerce::menu::{MenuPage, MenuQuery};
use tabletap_commerce::money::{Currency, Money};
use tabletap_commerce::order::PendingOrder;
use tabletap_data::envelope::{AppendItemsRequest, PlaceOrderRequest};
use tabletap_data::{ApiError, StorefrontApi};

/// Scripted backend: page sizes are configured up front, failures are
/// toggled per direction, and every write is recorded for assertions.
pub(crate) struct FakeApi {
    pub menu_requests: AtomicU32,
    pub category_requests: AtomicU32,
    pub open_order_requests: AtomicU32,
    pub fail_reads: AtomicBool,
    pub fail_writes: AtomicBool,
    pub pending: Mutex<Option<PendingOrder>>,
    pub placed: Mutex<Vec<PlaceOrderRequest>>,
    pub appended: Mutex<Vec<(OrderId, AppendItemsRequest)>>,
    pub completed: Mutex<Vec<OrderId>>,
    pub open: Mutex<Vec<PendingOrder>>,
    pub next_order_id: String,
    pages: Vec<usize>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            menu_requests: AtomicU32::new(0),
            category_requests: AtomicU32::new(0),
            open_order_requests: AtomicU32::new(0),
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
            pending: Mutex::new(None),
            placed: Mutex::new(Vec::new()),
            appended: Mutex::new(Vec::new()),
            completed: Mutex::new(Vec::new()),
            open: Mutex::new(Vec::new()),
            next_order_id: "O-1".to_string(),
            pages: vec![],
        }
    }

    /// Configure the record count served for each page.
    pub fn with_pages(mut self, pages: Vec<usize>) -> Self {
        self.pages = pages;
        self
    }

    pub fn with_pending(self, order: PendingOrder) -> Self {
        *self.pending.lock().unwrap() = Some(order);
        self
    }

    pub fn with_open(self, orders: Vec<PendingOrder>) -> Self {
        *self.open.lock().unwrap() = orders;
        self
    }

    fn read_guard(&self) -> Result<(), ApiError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(ApiError::Timeout("request budget exhausted".to_string()));
        }
        Ok(())
    }

    fn write_guard(&self) -> Result<(), ApiError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(ApiError::Connection("connection reset".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl StorefrontApi for FakeApi {
    async fn categories(&self, _hotel: &HotelId) -> Result<Vec<String>, ApiError> {
        self.category_requests.fetch_add(1, Ordering::SeqCst);
        self.read_guard()?;
        Ok(vec!["South Indian".to_string(), "Sweets".to_string()])
    }

    async fn menu_page(&self, query: &MenuQuery) -> Result<MenuPage, ApiError> {
        self.menu_requests.fetch_add(1, Ordering::SeqCst);
        self.read_guard()?;

        let count = self
            .pages
            .get((query.page - 1) as usize)
            .copied()
            .unwrap_or(0);
        let items = (0..count)
            .map(|i| FoodItem {
                id: ProductId::new(format!("p{}-{}", query.page, i)),
                name: format!("Item {}-{}", query.page, i),
                price: Money::from_decimal(50.0, Currency::INR),
                description: String::new(),
                rating: 4.0,
                image_url: String::new(),
                category: "Mains".to_string(),
            })
            .collect();
        Ok(MenuPage::from_items(items, query.page))
    }

    async fn pending_order(
        &self,
        _hotel: &HotelId,
        _table: &TableNumber,
    ) -> Result<Option<PendingOrder>, ApiError> {
        self.read_guard()?;
        Ok(self.pending.lock().unwrap().clone())
    }

    async fn place_order(&self, request: &PlaceOrderRequest) -> Result<OrderId, ApiError> {
        self.write_guard()?;
        self.placed.lock().unwrap().push(request.clone());
        Ok(OrderId::new(self.next_order_id.clone()))
    }

    async fn append_items(
        &self,
        order: &OrderId,
        request: &AppendItemsRequest,
    ) -> Result<(), ApiError> {
        self.write_guard()?;
        self.appended
            .lock()
            .unwrap()
            .push((order.clone(), request.clone()));
        Ok(())
    }

    async fn complete_order(&self, order: &OrderId) -> Result<(), ApiError> {
        self.write_guard()?;
        self.completed.lock().unwrap().push(order.clone());
        self.open
            .lock()
            .unwrap()
            .retain(|o| &o.id != order);
        Ok(())
    }

    async fn open_orders(&self, _hotel: &HotelId) -> Result<Vec<PendingOrder>, ApiError> {
        self.open_order_requests.fetch_add(1, Ordering::SeqCst);
        self.read_guard()?;
        Ok(self.open.lock().unwrap().clone())
    }
}
