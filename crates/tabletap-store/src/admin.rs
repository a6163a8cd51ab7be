//! The admin order board.
//!
//! Staff see the hotel's open orders, mark them completed, and get a
//! fixed-interval auto-refresh while the view is open. The poller is
//! torn down when the board closes; leaving it running after the view
//! unmounts would leak timers.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::warn;

use crate::error::StoreError;
use crate::poll::Poller;
use tabletap_commerce::ids::{HotelId, OrderId};
use tabletap_commerce::order::PendingOrder;
use tabletap_data::StorefrontApi;

/// Auto-refresh cadence for the order board.
pub const ORDER_REFRESH_PERIOD: Duration = Duration::from_secs(10);
/// Auto-refresh cadence for the table watch.
pub const TABLE_REFRESH_PERIOD: Duration = Duration::from_secs(3);

/// The admin back-office order board for one hotel.
pub struct AdminBoard {
    api: Arc<dyn StorefrontApi>,
    hotel: HotelId,
    orders: Vec<PendingOrder>,
    poller: Option<Poller>,
    updates_tx: mpsc::UnboundedSender<Vec<PendingOrder>>,
    updates_rx: mpsc::UnboundedReceiver<Vec<PendingOrder>>,
}

impl AdminBoard {
    pub fn new(api: Arc<dyn StorefrontApi>, hotel: HotelId) -> Self {
        let (updates_tx, updates_rx) = mpsc::unbounded_channel();
        Self {
            api,
            hotel,
            orders: Vec::new(),
            poller: None,
            updates_tx,
            updates_rx,
        }
    }

    /// The orders as last loaded.
    pub fn orders(&self) -> &[PendingOrder] {
        &self.orders
    }

    /// Load the hotel's open orders.
    pub async fn refresh(&mut self) -> Result<(), StoreError> {
        self.orders = self.api.open_orders(&self.hotel).await?;
        Ok(())
    }

    /// Mark an order completed, then reload the board. A failed write
    /// surfaces as an error with no local state change.
    pub async fn complete(&mut self, order: &OrderId) -> Result<(), StoreError> {
        self.api.complete_order(order).await?;
        self.refresh().await
    }

    /// Start auto-refreshing on a fixed interval. Results arrive on an
    /// internal channel; call [`AdminBoard::apply_updates`] from the
    /// render loop to fold them in.
    pub fn start_auto_refresh(&mut self, period: Duration) {
        let api = self.api.clone();
        let hotel = self.hotel.clone();
        let tx = self.updates_tx.clone();

        self.poller = Some(Poller::spawn(period, move || {
            let api = api.clone();
            let hotel = hotel.clone();
            let tx = tx.clone();
            async move {
                match api.open_orders(&hotel).await {
                    Ok(orders) => {
                        let _ = tx.send(orders);
                    }
                    // Auto-refresh failures are silent; the next tick
                    // retries and manual refresh still works.
                    Err(e) => warn!(error = %e, "order auto-refresh failed"),
                }
            }
        }));
    }

    /// Fold in any auto-refresh results that have arrived.
    pub fn apply_updates(&mut self) {
        while let Ok(orders) = self.updates_rx.try_recv() {
            self.orders = orders;
        }
    }

    /// Whether the auto-refresh poller is running.
    pub fn is_auto_refreshing(&self) -> bool {
        self.poller.as_ref().map(|p| !p.is_closed()).unwrap_or(false)
    }

    /// Tear down the view: stops the poller.
    pub fn close(&mut self) {
        if let Some(poller) = self.poller.take() {
            poller.close();
        }
    }
}

impl Drop for AdminBoard {
    fn drop(&mut self) {
        self.close();
    }
}
