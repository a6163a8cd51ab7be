//! Checkout orchestration.
//!
//! Converts the current cart into a placed order, reconciling with any
//! already-open order for the same table: merge-append when one exists,
//! create otherwise. The cart is cleared only when the user explicitly
//! returns to the menu from the confirmation view.

use tracing::{info, warn};

use crate::error::StoreError;
use crate::notice::Notice;
use crate::state::CheckoutState;
use crate::store::Storefront;
use tabletap_commerce::ids::OrderId;
use tabletap_commerce::order::CheckoutOutcome;
use tabletap_data::envelope::{AppendItemsRequest, PlaceOrderRequest};

impl Storefront {
    /// Submit the cart as an order for this table.
    ///
    /// Refuses to start while another submission is in flight; the
    /// triggering control stays disabled via
    /// [`CheckoutState::is_submitting`]. On any network failure the cart
    /// is left untouched, a blocking alert is raised, and the error is
    /// returned so the caller can re-enable retry.
    pub async fn submit_order(&mut self) -> Result<(), StoreError> {
        if self.state.checkout.is_submitting() {
            return Err(StoreError::CheckoutInFlight);
        }
        if self.state.cart.is_empty() {
            return Err(StoreError::EmptyCart);
        }

        // Snapshot what the confirmation view will display before any
        // network round-trip.
        let items = self.state.cart.lines().to_vec();
        let total = self.state.cart.subtotal()?;

        self.state.checkout = CheckoutState::Submitting;
        match self.reconcile().await {
            Ok((order_id, outcome)) => {
                info!(order = %order_id, outcome = outcome.as_str(), "order placed");
                self.state.checkout = CheckoutState::Confirmed {
                    order_id,
                    outcome,
                    items,
                    total,
                };
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "checkout failed");
                self.state.checkout = CheckoutState::Idle;
                self.state.notices.push(Notice::Alert(
                    "Could not place your order. Please try again.".to_string(),
                ));
                Err(e)
            }
        }
    }

    /// Look up the table's pending order and either merge the cart into
    /// it or create a new one.
    async fn reconcile(&self) -> Result<(OrderId, CheckoutOutcome), StoreError> {
        let pending = self
            .api
            .pending_order(&self.state.hotel, &self.state.table)
            .await?;

        match pending {
            Some(order) if order.is_open() => {
                let request = AppendItemsRequest::from_cart(&self.state.cart)?;
                self.api.append_items(&order.id, &request).await?;
                Ok((order.id, CheckoutOutcome::Merged))
            }
            _ => {
                let request = PlaceOrderRequest::from_cart(
                    self.user.as_ref(),
                    &self.state.hotel,
                    &self.state.table,
                    &self.state.cart,
                )?;
                let order_id = self.api.place_order(&request).await?;
                Ok((order_id, CheckoutOutcome::Created))
            }
        }
    }

    /// Leave the confirmation view. Only here is the cart cleared, so
    /// the confirmation could still display what was ordered.
    pub fn back_to_menu(&mut self) -> Result<(), StoreError> {
        if self.state.checkout.is_confirmed() {
            self.state.cart.clear();
            self.storage.clear(&self.state.hotel)?;
            self.state.checkout = CheckoutState::Idle;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::FakeApi;
    use std::sync::Arc;
    use tabletap_commerce::cart::CartLine;
    use tabletap_commerce::catalog::FoodItem;
    use tabletap_commerce::ids::{HotelId, ProductId, TableNumber};
    use tabletap_commerce::money::{Currency, Money};
    use tabletap_commerce::order::{OrderStatus, PendingOrder};

    fn storefront(api: Arc<FakeApi>) -> Storefront {
        Storefront::new(api, HotelId::new("h1"), TableNumber::new("5")).unwrap()
    }

    fn add_dosa(store: &mut Storefront, qty: i64) {
        store
            .dispatch(crate::Action::AddItem {
                item: FoodItem {
                    id: ProductId::new("p1"),
                    name: "Dosa".to_string(),
                    price: Money::from_decimal(50.0, Currency::INR),
                    description: String::new(),
                    rating: 4.0,
                    image_url: String::new(),
                    category: "Mains".to_string(),
                },
                quantity: qty,
            })
            .unwrap();
    }

    fn open_order(id: &str) -> PendingOrder {
        PendingOrder {
            id: tabletap_commerce::ids::OrderId::new(id),
            hotel_id: HotelId::new("h1"),
            table_number: TableNumber::new("5"),
            items: vec![CartLine {
                id: ProductId::new("p0"),
                name: "Idli".to_string(),
                unit_price: Money::from_decimal(40.0, Currency::INR),
                quantity: 1,
                weight: None,
                original_price: None,
            }],
            total: Money::from_decimal(40.0, Currency::INR),
            status: OrderStatus::Pending,
            placed_at: 1_700_000_000,
        }
    }

    #[tokio::test]
    async fn test_create_when_no_pending_order() {
        // Cart [{p1, qty 2, 50}] on table "5" with no pending order:
        // POST body carries total 100, the response id confirms, and the
        // cart survives until back_to_menu.
        let api = Arc::new(FakeApi::new());
        let mut store = storefront(api.clone());
        add_dosa(&mut store, 2);

        store.submit_order().await.unwrap();

        let placed = api.placed.lock().unwrap();
        assert_eq!(placed.len(), 1);
        assert_eq!(placed[0].total, 100.0);
        assert_eq!(placed[0].table_number, "5");
        drop(placed);

        match &store.state().checkout {
            CheckoutState::Confirmed {
                order_id, outcome, ..
            } => {
                assert_eq!(order_id.as_str(), "O-1");
                assert_eq!(*outcome, CheckoutOutcome::Created);
            }
            other => panic!("expected confirmation, got {other:?}"),
        }

        // Cleared only after the explicit return to the menu.
        assert_eq!(store.state().cart.item_count(), 2);
        store.back_to_menu().unwrap();
        assert!(store.state().cart.is_empty());
        assert_eq!(store.state().checkout, CheckoutState::Idle);
    }

    #[tokio::test]
    async fn test_merge_into_existing_pending_order() {
        let api = Arc::new(FakeApi::new().with_pending(open_order("O-7")));
        let mut store = storefront(api.clone());
        add_dosa(&mut store, 1);

        store.submit_order().await.unwrap();

        // Merged, and no second order id was created for the table.
        assert!(api.placed.lock().unwrap().is_empty());
        let appended = api.appended.lock().unwrap();
        assert_eq!(appended.len(), 1);
        assert_eq!(appended[0].0.as_str(), "O-7");
        assert_eq!(appended[0].1.total, 50.0);
        drop(appended);

        match &store.state().checkout {
            CheckoutState::Confirmed {
                order_id, outcome, ..
            } => {
                assert_eq!(order_id.as_str(), "O-7");
                assert_eq!(*outcome, CheckoutOutcome::Merged);
            }
            other => panic!("expected merge confirmation, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_completed_pending_order_gets_fresh_one() {
        let mut completed = open_order("O-7");
        completed.status = OrderStatus::Completed;
        let api = Arc::new(FakeApi::new().with_pending(completed));
        let mut store = storefront(api.clone());
        add_dosa(&mut store, 1);

        store.submit_order().await.unwrap();
        assert_eq!(api.placed.lock().unwrap().len(), 1);
        assert!(api.appended.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failure_leaves_cart_and_alerts() {
        let api = Arc::new(FakeApi::new());
        api.fail_writes.store(true, std::sync::atomic::Ordering::SeqCst);
        let mut store = storefront(api);
        add_dosa(&mut store, 2);

        let result = store.submit_order().await;
        assert!(result.is_err());

        // Cart untouched so the user may retry; the alert blocks.
        assert_eq!(store.state().cart.item_count(), 2);
        assert_eq!(store.state().checkout, CheckoutState::Idle);
        assert!(store.state().notices.last().unwrap().is_blocking());
    }

    #[tokio::test]
    async fn test_second_submit_refused_while_in_flight() {
        let api = Arc::new(FakeApi::new());
        let mut store = storefront(api);
        add_dosa(&mut store, 1);

        store.state.checkout = CheckoutState::Submitting;
        assert!(!store.state().can_submit());
        assert!(matches!(
            store.submit_order().await,
            Err(StoreError::CheckoutInFlight)
        ));
    }

    #[tokio::test]
    async fn test_empty_cart_refused() {
        let api = Arc::new(FakeApi::new());
        let mut store = storefront(api);
        assert!(matches!(
            store.submit_order().await,
            Err(StoreError::EmptyCart)
        ));
    }

    #[tokio::test]
    async fn test_back_to_menu_without_confirmation_is_noop() {
        let api = Arc::new(FakeApi::new());
        let mut store = storefront(api);
        add_dosa(&mut store, 1);

        store.back_to_menu().unwrap();
        assert_eq!(store.state().cart.item_count(), 1);
    }
}
