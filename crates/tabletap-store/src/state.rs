//! The explicit application state.
//!
//! One struct owns everything the views render. It is mutated only by
//! the reducer in [`crate::action`] and by the effect handlers on
//! [`crate::Storefront`]; nothing else holds shared mutable state.

use crate::notice::Notice;
use tabletap_commerce::cart::{Cart, CartLine};
use tabletap_commerce::catalog::{group_by_category, CategoryGroup, FoodItem};
use tabletap_commerce::ids::{HotelId, OrderId, TableNumber};
use tabletap_commerce::menu::MenuQuery;
use tabletap_commerce::money::Money;
use tabletap_commerce::order::CheckoutOutcome;

/// The two independent UI selections that parameterize the listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    /// Category filter; `None` means "All".
    pub category: Option<String>,
    /// Free-text search filter.
    pub search: String,
}

impl FilterState {
    /// Build the listing query for a page under the current filters.
    pub fn to_query(&self, hotel: &HotelId, page: i64) -> MenuQuery {
        let mut query = MenuQuery::new(hotel.clone())
            .with_search(self.search.clone())
            .with_page(page);
        if let Some(category) = &self.category {
            query = query.with_category(category.clone());
        }
        query
    }
}

/// Listing state: the pages loaded so far and the fetch guards.
#[derive(Debug, Clone)]
pub struct ListingState {
    /// All records loaded so far, in page order.
    pub items: Vec<FoodItem>,
    /// Last loaded page; 0 when nothing is loaded.
    pub page: i64,
    /// Whether more pages are known to exist.
    pub has_more: bool,
    /// Whether a fetch is in flight; page advances are suppressed while set.
    pub in_flight: bool,
    /// Bumped on every filter or hotel change. Effects carry the
    /// generation they were issued under; stale ones are discarded.
    pub generation: u64,
}

impl ListingState {
    /// Reset to an empty page-1 listing, keeping the generation.
    pub fn reset(&mut self) {
        self.items.clear();
        self.page = 0;
        self.has_more = true;
        self.in_flight = false;
    }

    /// The display grouping, derived on demand.
    pub fn groups(&self) -> Vec<CategoryGroup> {
        group_by_category(&self.items)
    }
}

impl Default for ListingState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            page: 0,
            has_more: true,
            in_flight: false,
            generation: 0,
        }
    }
}

/// Where the checkout flow currently stands.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CheckoutState {
    /// No checkout underway.
    #[default]
    Idle,
    /// A checkout is in flight; the submit control is disabled.
    Submitting,
    /// The order went through. The cart is not cleared until the user
    /// explicitly returns to the menu, so the confirmation view can
    /// still display what was ordered.
    Confirmed {
        order_id: OrderId,
        outcome: CheckoutOutcome,
        items: Vec<CartLine>,
        total: Money,
    },
}

impl CheckoutState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, CheckoutState::Submitting)
    }

    pub fn is_confirmed(&self) -> bool {
        matches!(self, CheckoutState::Confirmed { .. })
    }
}

/// The whole application state for one storefront session.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Tenant whose menu is being browsed (a route parameter).
    pub hotel: HotelId,
    /// Table the session is ordering for (a route parameter).
    pub table: TableNumber,
    /// The shopping cart.
    pub cart: Cart,
    /// Listing filters.
    pub filters: FilterState,
    /// Categories available for the hotel.
    pub categories: Vec<String>,
    /// Listing state.
    pub listing: ListingState,
    /// Checkout state.
    pub checkout: CheckoutState,
    /// Pending user-visible notices.
    pub notices: Vec<Notice>,
}

impl AppState {
    /// Fresh state for a hotel and table.
    pub fn new(hotel: HotelId, table: TableNumber) -> Self {
        Self {
            hotel,
            table,
            cart: Cart::default(),
            filters: FilterState::default(),
            categories: Vec::new(),
            listing: ListingState::default(),
            checkout: CheckoutState::default(),
            notices: Vec::new(),
        }
    }

    /// Whether the submit control should be enabled.
    pub fn can_submit(&self) -> bool {
        !self.cart.is_empty() && !self.checkout.is_submitting()
    }
}
