//! The storefront: owns the state, runs the reducer, executes effects.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::action::{reduce, Action, Effect};
use crate::error::StoreError;
use crate::state::AppState;
use crate::storage::CartStorage;
use tabletap_auth::AuthSession;
use tabletap_commerce::ids::{HotelId, TableNumber, UserId};
use tabletap_commerce::menu::MenuPage;
use tabletap_data::StorefrontApi;

/// Tunables for the listing fetcher.
#[derive(Debug, Clone)]
pub struct ListingPolicy {
    /// Trailing-edge debounce applied to filter-driven refreshes.
    pub debounce: Duration,
}

impl Default for ListingPolicy {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(300),
        }
    }
}

/// The application store for one storefront session.
///
/// Owns the [`AppState`] and the response cache, and executes the
/// effects the reducer emits. All methods take `&mut self`: the UI is
/// single-threaded and event-driven, so no internal locking exists.
pub struct Storefront {
    pub(crate) state: AppState,
    pub(crate) api: Arc<dyn StorefrontApi>,
    pub(crate) storage: CartStorage,
    /// Response cache keyed by `(category, search, hotel, page)`.
    pub(crate) page_cache: HashMap<String, MenuPage>,
    pub(crate) policy: ListingPolicy,
    pub(crate) user: Option<UserId>,
}

impl Storefront {
    /// Create a store for a hotel and table, rehydrating any persisted
    /// cart for the hotel.
    pub fn new(
        api: Arc<dyn StorefrontApi>,
        hotel: HotelId,
        table: TableNumber,
    ) -> Result<Self, StoreError> {
        let storage = CartStorage::open()?;
        let mut state = AppState::new(hotel, table);
        if let Some(cart) = storage.load(&state.hotel)? {
            state.cart = cart;
        }
        Ok(Self {
            state,
            api,
            storage,
            page_cache: HashMap::new(),
            policy: ListingPolicy::default(),
            user: None,
        })
    }

    /// Override the listing policy.
    pub fn with_listing_policy(mut self, policy: ListingPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Attach the logged-in user so placed orders carry their id.
    pub fn with_session(mut self, session: &AuthSession) -> Self {
        self.user = session.user.user_id().cloned();
        self
    }

    /// Read access to the state for rendering.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Run an action through the reducer, persisting the cart when the
    /// action touched it and swapping the persisted cart when the hotel
    /// changed. Returns the effects the caller must execute.
    pub fn dispatch(&mut self, action: Action) -> Result<Vec<Effect>, StoreError> {
        let touches_cart = action.touches_cart();
        let hotel_before = self.state.hotel.clone();

        let effects = reduce(&mut self.state, action)?;

        if touches_cart {
            self.storage.save(&self.state.hotel, &self.state.cart)?;
        }
        if self.state.hotel != hotel_before {
            // The old hotel's cart is already persisted; pick up
            // whatever was stashed for the new one.
            self.state.cart = self.storage.load(&self.state.hotel)?.unwrap_or_default();
        }
        Ok(effects)
    }

    /// Execute effects in order. Fetch failures become notices rather
    /// than errors; prior state stays intact.
    pub async fn run_effects(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            self.run_effect(effect).await;
        }
    }

    /// Dispatch an action and execute everything it demanded.
    pub async fn dispatch_and_run(&mut self, action: Action) -> Result<(), StoreError> {
        let effects = self.dispatch(action)?;
        self.run_effects(effects).await;
        Ok(())
    }
}
