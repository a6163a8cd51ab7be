//! Actions and the reducer.
//!
//! Every state mutation routes through [`reduce`]. Transitions that
//! demand I/O return [`Effect`]s; each listing effect carries the
//! generation it was issued under so that superseded work is discarded
//! instead of corrupting newer state.

use crate::error::StoreError;
use crate::state::AppState;
use tabletap_commerce::cart::WeightSelection;
use tabletap_commerce::catalog::FoodItem;
use tabletap_commerce::ids::{HotelId, ProductId};

/// Everything the views can ask the store to do synchronously.
#[derive(Debug, Clone)]
pub enum Action {
    /// The menu view mounted; load categories and the first page.
    MenuOpened,
    /// The hotel route parameter changed.
    SetHotel(HotelId),
    /// The category filter changed. "All" or empty clears it.
    SetCategory(String),
    /// The search filter changed (one action per keystroke).
    SetSearch(String),
    /// The infinite-scroll sentinel became visible.
    SentinelVisible,

    /// Add a unit-priced item to the cart.
    AddItem { item: FoodItem, quantity: i64 },
    /// Add a weight-priced item with a resolved selection.
    AddWeighed {
        item: FoodItem,
        selection: WeightSelection,
        quantity: i64,
    },
    /// Remove a line entirely.
    RemoveItem(ProductId),
    /// Increase a line's quantity by one.
    Increment(ProductId),
    /// Decrease a line's quantity by one; a line at 1 is removed.
    Decrement(ProductId),
    /// Empty the cart.
    ClearCart,

    /// Dismiss a notice by index.
    DismissNotice(usize),
}

impl Action {
    /// Whether this action mutates the cart (and so requires the
    /// persisted copy to be rewritten).
    pub fn touches_cart(&self) -> bool {
        matches!(
            self,
            Action::AddItem { .. }
                | Action::AddWeighed { .. }
                | Action::RemoveItem(_)
                | Action::Increment(_)
                | Action::Decrement(_)
                | Action::ClearCart
        )
    }
}

/// Follow-up work a transition demands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Debounce, then fetch page 1 under the current filters. Issued on
    /// every filter or hotel change; only the effect whose generation is
    /// still current actually fetches.
    RefreshListing { generation: u64 },
    /// Fetch the next page immediately (no debounce).
    LoadNextPage { generation: u64 },
    /// Fetch the hotel's categories.
    LoadCategories,
}

/// Apply an action to the state, returning the effects it demands.
pub fn reduce(state: &mut AppState, action: Action) -> Result<Vec<Effect>, StoreError> {
    match action {
        Action::MenuOpened => {
            state.listing.generation += 1;
            state.listing.reset();
            Ok(vec![
                Effect::LoadCategories,
                Effect::RefreshListing {
                    generation: state.listing.generation,
                },
            ])
        }

        Action::SetHotel(hotel) => {
            if hotel == state.hotel {
                return Ok(Vec::new());
            }
            state.hotel = hotel;
            state.categories.clear();
            state.filters = Default::default();
            state.listing.generation += 1;
            state.listing.reset();
            Ok(vec![
                Effect::LoadCategories,
                Effect::RefreshListing {
                    generation: state.listing.generation,
                },
            ])
        }

        Action::SetCategory(category) => {
            state.filters.category = if category.is_empty() || category == "All" {
                None
            } else {
                Some(category)
            };
            state.listing.generation += 1;
            state.listing.reset();
            Ok(vec![Effect::RefreshListing {
                generation: state.listing.generation,
            }])
        }

        Action::SetSearch(search) => {
            state.filters.search = search;
            state.listing.generation += 1;
            state.listing.reset();
            Ok(vec![Effect::RefreshListing {
                generation: state.listing.generation,
            }])
        }

        Action::SentinelVisible => {
            // Suppressed while a fetch is in flight or when the last
            // page has been seen.
            if state.listing.in_flight || !state.listing.has_more {
                return Ok(Vec::new());
            }
            Ok(vec![Effect::LoadNextPage {
                generation: state.listing.generation,
            }])
        }

        Action::AddItem { item, quantity } => {
            state
                .cart
                .add_item(item.id, item.name, item.price, quantity)?;
            Ok(Vec::new())
        }

        Action::AddWeighed {
            item,
            selection,
            quantity,
        } => {
            state
                .cart
                .add_weighed(item.id, item.name, item.price, selection, quantity)?;
            Ok(Vec::new())
        }

        Action::RemoveItem(id) => {
            state.cart.remove_item(&id);
            Ok(Vec::new())
        }

        Action::Increment(id) => {
            state.cart.increment(&id)?;
            Ok(Vec::new())
        }

        Action::Decrement(id) => {
            state.cart.decrement(&id);
            Ok(Vec::new())
        }

        Action::ClearCart => {
            state.cart.clear();
            Ok(Vec::new())
        }

        Action::DismissNotice(index) => {
            if index < state.notices.len() {
                state.notices.remove(index);
            }
            Ok(Vec::new())
        }
    }
}
