//! Listing effect handlers: debounced refresh, cached pages, infinite
//! scroll.

use tokio::time::sleep;
use tracing::{debug, warn};

use crate::action::Effect;
use crate::notice::Notice;
use crate::store::Storefront;
use tabletap_commerce::menu::{MenuPage, MenuQuery};

impl Storefront {
    /// Execute one effect. Handlers are idempotent and check the listing
    /// generation around every await, so superseded work is discarded
    /// instead of corrupting newer state.
    pub async fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::RefreshListing { generation } => {
                sleep(self.policy.debounce).await;
                if generation != self.state.listing.generation {
                    debug!(generation, "refresh superseded during debounce");
                    return;
                }
                let query = self.state.filters.to_query(&self.state.hotel, 1);
                self.load_page(query, generation).await;
            }

            Effect::LoadNextPage { generation } => {
                if generation != self.state.listing.generation {
                    debug!(generation, "page advance superseded");
                    return;
                }
                if self.state.listing.in_flight || !self.state.listing.has_more {
                    return;
                }
                let query = self
                    .state
                    .filters
                    .to_query(&self.state.hotel, self.state.listing.page + 1);
                self.load_page(query, generation).await;
            }

            Effect::LoadCategories => self.load_categories().await,
        }
    }

    async fn load_page(&mut self, query: MenuQuery, generation: u64) {
        let key = query.cache_key();

        // Page 1 is served from the response cache without a round-trip.
        if query.page == 1 {
            if let Some(page) = self.page_cache.get(&key) {
                debug!(%key, "listing cache hit");
                let page = page.clone();
                self.apply_page(page);
                return;
            }
        }

        self.state.listing.in_flight = true;
        let result = self.api.menu_page(&query).await;
        self.state.listing.in_flight = false;

        if generation != self.state.listing.generation {
            debug!(generation, "stale page discarded");
            return;
        }

        match result {
            Ok(page) => {
                debug!(page = page.page, count = page.len(), "listing page loaded");
                self.page_cache.insert(key, page.clone());
                self.apply_page(page);
            }
            Err(e) => {
                // Failed pages are never merged; prior state stays intact.
                warn!(error = %e, page = query.page, "menu fetch failed");
                self.state.notices.push(Notice::Toast(
                    "Could not load the menu. Please try again.".to_string(),
                ));
            }
        }
    }

    fn apply_page(&mut self, page: MenuPage) {
        if page.page <= 1 {
            self.state.listing.items = page.items;
        } else {
            self.state.listing.items.extend(page.items);
        }
        self.state.listing.page = page.page;
        self.state.listing.has_more = !page.is_last;
    }

    async fn load_categories(&mut self) {
        match self.api.categories(&self.state.hotel).await {
            Ok(categories) => self.state.categories = categories,
            Err(e) => {
                warn!(error = %e, "category fetch failed");
                self.state.notices.push(Notice::Toast(
                    "Could not load categories. Please try again.".to_string(),
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::action::Action;
    use crate::notice::Notice;
    use crate::store::Storefront;
    use crate::testutil::FakeApi;
    use std::sync::atomic::Ordering;
    use std::sync::Arc;
    use tabletap_commerce::ids::{HotelId, TableNumber};
    use tabletap_commerce::menu::PAGE_SIZE;

    fn storefront(api: Arc<FakeApi>) -> Storefront {
        Storefront::new(api, HotelId::new("h1"), TableNumber::new("5")).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_menu_open_loads_categories_and_first_page() {
        let api = Arc::new(FakeApi::new().with_pages(vec![PAGE_SIZE as usize, 4]));
        let mut store = storefront(api.clone());

        store.dispatch_and_run(Action::MenuOpened).await.unwrap();

        assert_eq!(store.state().categories, vec!["South Indian", "Sweets"]);
        assert_eq!(store.state().listing.items.len(), PAGE_SIZE as usize);
        assert!(store.state().listing.has_more);
        assert_eq!(api.menu_requests.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_three_keystrokes_one_request() {
        let api = Arc::new(FakeApi::new().with_pages(vec![5]));
        let mut store = storefront(api.clone());

        // Three keystrokes within the debounce window: the first two
        // refresh effects wake up stale and are discarded.
        let mut effects = Vec::new();
        effects.extend(store.dispatch(Action::SetSearch("d".into())).unwrap());
        effects.extend(store.dispatch(Action::SetSearch("do".into())).unwrap());
        effects.extend(store.dispatch(Action::SetSearch("dos".into())).unwrap());
        store.run_effects(effects).await;

        assert_eq!(api.menu_requests.load(Ordering::SeqCst), 1);
        assert_eq!(store.state().listing.items.len(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_page_one_cache_hit_skips_network() {
        let api = Arc::new(FakeApi::new().with_pages(vec![5]));
        let mut store = storefront(api.clone());

        store.dispatch_and_run(Action::MenuOpened).await.unwrap();
        assert_eq!(api.menu_requests.load(Ordering::SeqCst), 1);

        // A different filter fetches fresh...
        store
            .dispatch_and_run(Action::SetCategory("Sweets".into()))
            .await
            .unwrap();
        assert_eq!(api.menu_requests.load(Ordering::SeqCst), 2);

        // ...and returning to an already-seen page-1 key is served from
        // the cache without a round-trip.
        store
            .dispatch_and_run(Action::SetCategory("All".into()))
            .await
            .unwrap();
        assert_eq!(api.menu_requests.load(Ordering::SeqCst), 2);
        assert_eq!(store.state().listing.items.len(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sentinel_appends_next_page_until_last() {
        let api = Arc::new(FakeApi::new().with_pages(vec![
            PAGE_SIZE as usize,
            PAGE_SIZE as usize,
            3,
        ]));
        let mut store = storefront(api.clone());

        store.dispatch_and_run(Action::MenuOpened).await.unwrap();
        store.dispatch_and_run(Action::SentinelVisible).await.unwrap();
        assert_eq!(store.state().listing.items.len(), 2 * PAGE_SIZE as usize);
        assert!(store.state().listing.has_more);

        store.dispatch_and_run(Action::SentinelVisible).await.unwrap();
        assert_eq!(
            store.state().listing.items.len(),
            2 * PAGE_SIZE as usize + 3
        );
        assert!(!store.state().listing.has_more);

        // Exhausted: further sentinel sightings fetch nothing.
        store.dispatch_and_run(Action::SentinelVisible).await.unwrap();
        assert_eq!(api.menu_requests.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_failure_leaves_state_and_toasts() {
        let api = Arc::new(FakeApi::new().with_pages(vec![PAGE_SIZE as usize, PAGE_SIZE as usize]));
        let mut store = storefront(api.clone());

        store.dispatch_and_run(Action::MenuOpened).await.unwrap();
        let loaded = store.state().listing.items.clone();

        api.fail_reads.store(true, Ordering::SeqCst);
        store.dispatch_and_run(Action::SentinelVisible).await.unwrap();

        // The failed page is not merged and a transient toast appears.
        assert_eq!(store.state().listing.items, loaded);
        assert!(matches!(
            store.state().notices.last(),
            Some(Notice::Toast(_))
        ));
        assert!(!store.state().notices.last().unwrap().is_blocking());
    }

    #[tokio::test(start_paused = true)]
    async fn test_filter_change_resets_listing() {
        let api = Arc::new(FakeApi::new().with_pages(vec![PAGE_SIZE as usize, 2]));
        let mut store = storefront(api.clone());

        store.dispatch_and_run(Action::MenuOpened).await.unwrap();
        store.dispatch_and_run(Action::SentinelVisible).await.unwrap();
        assert_eq!(store.state().listing.page, 2);

        store
            .dispatch_and_run(Action::SetSearch("kaju".into()))
            .await
            .unwrap();
        assert_eq!(store.state().listing.page, 1);
    }
}
