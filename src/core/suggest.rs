//! Location search flow for one input field
//!
//! Keystrokes are debounced into search requests; responses replace the
//! suggestion list wholesale. Search is best effort: failures are logged and
//! never reach the user.

use crate::core::api::ApiClient;
use crate::core::config::{ClientConfig, SearchOrdering};
use crate::core::debounce::Debouncer;
use crate::core::error::Result;
use crate::core::event::{spawn_request, Event, EventSender};
use crate::core::model::{Slot, Suggestion};

pub struct SuggestionStore {
    slot: Slot,
    input_text: String,
    suggestions: Vec<Suggestion>,
    min_query_chars: usize,
    ordering: SearchOrdering,
    debouncer: Debouncer<String>,
    /// Sequence number of the last dispatched search (or list invalidation)
    issued: u64,
}

impl SuggestionStore {
    pub fn new(slot: Slot, config: &ClientConfig, events: EventSender) -> Self {
        let debouncer = Debouncer::new(config.search_debounce, move |query: String| {
            if events.send(Event::SearchDue { slot, query }).is_err() {
                log::debug!("Event loop is gone, dropping {slot} search");
            }
        });

        Self {
            slot,
            input_text: String::new(),
            suggestions: Vec::new(),
            min_query_chars: config.min_query_chars,
            ordering: config.search_ordering,
            debouncer,
            issued: 0,
        }
    }

    /// Record new input text. Returns true when a search was scheduled.
    ///
    /// Short queries clear the list and cancel any pending search instead.
    pub fn on_input_changed(&mut self, query: &str) -> bool {
        self.input_text = query.to_string();

        if query.chars().count() < self.min_query_chars {
            self.debouncer.cancel();
            self.clear();
            return false;
        }

        self.debouncer.trigger(query.to_string());
        true
    }

    /// Issue the search request for `query` in the background.
    ///
    /// The outcome comes back as [`Event::SearchCompleted`] tagged with the
    /// sequence number returned here. A query the input no longer shows is
    /// not sent, and `None` is returned.
    pub fn dispatch(
        &mut self,
        query: String,
        api: &ApiClient,
        events: &EventSender,
    ) -> Option<u64> {
        if query != self.input_text || query.chars().count() < self.min_query_chars {
            log::debug!(
                "Dropping {} search for {query:?}, input now reads {:?}",
                self.slot,
                self.input_text
            );
            return None;
        }

        self.issued += 1;
        let seq = self.issued;
        let slot = self.slot;
        let api = api.clone();

        log::debug!("Dispatching {slot} search #{seq} for {query:?}");
        spawn_request(
            events,
            async move { api.search(&query).await },
            move |result| Event::SearchCompleted { slot, seq, result },
        );
        Some(seq)
    }

    /// Apply a search outcome. Returns true when the list was replaced.
    pub fn apply(&mut self, seq: u64, result: Result<Vec<Suggestion>>) -> bool {
        let suggestions = match result {
            Ok(suggestions) => suggestions,
            Err(e) => {
                log::warn!("{} search #{seq} failed: {e}", self.slot);
                return false;
            }
        };

        if self.ordering == SearchOrdering::LatestRequest && seq != self.issued {
            log::debug!(
                "Discarding stale {} search #{seq} (latest is #{})",
                self.slot,
                self.issued
            );
            return false;
        }

        self.suggestions = suggestions;
        true
    }

    /// Pick a suggestion: the input shows its address and the list is cleared
    pub fn select(&mut self, index: usize) -> Option<Suggestion> {
        let picked = self.suggestions.get(index).cloned()?;
        self.input_text = picked.display_address.clone();
        self.clear();
        Some(picked)
    }

    /// Empty the list and invalidate searches still in flight
    pub fn clear(&mut self) {
        self.suggestions.clear();
        if self.ordering == SearchOrdering::LatestRequest {
            self.issued += 1;
        }
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    pub fn slot(&self) -> Slot {
        self.slot
    }

    pub fn is_search_pending(&self) -> bool {
        self.debouncer.is_pending()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Error;
    use crate::core::model::GeoPoint;
    use std::time::Duration;
    use tokio::sync::mpsc::unbounded_channel;

    fn suggestion(address: &str, lat: f64, lon: f64) -> Suggestion {
        Suggestion {
            display_address: address.to_string(),
            position: GeoPoint::new(lat, lon),
        }
    }

    fn store_with(ordering: SearchOrdering) -> (SuggestionStore, tokio::sync::mpsc::UnboundedReceiver<Event>) {
        let (tx, rx) = unbounded_channel();
        let config = ClientConfig {
            search_ordering: ordering,
            ..Default::default()
        };
        (SuggestionStore::new(Slot::Origin, &config, tx), rx)
    }

    #[tokio::test(start_paused = true)]
    async fn test_short_queries_never_schedule() {
        let (mut store, mut rx) = store_with(SearchOrdering::LatestRequest);

        assert!(!store.on_input_changed(""));
        assert!(!store.on_input_changed("d"));
        assert!(!store.on_input_changed("de"));
        // Multi-byte characters count as characters, not bytes
        assert!(!store.on_input_changed("éé"));

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(rx.try_recv().is_err());
        assert!(store.suggestions().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_typing_burst_produces_one_search_due() {
        let (mut store, mut rx) = store_with(SearchOrdering::LatestRequest);

        assert!(store.on_input_changed("del"));
        assert!(store.on_input_changed("delh"));
        assert!(store.on_input_changed("delhi"));
        tokio::time::sleep(Duration::from_millis(350)).await;

        match rx.try_recv() {
            Ok(Event::SearchDue { slot, query }) => {
                assert_eq!(slot, Slot::Origin);
                assert_eq!(query, "delhi");
            }
            other => panic!("Expected SearchDue, got {other:?}"),
        }
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_shortening_query_cancels_pending_search() {
        let (mut store, mut rx) = store_with(SearchOrdering::LatestRequest);

        store.on_input_changed("delhi");
        store.on_input_changed("de");
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert!(rx.try_recv().is_err());
        assert!(!store.is_search_pending());
    }

    #[tokio::test]
    async fn test_queued_search_for_outdated_text_is_not_sent() {
        let (mut store, mut rx) = store_with(SearchOrdering::LatestRequest);
        let (tx, _events) = unbounded_channel();
        let api = ApiClient::new(&ClientConfig::default()).unwrap();

        // The debounce already fired for "delhi", then the user cut it to "de"
        store.on_input_changed("delhi");
        store.on_input_changed("de");
        assert_eq!(store.dispatch("delhi".to_string(), &api, &tx), None);

        // Text that moved on to a different long query is dropped as well
        store.on_input_changed("delhi cantt");
        assert_eq!(store.dispatch("delhi".to_string(), &api, &tx), None);
        store.debouncer.cancel();

        assert_eq!(store.issued, 1);
        assert!(store.suggestions().is_empty());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_select_clears_list_and_sets_text() {
        let (mut store, _rx) = store_with(SearchOrdering::LatestRequest);
        store.issued = 1;
        assert!(store.apply(
            1,
            Ok(vec![
                suggestion("Mumbai, Maharashtra", 19.076, 72.8777),
                suggestion("Mumbra, Maharashtra", 19.17, 73.02),
            ])
        ));

        let picked = store.select(1).unwrap();
        assert_eq!(picked.position, GeoPoint::new(19.17, 73.02));
        assert_eq!(store.input_text(), "Mumbra, Maharashtra");
        assert!(store.suggestions().is_empty());

        assert!(store.select(0).is_none());
    }

    #[tokio::test]
    async fn test_failed_search_is_swallowed() {
        let (mut store, _rx) = store_with(SearchOrdering::LatestRequest);
        store.issued = 1;
        store.apply(1, Ok(vec![suggestion("Pune", 18.52, 73.85)]));

        store.issued = 2;
        assert!(!store.apply(2, Err(Error::NetworkError("down".to_string()))));
        assert_eq!(store.suggestions().len(), 1);
    }

    #[tokio::test]
    async fn test_latest_request_discards_out_of_order_responses() {
        let (mut store, _rx) = store_with(SearchOrdering::LatestRequest);
        // Two searches in flight: #1 for "chan", #2 for "chandigarh"
        store.issued = 2;

        assert!(store.apply(2, Ok(vec![suggestion("Chandigarh", 30.73, 76.78)])));
        // The older response arrives last and must not win
        assert!(!store.apply(1, Ok(vec![suggestion("Chanakyapuri", 28.59, 77.18)])));

        assert_eq!(store.suggestions()[0].display_address, "Chandigarh");
    }

    #[tokio::test]
    async fn test_last_arrival_keeps_the_race() {
        let (mut store, _rx) = store_with(SearchOrdering::LastArrival);
        store.issued = 2;

        assert!(store.apply(2, Ok(vec![suggestion("Chandigarh", 30.73, 76.78)])));
        assert!(store.apply(1, Ok(vec![suggestion("Chanakyapuri", 28.59, 77.18)])));

        // Whichever response arrived last wins, even though it answers an older query
        assert_eq!(store.suggestions()[0].display_address, "Chanakyapuri");
    }

    #[tokio::test]
    async fn test_clear_invalidates_in_flight_search() {
        let (mut store, _rx) = store_with(SearchOrdering::LatestRequest);
        store.issued = 1;
        store.on_input_changed("ab");

        assert!(!store.apply(1, Ok(vec![suggestion("Abohar", 30.14, 74.2)])));
        assert!(store.suggestions().is_empty());
    }
}
