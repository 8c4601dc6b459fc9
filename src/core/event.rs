//! Typed UI events
//!
//! Each user affordance and each background request completion is an
//! [`Event`]. The [`App`](crate::App) consumes them one at a time.

use tokio::sync::mpsc::UnboundedSender;

use crate::core::error::Result;
use crate::core::model::{RouteResponse, Slot, Suggestion, VehicleType};

#[derive(Debug)]
pub enum Event {
    /// Text of a location input changed
    InputChanged { slot: Slot, query: String },

    /// Debounce window for a location input elapsed
    SearchDue { slot: Slot, query: String },

    /// A search request finished
    SearchCompleted {
        slot: Slot,
        seq: u64,
        result: Result<Vec<Suggestion>>,
    },

    /// User picked the suggestion at `index`
    SuggestionSelected { slot: Slot, index: usize },

    VehicleChanged(VehicleType),

    /// A preference slider moved
    PreferenceChanged { name: String, value: f64 },

    /// Route form submitted
    Submit,

    /// Sample multimodal route requested
    LoadSample,

    /// A route request finished
    RouteCompleted(Result<RouteResponse>),

    DismissNotification,

    /// Stop the event loop
    Shutdown,
}

impl Event {
    /// Events that come from the page's controls, as opposed to timers and
    /// request completions. A visible modal swallows these.
    pub fn is_user_input(&self) -> bool {
        matches!(
            self,
            Event::InputChanged { .. }
                | Event::SuggestionSelected { .. }
                | Event::VehicleChanged(_)
                | Event::PreferenceChanged { .. }
                | Event::Submit
                | Event::LoadSample
        )
    }
}

pub type EventSender = UnboundedSender<Event>;

/// Run `request` on its own task and report its outcome as an event.
///
/// The outcome is always reported, including when the request task panics.
pub(crate) fn spawn_request<T, Fut, F>(events: &EventSender, request: Fut, wrap: F)
where
    T: Send + 'static,
    Fut: std::future::Future<Output = Result<T>> + Send + 'static,
    F: FnOnce(Result<T>) -> Event + Send + 'static,
{
    let events = events.clone();
    let task = tokio::spawn(request);
    tokio::spawn(async move {
        let result = match task.await {
            Ok(result) => result,
            Err(join_err) => Err(join_err.into()),
        };
        if events.send(wrap(result)).is_err() {
            log::debug!("Event loop is gone, dropping request outcome");
        }
    });
}
