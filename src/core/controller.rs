//! Route request controller and view state
//!
//! [`App`] owns every piece of mutable UI state: the selection, the request
//! lifecycle, the submit affordance, the map layers and the presenters. State
//! changes only inside [`App::handle`]; network requests run on background
//! tasks and report back through the event channel.

use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};

use crate::core::api::ApiClient;
use crate::core::config::ClientConfig;
use crate::core::error::{Error, Result};
use crate::core::event::{spawn_request, Event, EventSender};
use crate::core::layers::{MapLayerManager, MapSurface};
use crate::core::model::{
    GeoPoint, PreferenceSlider, RequestLifecycleState, RoutePreferences, RouteResponse,
    SelectionState, Slot, VehicleType,
};
use crate::core::notify::{Category, NotificationPresenter};
use crate::core::present::ResultPresenter;
use crate::core::suggest::SuggestionStore;

pub const IDLE_LABEL: &str = "Find Greenest Route";
pub const BUSY_LABEL: &str = "Calculating...";

/// State of the route form's submit button
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitAffordance {
    pub enabled: bool,
    pub label: &'static str,
    pub spinner_visible: bool,
}

impl SubmitAffordance {
    fn idle() -> Self {
        Self {
            enabled: true,
            label: IDLE_LABEL,
            spinner_visible: false,
        }
    }

    fn busy() -> Self {
        Self {
            enabled: false,
            label: BUSY_LABEL,
            spinner_visible: true,
        }
    }
}

impl Default for SubmitAffordance {
    fn default() -> Self {
        Self::idle()
    }
}

pub struct App<M> {
    api: ApiClient,
    events: EventSender,
    origin_input: SuggestionStore,
    destination_input: SuggestionStore,
    selection: SelectionState,
    vehicle: VehicleType,
    preferences: Vec<PreferenceSlider>,
    lifecycle: RequestLifecycleState,
    affordance: SubmitAffordance,
    map: MapLayerManager<M>,
    results: ResultPresenter,
    notifications: NotificationPresenter,
    /// Endpoints of the request in flight; `None` for the sample route
    requested_endpoints: Option<(GeoPoint, GeoPoint)>,
    response: Option<RouteResponse>,
}

impl<M: MapSurface> App<M> {
    /// Build the app and the receiving end of its event channel
    pub fn new(config: ClientConfig, map: M) -> Result<(Self, UnboundedReceiver<Event>)> {
        let api = ApiClient::new(&config)?;
        let (events, rx) = unbounded_channel();

        let app = Self {
            origin_input: SuggestionStore::new(Slot::Origin, &config, events.clone()),
            destination_input: SuggestionStore::new(Slot::Destination, &config, events.clone()),
            api,
            events,
            selection: SelectionState::default(),
            vehicle: VehicleType::default(),
            preferences: Vec::new(),
            lifecycle: RequestLifecycleState::Idle,
            affordance: SubmitAffordance::idle(),
            map: MapLayerManager::new(map, config.fit_padding_px),
            results: ResultPresenter::new(),
            notifications: NotificationPresenter::new(),
            requested_endpoints: None,
            response: None,
        };
        Ok((app, rx))
    }

    /// Sender for feeding UI events into the app
    pub fn sender(&self) -> EventSender {
        self.events.clone()
    }

    /// Register a preference slider
    pub fn add_preference(&mut self, slider: PreferenceSlider) -> Result<()> {
        if self.preferences.iter().any(|s| s.name == slider.name) {
            return Err(Error::InvalidInput(format!(
                "preference '{}' is already registered",
                slider.name
            )));
        }
        self.preferences.push(slider);
        Ok(())
    }

    /// Handle events until [`Event::Shutdown`] or until every sender is gone
    pub async fn run(&mut self, rx: &mut UnboundedReceiver<Event>) {
        while let Some(event) = rx.recv().await {
            if matches!(event, Event::Shutdown) {
                break;
            }
            self.handle(event);
        }
    }

    /// Apply one event. Never fails: errors end up logged or in a notification.
    pub fn handle(&mut self, event: Event) {
        if event.is_user_input() && self.notifications.is_blocking() {
            log::debug!("Notification is open, ignoring user input");
            return;
        }

        match event {
            Event::InputChanged { slot, query } => {
                self.input_mut(slot).on_input_changed(&query);
            }
            Event::SearchDue { slot, query } => {
                let api = self.api.clone();
                let events = self.events.clone();
                self.input_mut(slot).dispatch(query, &api, &events);
            }
            Event::SearchCompleted { slot, seq, result } => {
                self.input_mut(slot).apply(seq, result);
            }
            Event::SuggestionSelected { slot, index } => {
                self.select_suggestion(slot, index);
            }
            Event::VehicleChanged(vehicle) => {
                self.vehicle = vehicle;
            }
            Event::PreferenceChanged { name, value } => {
                match self.preferences.iter_mut().find(|s| s.name == name) {
                    Some(slider) => slider.set(value),
                    None => log::warn!("Ignoring change of unknown preference '{name}'"),
                }
            }
            Event::Submit | Event::LoadSample if !self.affordance.enabled => {
                // A disabled button does not fire
                log::debug!("Submit affordance disabled, ignoring request");
            }
            Event::Submit => self.submit(),
            Event::LoadSample => self.load_sample(),
            Event::RouteCompleted(result) => self.finish_route(result),
            Event::DismissNotification => self.notifications.dismiss(),
            Event::Shutdown => {}
        }
    }

    /// Write the picked suggestion into its slot
    pub fn select_suggestion(&mut self, slot: Slot, index: usize) -> Option<GeoPoint> {
        let picked = self.input_mut(slot).select(index)?;
        log::info!("{slot} set to {} {}", picked.display_address, picked.position);
        self.selection.set(slot, picked.position);
        Some(picked.position)
    }

    /// Start a route calculation for the current selection.
    ///
    /// No guard against a request already in flight: that is the submit
    /// affordance's job.
    pub fn submit(&mut self) {
        let Some((origin, destination)) = self.selection.endpoints() else {
            self.notifications.show(
                "Missing Coordinates",
                "Please select a valid origin and destination from the suggestions.",
                Category::Info,
            );
            return;
        };

        self.begin_loading(Some((origin, destination)));

        let preferences = RoutePreferences::from_sliders(&self.preferences);
        let vehicle = self.vehicle.clone();
        let api = self.api.clone();
        spawn_request(
            &self.events,
            async move { api.route(origin, destination, &vehicle, &preferences).await },
            Event::RouteCompleted,
        );
    }

    /// Fetch and display the service's sample multimodal route pair
    pub fn load_sample(&mut self) {
        self.begin_loading(None);

        let api = self.api.clone();
        spawn_request(
            &self.events,
            async move { api.multimodal_route().await },
            Event::RouteCompleted,
        );
    }

    fn begin_loading(&mut self, endpoints: Option<(GeoPoint, GeoPoint)>) {
        log::info!("Route request started");
        self.lifecycle = RequestLifecycleState::Loading;
        self.affordance = SubmitAffordance::busy();
        self.results.hide();
        // The previous route goes away as soon as a new calculation starts
        self.map.clear();
        self.response = None;
        self.requested_endpoints = endpoints;
    }

    fn finish_route(&mut self, result: Result<RouteResponse>) {
        match result {
            Ok(response) => {
                match self.requested_endpoints.or_else(|| route_endpoints(&response)) {
                    Some((origin, destination)) => self.map.render(
                        &response.eco_route,
                        &response.normal_route,
                        origin,
                        destination,
                    ),
                    None => log::warn!("Route response has no endpoints to mark"),
                }
                self.results.render(&response.eco_route);
                self.results.render_comparison(&response.comparison);
                self.lifecycle = RequestLifecycleState::Success;
                self.response = Some(response);
                log::info!("Route request succeeded");
            }
            Err(e) => {
                log::error!("Error calculating route: {e}");
                self.notifications
                    .show("Calculation Error", &e.user_message(), Category::Error);
                self.lifecycle = RequestLifecycleState::Failed;
            }
        }
        self.requested_endpoints = None;
        self.affordance = SubmitAffordance::idle();
    }

    fn input_mut(&mut self, slot: Slot) -> &mut SuggestionStore {
        match slot {
            Slot::Origin => &mut self.origin_input,
            Slot::Destination => &mut self.destination_input,
        }
    }

    pub fn input(&self, slot: Slot) -> &SuggestionStore {
        match slot {
            Slot::Origin => &self.origin_input,
            Slot::Destination => &self.destination_input,
        }
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn lifecycle(&self) -> RequestLifecycleState {
        self.lifecycle
    }

    pub fn affordance(&self) -> &SubmitAffordance {
        &self.affordance
    }

    pub fn map(&self) -> &MapLayerManager<M> {
        &self.map
    }

    pub fn results(&self) -> &ResultPresenter {
        &self.results
    }

    pub fn notifications(&self) -> &NotificationPresenter {
        &self.notifications
    }

    pub fn response(&self) -> Option<&RouteResponse> {
        self.response.as_ref()
    }

    pub fn vehicle(&self) -> &VehicleType {
        &self.vehicle
    }

    pub fn preferences(&self) -> RoutePreferences {
        RoutePreferences::from_sliders(&self.preferences)
    }
}

/// First and last vertex of the eco route
fn route_endpoints(response: &RouteResponse) -> Option<(GeoPoint, GeoPoint)> {
    let geometry = &response.eco_route.geometry;
    Some((*geometry.first()?, *geometry.last()?))
}
