//! Core library modules for ecoroute-client
//!
//! This module contains the internal implementation of the client: wire
//! boundary, search flow, route controller and presenters.

pub mod api;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod error;
pub mod event;
pub mod layers;
pub mod model;
pub mod notify;
pub mod present;
pub mod suggest;

// Re-export main types for internal use
pub use api::ApiClient;
pub use config::{ClientConfig, SearchOrdering};
pub use controller::App;
