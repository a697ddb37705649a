//! Application state managed via Dioxus context.
//!
//! `AppState` bundles all reactive signals into a single struct provided via
//! `use_context_provider`. Child components retrieve it with `use_context::<AppState>()`.

use dioxus::prelude::*;
use pgt_data::{DashboardSession, Selection, StartupFailure};

/// Shared application state for the trends dashboard.
#[derive(Clone, Copy)]
pub struct AppState {
    /// Session context (None until trends and stations are loaded)
    pub session: Signal<Option<DashboardSession>>,
    /// Whether the app is still loading
    pub loading: Signal<bool>,
    /// Set when the session could not be built; the page shows nothing else
    pub startup_failure: Signal<Option<StartupFailure>>,
    /// Result of the most recent map click
    pub selection: Signal<Selection>,
}

impl AppState {
    /// Create a new AppState with default signal values.
    pub fn new() -> Self {
        Self {
            session: Signal::new(None),
            loading: Signal::new(true),
            startup_failure: Signal::new(None),
            selection: Signal::new(Selection::NoSiteSelected),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
