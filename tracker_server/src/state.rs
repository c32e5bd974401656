//! Application state shared across handlers.

use tracker_core::config::ServerConfig;
use tracker_core::Tracker;

#[derive(Clone)]
pub struct AppState {
    pub tracker: Tracker,
    pub config: ServerConfig,
}

impl AppState {
    pub fn new(tracker: Tracker, config: ServerConfig) -> Self {
        Self { tracker, config }
    }
}
