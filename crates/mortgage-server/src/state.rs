use std::sync::Arc;

use crate::config::Settings;

/// Shared, read-only handler state.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        AppState {
            settings: Arc::new(settings),
        }
    }
}
