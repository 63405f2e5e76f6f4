use std::sync::Arc;

use crate::config::AppConfig;

/// Read-only handler state. Each engine call builds its own working set,
/// so nothing here changes after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}
