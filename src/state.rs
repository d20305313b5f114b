use std::sync::Arc;

use crate::config::AppConfig;
use crate::library::Library;
use crate::metrics::Metrics;

/// The shared application state.
///
/// Holds only immutable configuration and counters; handlers read the
/// filesystem afresh on every request.
#[derive(Clone)]
pub struct AppState {
    /// The media library (storage root and denylist).
    pub library: Arc<Library>,
    /// The application configuration.
    pub config: Arc<AppConfig>,
    /// Request counters exposed under `/api/metrics`.
    pub metrics: Metrics,
}

impl AppState {
    /// Builds the state from a loaded configuration.
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        let library = config.library.build()?;
        Ok(Self::with_library(library, config))
    }

    /// Builds the state around an explicit library, e.g. one rooted in a
    /// temporary directory.
    pub fn with_library(library: Library, config: AppConfig) -> Self {
        Self { library: Arc::new(library), config: Arc::new(config), metrics: Metrics::new() }
    }
}
