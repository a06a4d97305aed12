// src/web/state.rs
// Shared state for the HTTP surface

use std::sync::Arc;

use crate::device::DeviceBackend;
use crate::dispatch::Dispatcher;
use crate::intent::CommandExtractor;

#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
    pub extractor: Arc<CommandExtractor>,
    /// Home Assistant backend, when configured
    pub devices: Option<Arc<dyn DeviceBackend>>,
}

impl AppState {
    pub fn new(
        dispatcher: Arc<Dispatcher>,
        extractor: Arc<CommandExtractor>,
        devices: Option<Arc<dyn DeviceBackend>>,
    ) -> Self {
        Self {
            dispatcher,
            extractor,
            devices,
        }
    }
}
