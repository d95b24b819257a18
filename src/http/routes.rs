//! Shared state and plain HTTP endpoints.

use std::sync::Arc;

use crate::ws::hub::Hub;

#[derive(Clone, Default)]
pub struct AppState {
    pub hub: Arc<Hub>,
}

impl AppState {
    pub fn new() -> Self {
        Self { hub: Arc::new(Hub::new()) }
    }
}

pub async fn healthz() -> &'static str {
    "ok"
}
