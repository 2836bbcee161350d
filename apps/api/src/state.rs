use std::sync::Arc;

use crate::llm_client::Completer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// `None` when no provider key was configured; draft requests then return
    /// a 500 while the rest of the service stays up.
    pub provider: Option<Arc<dyn Completer>>,
}
