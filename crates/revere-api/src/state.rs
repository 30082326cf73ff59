use std::sync::Arc;

/// Everything a handler needs. Cheap to clone — `axum` clones it per request.
#[derive(Clone)]
pub struct AppState {
    pub build_version: Arc<str>,
}
