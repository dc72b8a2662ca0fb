use std::sync::Arc;

use finserv_db::SubmissionStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: everything is behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Where validated submissions are written.
    pub store: Arc<dyn SubmissionStore>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
