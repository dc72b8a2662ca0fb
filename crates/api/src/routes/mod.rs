pub mod contact;
pub mod health;
pub mod pages;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /contact        POST  submit a contact form
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(contact::router())
}
