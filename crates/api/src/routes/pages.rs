//! Static site pages.
//!
//! Each page route maps to one HTML document in the configured static
//! directory. Anything else falls through to the directory itself so the
//! pages' scripts, styles and images resolve.

use std::path::Path;

use axum::Router;
use tower_http::services::{ServeDir, ServeFile};

use crate::state::AppState;

/// Page routes and the documents they serve.
pub const PAGES: [(&str, &str); 4] = [
    ("/", "index.html"),
    ("/about", "about.html"),
    ("/services", "services.html"),
    ("/contact", "contact.html"),
];

/// Build the static page router rooted at `static_dir`.
pub fn router(static_dir: &Path) -> Router<AppState> {
    let router = PAGES.iter().fold(Router::new(), |router, (route, file)| {
        router.route_service(route, ServeFile::new(static_dir.join(file)))
    });

    router.fallback_service(ServeDir::new(static_dir))
}
