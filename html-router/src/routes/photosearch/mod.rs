mod handlers;

use axum::{extract::FromRef, routing::get, Router};
pub use handlers::{index_handler, page_handler, script_handler, APP_PATH, SCRIPT_PATH};

use crate::html_state::HtmlState;

pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
    HtmlState: FromRef<S>,
{
    Router::new()
        .route("/", get(index_handler))
        .route(APP_PATH, get(page_handler))
        .route(SCRIPT_PATH, get(script_handler))
}
