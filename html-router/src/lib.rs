pub mod html_state;
pub mod middlewares;
pub mod router_factory;
pub mod routes;

use axum::{extract::FromRef, Router};
use html_state::HtmlState;
use router_factory::RouterFactory;

/// Html routes: the app page, its script and the shared assets under `/common`.
pub fn html_routes<S>(app_state: &HtmlState) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
    HtmlState: FromRef<S>,
{
    RouterFactory::new(app_state)
        .add_public_routes(routes::photosearch::router())
        .with_public_assets("/common", "assets/")
        .with_compression()
        .build()
}
