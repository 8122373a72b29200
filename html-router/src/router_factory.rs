use axum::{extract::FromRef, middleware::from_fn_with_state, Router};

use crate::{
    html_state::HtmlState,
    middlewares::{
        compression::compression_layer,
        response_middleware::{with_template_response, TemplateResponse},
    },
};

#[macro_export]
macro_rules! create_asset_service {
    // Takes the relative path to the asset directory
    ($relative_path:expr) => {{
        #[cfg(debug_assertions)]
        {
            let crate_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
            let assets_path = crate_dir.join($relative_path);
            tracing::debug!("Assets: Serving from filesystem: {:?}", assets_path);
            tower_http::services::ServeDir::new(assets_path)
        }
        #[cfg(not(debug_assertions))]
        {
            tracing::debug!("Assets: Serving embedded directory");
            static ASSETS_DIR: include_dir::Dir<'static> =
                include_dir::include_dir!("$CARGO_MANIFEST_DIR/assets");
            tower_serve_static::ServeDir::new(&ASSETS_DIR)
        }
    }};
}

/// Assembles page routes, the static asset mount and the shared layers.
pub struct RouterFactory<S> {
    app_state: HtmlState,
    public_routers: Vec<Router<S>>,
    public_assets_config: Option<AssetsConfig>,
    compression_enabled: bool,
}

struct AssetsConfig {
    path: String,      // URL path for assets
    directory: String, // Directory relative to the crate root
}

impl<S> RouterFactory<S>
where
    S: Clone + Send + Sync + 'static,
    HtmlState: FromRef<S>,
{
    pub fn new(app_state: &HtmlState) -> Self {
        Self {
            app_state: app_state.to_owned(),
            public_routers: Vec::new(),
            public_assets_config: None,
            compression_enabled: false,
        }
    }

    // Serve a directory of static assets under a URL prefix
    pub fn with_public_assets(mut self, path: &str, directory: &str) -> Self {
        self.public_assets_config = Some(AssetsConfig {
            path: path.to_string(),
            directory: directory.to_string(),
        });
        self
    }

    // Add a router that will be merged at the root level
    pub fn add_public_routes(mut self, routes: Router<S>) -> Self {
        self.public_routers.push(routes);
        self
    }

    /// Enables response compression when building the router.
    pub const fn with_compression(mut self) -> Self {
        self.compression_enabled = true;
        self
    }

    pub fn build(self) -> Router<S> {
        let mut app_router = Router::new();

        for router in self.public_routers {
            app_router = app_router.merge(router);
        }

        // Unknown paths get the rendered error page
        app_router = app_router.fallback(|| async { TemplateResponse::not_found() });

        app_router = app_router.layer(from_fn_with_state(
            self.app_state.clone(),
            with_template_response::<HtmlState>,
        ));

        // Assets bypass the template middleware
        let mut final_router = Router::new();

        if let Some(assets_config) = self.public_assets_config {
            let asset_service = create_asset_service!(&assets_config.directory);
            final_router = final_router.nest_service(&assets_config.path, asset_service);
        }

        final_router = final_router.merge(app_router);

        if self.compression_enabled {
            final_router = final_router.layer(compression_layer());
        }

        final_router
    }
}
