use axum::extract::State;
use photo_search::{photo_filter::combined_pattern, PAGE_LIMIT};
use serde::Serialize;

use crate::{html_state::HtmlState, middlewares::response_middleware::TemplateResponse};

pub const APP_PATH: &str = "/photosearch";
pub const SCRIPT_PATH: &str = "/photosearch/app.js";

const PAGE_TITLE: &str = "Reddit photo search";

pub async fn index_handler() -> TemplateResponse {
    TemplateResponse::redirect(APP_PATH)
}

pub async fn page_handler() -> TemplateResponse {
    #[derive(Serialize)]
    struct PageData {
        title: &'static str,
    }

    TemplateResponse::new_template(
        "photosearch/index.html",
        PageData {
            title: PAGE_TITLE,
        },
    )
}

/// Renders the client controller with the same constants the Rust
/// controller uses.
pub async fn script_handler(State(state): State<HtmlState>) -> TemplateResponse {
    #[derive(Serialize)]
    struct ScriptData {
        search_url: String,
        page_limit: u32,
        thumbnail_size: u32,
        photo_pattern: String,
    }

    TemplateResponse::new_script(
        "photosearch/app.js",
        ScriptData {
            search_url: state.config.reddit_search_url.clone(),
            page_limit: PAGE_LIMIT,
            thumbnail_size: state.config.thumbnail_size,
            photo_pattern: combined_pattern(),
        },
    )
}
