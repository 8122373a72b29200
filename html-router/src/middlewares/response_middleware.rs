use axum::{
    extract::{Request, State},
    http::{header::CONTENT_TYPE, StatusCode},
    middleware::Next,
    response::{Html, IntoResponse, Redirect, Response},
    Extension,
};
use common::utils::template_engine::{ProvidesTemplateEngine, Value};
use minijinja::context;
use serde::Serialize;
use tracing::error;

const JAVASCRIPT: &str = "text/javascript; charset=utf-8";

#[derive(Clone, Debug)]
pub enum TemplateKind {
    Page(String),
    Script(String),
    Error(StatusCode),
    Redirect(String),
}

/// Marker response picked up by [`with_template_response`], which does the
/// actual rendering.
#[derive(Clone)]
pub struct TemplateResponse {
    template_kind: TemplateKind,
    context: Value,
}

impl TemplateResponse {
    pub fn new_template<T: Serialize>(name: impl Into<String>, context: T) -> Self {
        Self {
            template_kind: TemplateKind::Page(name.into()),
            context: Value::from_serialize(&context),
        }
    }

    pub fn new_script<T: Serialize>(name: impl Into<String>, context: T) -> Self {
        Self {
            template_kind: TemplateKind::Script(name.into()),
            context: Value::from_serialize(&context),
        }
    }

    pub fn error(status: StatusCode, title: &str, description: &str) -> Self {
        let ctx = context! {
            status_code => status.as_u16(),
            title => title,
            description => description
        };
        Self {
            template_kind: TemplateKind::Error(status),
            context: ctx,
        }
    }

    pub fn not_found() -> Self {
        Self::error(
            StatusCode::NOT_FOUND,
            "Page Not Found",
            "The page you're looking for doesn't exist.",
        )
    }

    pub fn redirect(path: impl Into<String>) -> Self {
        Self {
            template_kind: TemplateKind::Redirect(path.into()),
            context: Value::from_serialize(()),
        }
    }
}

impl IntoResponse for TemplateResponse {
    fn into_response(self) -> Response {
        Extension(self).into_response()
    }
}

pub async fn with_template_response<S>(State(state): State<S>, req: Request, next: Next) -> Response
where
    S: ProvidesTemplateEngine + Clone + Send + Sync + 'static,
{
    let response = next.run(req).await;

    let Some(template_response) = response.extensions().get::<TemplateResponse>().cloned() else {
        return response;
    };
    let template_engine = state.template_engine();
    let context = &template_response.context;

    match &template_response.template_kind {
        TemplateKind::Page(name) => match template_engine.render(name, context) {
            Ok(html) => Html(html).into_response(),
            Err(e) => {
                error!("Failed to render template '{}': {:?}", name, e);
                (StatusCode::INTERNAL_SERVER_ERROR, Html(fallback_error())).into_response()
            }
        },
        TemplateKind::Script(name) => match template_engine.render(name, context) {
            Ok(script) => ([(CONTENT_TYPE, JAVASCRIPT)], script).into_response(),
            Err(e) => {
                error!("Failed to render script '{}': {:?}", name, e);
                (StatusCode::INTERNAL_SERVER_ERROR, Html(fallback_error())).into_response()
            }
        },
        TemplateKind::Error(status) => match template_engine.render("errors/error.html", context)
        {
            Ok(html) => (*status, Html(html)).into_response(),
            Err(e) => {
                error!("Critical: Failed to render 'errors/error.html': {:?}", e);
                (*status, Html(fallback_error())).into_response()
            }
        },
        TemplateKind::Redirect(path) => Redirect::to(path).into_response(),
    }
}

fn fallback_error() -> String {
    r#"
    <html>
        <body>
            <h1>Error</h1>
            <p>Sorry, something went wrong displaying this page.</p>
        </body>
    </html>
    "#
    .to_string()
}
