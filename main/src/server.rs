use axum::Router;
use clap::Parser;
use common::utils::config::{get_config, AppConfig};
use html_router::{html_routes, html_state::HtmlState};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Serves the Reddit photo search page.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Port number for the HTTP server; overrides the configured port
    #[arg(long, value_name = "PORT")]
    port: Option<u16>,
}

impl Args {
    fn apply(&self, mut config: AppConfig) -> AppConfig {
        if let Some(port) = self.port {
            config.http_port = port;
        }
        config
    }
}

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Set up tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .try_init()
        .ok();

    let args = Args::parse();
    let config = args.apply(get_config()?);

    let html_state = HtmlState::new(config.clone(), None);
    let app = app_router(&html_state);

    let serve_address = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&serve_address).await?;
    info!("running on {serve_address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("stopped");
    Ok(())
}

fn app_router(html_state: &HtmlState) -> Router {
    html_routes(html_state).with_state(html_state.clone())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install terminate handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, http::StatusCode};
    use tower::ServiceExt;

    #[test]
    fn port_flag_overrides_config() {
        let args = Args::try_parse_from(["server", "--port", "9000"]).expect("valid args");
        let config = args.apply(AppConfig::default());
        assert_eq!(config.http_port, 9000);
    }

    #[test]
    fn port_defaults_to_config() {
        let args = Args::try_parse_from(["server"]).expect("valid args");
        let config = args.apply(AppConfig::default());
        assert_eq!(config.http_port, 8080);
    }

    #[test]
    fn rejects_invalid_port() {
        assert!(Args::try_parse_from(["server", "--port", "70000"]).is_err());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn smoke_startup_serves_app() {
        let html_state = HtmlState::new(AppConfig::default(), None);
        let app = app_router(&html_state);

        let response = app
            .clone()
            .oneshot(Request::builder().uri("/").body(Body::empty()).expect("request"))
            .await
            .expect("router response");
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let page_response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/photosearch")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("page response");
        assert_eq!(page_response.status(), StatusCode::OK);

        let script_response = app
            .oneshot(
                Request::builder()
                    .uri("/photosearch/app.js")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("script response");
        assert_eq!(script_response.status(), StatusCode::OK);
    }
}
