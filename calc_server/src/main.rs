//! Building Material Estimator Server
//!
//! Serves the estimator over HTTP:
//!
//! - `POST /api/calculate` - validate a building and return the estimate
//! - `POST /api/report` - render a posted estimate as a PDF report
//! - `POST /api/send-email` - render and email the report
//! - `GET /api/grades` - concrete grades and their mix designs
//! - `GET /health` - liveness
//!
//! Errors are `{error, code}`. Validation failures return 400. Unexpected
//! failures return 500 with a generic message; details go to the log only.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use clap::Parser;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod api;
mod config;
mod email;
mod error;

use api::{handle_calculate, handle_health, handle_list_grades, handle_report, handle_send_email};
use config::{Args, ServerConfig};
use email::Mailer;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub mailer: Arc<Mailer>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        let mailer = Mailer::from_config(&config);
        AppState {
            config: Arc::new(config),
            mailer: Arc::new(mailer),
        }
    }
}

/// Build the router with all routes and middleware
pub fn app(state: AppState) -> Router {
    let routes = Router::new()
        .route("/health", get(handle_health))
        .route("/api/grades", get(handle_list_grades))
        .route("/api/calculate", post(handle_calculate))
        .route("/api/report", post(handle_report))
        .route("/api/send-email", post(handle_send_email))
        .with_state(state);

    with_middleware(routes)
}

/// Panics become generic 500 responses; every request is traced
fn with_middleware(router: Router) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    router
        .layer(CatchPanicLayer::custom(error::panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from(args);
    let addr = config.socket_addr()?;
    let state = AppState::new(config);

    info!("Email delivery: {}", state.mailer.describe());
    info!("Render timeout: {}ms", state.config.render_timeout.as_millis());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app(state)).await?;

    Ok(())
}
