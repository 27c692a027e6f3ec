use std::{fs, net::SocketAddr, path::Path, sync::Arc};

use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use server_api::ApiContext;
use storage::Agenda;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod api;
mod app_state;
mod config;
mod page;

use api::{healthz, http_options, http_talk, http_view};
use app_state::{AppState, PageSettings};
use config::load_settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = load_settings();
    let agenda = Agenda::load(&settings.data_path).map_err(|error| {
        error!(
            data_path = %settings.data_path.display(),
            error = %format!("{error:#}"),
            "failed to load agenda; check the CSV path and its columns"
        );
        error
    })?;

    let favicon = settings.favicon_path.as_deref().and_then(load_favicon);

    let state = AppState {
        api: ApiContext::new(agenda),
        page: PageSettings {
            title: settings.page_title,
            heading: settings.heading,
        },
        favicon,
    };
    let app = build_router(Arc::new(state));

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, "server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(page::index))
        .route("/healthz", get(healthz))
        .route("/api/view", get(http_view))
        .route("/api/options", get(http_options))
        .route("/api/talks/:id", get(http_talk))
        .route("/favicon.ico", get(favicon))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn load_favicon(path: &Path) -> Option<Bytes> {
    match fs::read(path) {
        Ok(bytes) => Some(Bytes::from(bytes)),
        Err(error) => {
            warn!(path = %path.display(), %error, "favicon unavailable; serving none");
            None
        }
    }
}

async fn favicon(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match &state.favicon {
        Some(bytes) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "image/x-icon")],
            bytes.clone(),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
