//! HTTP serving.
//!
//! A single axum fallback handler receives every request, asks
//! [`router::route`] what it is, and executes that decision:
//!
//! ```text
//! request ─► route() ─┬─ PermanentRedirect / TemporaryRedirect ─► 308 / 307
//!                     ├─ Listing ─► list_entries ─► listing_page ─► 200
//!                     ├─ Entry   ─► load_entry ─► list_entries ─► entry_page ─► 200
//!                     └─ Static  ─► ServeDir (static root) ─► 200 / 404
//! ```
//!
//! All state is per request except the configuration, which is shared
//! read-only behind an [`Arc`].

use crate::compose;
use crate::config::{ConfigError, SiteConfig, SiteInfo};
use crate::document::Document;
use crate::entry::EntryId;
use crate::repository::{EntryRepository, RepositoryError};
use crate::router::{self, Route};
use axum::Router;
use axum::extract::{Request, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Redirect, Response};
use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tower::ServiceExt;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

#[derive(Error, Debug)]
pub enum ServeError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("could not bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

struct AppState {
    site: SiteInfo,
    repository: EntryRepository,
    assets: ServeDir,
}

/// Build the application router for `config`.
pub fn app(config: &SiteConfig) -> Router {
    let state = Arc::new(AppState {
        site: config.site.clone(),
        repository: EntryRepository::new(&config.content.entries_dir, config.content.order),
        assets: ServeDir::new(&config.content.static_dir),
    });

    Router::new()
        .fallback(handle)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Bind the configured address and serve until ctrl-c.
pub async fn serve(config: SiteConfig) -> Result<(), ServeError> {
    let addr = config.socket_addr()?;

    for (what, dir) in [
        ("entries", &config.content.entries_dir),
        ("static", &config.content.static_dir),
    ] {
        if !dir.is_dir() {
            tracing::warn!(dir = %dir.display(), "{what} directory does not exist");
        }
    }

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServeError::Bind { addr, source })?;
    tracing::info!("listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app(&config))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("shutting down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for ctrl-c: {err}");
        std::future::pending::<()>().await;
    }
}

async fn handle(State(state): State<Arc<AppState>>, request: Request) -> Response {
    let host = request
        .headers()
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .or_else(|| request.uri().host());
    let route = router::route(&state.site, host, request.uri().path());

    match route {
        Route::PermanentRedirect(url) => Redirect::permanent(&url).into_response(),
        Route::TemporaryRedirect(path) => Redirect::temporary(&path).into_response(),
        Route::Listing => listing(&state).await.into_response(),
        Route::Entry(id) => entry(&state, &id).await.into_response(),
        Route::Static => match state.assets.clone().oneshot(request).await {
            Ok(response) => response.into_response(),
            Err(never) => match never {},
        },
    }
}

async fn listing(state: &AppState) -> Result<Response, RepositoryError> {
    let entries = state.repository.list_entries().await?;
    Ok(page_response(compose::listing_page(&state.site, &entries)))
}

async fn entry(state: &AppState, id: &EntryId) -> Result<Response, RepositoryError> {
    let entry = state.repository.load_entry(id).await?;
    let entries = state.repository.list_entries().await?;
    Ok(page_response(compose::entry_page(&state.site, &entry, &entries)))
}

/// 200 with the serialized document.
pub fn page_response(document: Document) -> Response {
    (
        [(header::CONTENT_TYPE, HTML_CONTENT_TYPE)],
        document.into_html(),
    )
        .into_response()
}

impl IntoResponse for RepositoryError {
    fn into_response(self) -> Response {
        match &self {
            RepositoryError::NotFound(id) => {
                tracing::debug!(entry = %id, "entry not found");
                (StatusCode::NOT_FOUND, "Not Found").into_response()
            }
            RepositoryError::Storage { .. } => {
                tracing::error!(error = %self, "failed to read entries");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}
