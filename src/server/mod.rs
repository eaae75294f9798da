//! HTTP server with Axum
//!
//! Serves the storefront pages and the canvas JSON API from one router.

pub mod api;
pub mod pages;
pub mod session;
pub mod views;

use crate::codegen::CodeGenerator;
use crate::config::Config;
use crate::shop::Shop;
use crate::store::CanvasStore;
use anyhow::{Context, Result};
use axum::Router;
use axum::routing::{delete, get, post};
use session::SessionStore;
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;
use tracing::info;
use views::Views;

const SESSION_REAP_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub shop: Shop,
    pub canvas: CanvasStore,
    pub generator: Arc<CodeGenerator>,
    pub sessions: Arc<SessionStore>,
    pub views: Arc<Views>,
}

impl AppState {
    /// Opens the canvas store and builds the shared services for `config`.
    pub fn new(config: Arc<Config>) -> Result<Self> {
        Self::with_shop(config, Shop::in_memory())
    }

    pub fn with_shop(config: Arc<Config>, shop: Shop) -> Result<Self> {
        let canvas = CanvasStore::open(&config.database_path).with_context(|| {
            format!(
                "Failed to open canvas store at '{}'",
                config.database_path.display()
            )
        })?;
        let generator = CodeGenerator::builder()
            .with_language_alias("py", "python")
            .with_language_alias("js", "javascript")
            .with_language_alias("c++", "cpp")
            .with_indent_strategy(config.indent_strategy)
            .build();
        let views = Views::new().context("Failed to load page templates")?;

        Ok(Self {
            sessions: Arc::new(SessionStore::new(
                config.session_cookie.clone(),
                config.session_ttl(),
            )),
            config,
            shop,
            canvas,
            generator: Arc::new(generator),
            views: Arc::new(views),
        })
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Storefront
        .route("/", get(pages::index))
        .route("/add_to_cart/:id", post(pages::add_to_cart))
        .route("/cart", get(pages::cart))
        .route("/cart/update/:id", post(pages::update_cart))
        .route("/cart/remove/:id", post(pages::remove_from_cart))
        .route("/login", get(pages::login_page).post(pages::login))
        .route("/register", get(pages::register_page).post(pages::register))
        .route("/logout", get(pages::logout))
        .route("/checkout", post(pages::checkout))
        .route("/orders", get(pages::orders))
        // Canvas
        .route("/health", get(api::health))
        .route("/api/rigs", get(api::list_rigs).post(api::save_rig))
        .route("/api/rigs/:id", delete(api::delete_rig))
        .route(
            "/api/connections",
            get(api::list_connections).post(api::save_connection),
        )
        .route("/api/connections/:id", delete(api::delete_connection))
        .route("/api/execute", post(api::execute))
        .route("/api/generate", post(api::generate))
        .route("/api/languages", get(api::languages))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server(config: Arc<Config>) -> Result<()> {
    let bind_addr = config.http_bind;
    let state = AppState::new(config)?;
    let reaper = tokio::spawn(session::reap_expired_sessions(
        state.sessions.clone(),
        SESSION_REAP_INTERVAL.min(state.sessions.ttl()),
    ));
    let app = create_router(state);

    info!("Starting HTTP server on {}", bind_addr);
    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("Failed to bind {bind_addr}"))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    reaper.abort();
    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
