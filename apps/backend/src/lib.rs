pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::db::Database;
use crate::services::ai::GeminiClient;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    /// None when no AI credential is configured
    pub ai: Option<Arc<GeminiClient>>,
}

/// Build the full router for the given state
pub fn app(state: AppState) -> Router {
    let protected_routes = Router::new()
        // Session routes
        .route("/api/session/status", get(routes::session::status))
        // Deck routes
        .route("/api/decks", get(routes::decks::list).post(routes::decks::create))
        .route(
            "/api/decks/:deck_id",
            get(routes::decks::get).delete(routes::decks::delete),
        )
        // Study routes
        .route("/api/decks/:deck_id/study", get(routes::study::cards))
        .route("/api/cards/:card_id/review", post(routes::study::review))
        .route("/api/study/quick", get(routes::study::quick))
        .route("/api/dashboard/stats", get(routes::dashboard::stats))
        // AI routes
        .route("/api/generate", post(routes::generate::generate))
        .route("/api/chat", post(routes::chat::chat))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            routes::auth::session_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/api/session/register", post(routes::session::register))
        .merge(protected_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url).await?;

    tracing::info!("Running migrations...");
    db.run_migrations().await?;

    let ai = GeminiClient::from_config(&config.gemini);
    match &ai {
        Some(client) => tracing::info!("AI generation enabled with model {}", client.model()),
        None => tracing::warn!("GEMINI_API_KEY not set, generation uses mock cards and chat is disabled"),
    }

    let state = AppState {
        db: Arc::new(db),
        ai: ai.map(Arc::new),
    };

    let addr = config.addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app(state)).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
