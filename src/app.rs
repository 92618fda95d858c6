/*
 * Responsibility
 * - Config → dependencies → Router assembly
 * - Layers (auth / CORS / HTTP)
 * - axum::serve()
 */
use std::{panic, process, sync::Arc};

use anyhow::Result;
use axum::{Router, routing::get};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api::{self, handlers::health::root};
use crate::config::Config;
use crate::middleware;
use crate::repos::RestNoteStore;
use crate::services::{auth::build_token_verifier, notes::NoteService};
use crate::state::AppState;

fn init_tracing() {
    // Prefer RUST_LOG if set, e.g.
    // RUST_LOG=info,notes_api=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // Always surface panics via tracing; stderr may not be collected.
        tracing::error!(?info, "panic");

        // Development: fail fast. Production: default hook, keep serving.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;

    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting notes API in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config);
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build process-level clients once and inject them into the shared state.
///
/// Missing settings degrade the service instead of failing startup.
pub fn build_state(config: &Config) -> AppState {
    if !config.missing.is_empty() {
        tracing::warn!(
            missing = ?config.missing,
            "missing environment variables, check your .env file"
        );
    }

    let auth = config.auth.as_ref().map(build_token_verifier);

    let notes = match &config.store {
        Some(store) => match RestNoteStore::new(store) {
            Ok(store) => NoteService::new(Arc::new(store)),
            Err(e) => {
                tracing::error!(error = %e, "failed to initialise note store client");
                NoteService::unavailable()
            }
        },
        None => NoteService::unavailable(),
    };

    if !notes.is_available() {
        tracing::warn!("note store unavailable, /api/notes will respond with 500");
    }

    AppState::new(auth, notes)
}

pub fn build_router(state: AppState, config: &Config) -> Router {
    let router = Router::new()
        .route("/", get(root))
        .nest("/api", api::routes(state.clone()))
        .with_state(state);

    let router = middleware::cors::apply(router, config);
    middleware::http::apply(router)
}
