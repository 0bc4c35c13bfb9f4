/*
 * Responsibility
 * - tracing / panic hook 初期化
 * - Config読み込み → 依存生成 (store, sink, token verifier) → Router 組み立て
 * - Middleware の適用 (HTTP/CORS/security headers, 書き込み系は bearer auth)
 * - axum::serve() で起動, Ctrl+C / SIGTERM で graceful shutdown
 */
use std::{panic, process, sync::Arc};

use anyhow::Result;
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api;
use crate::config::Config;
use crate::error::AppError;
use crate::middleware;
use crate::repos::{MemoryTaskStore, PgTaskStore, TaskStore};
use crate::services::auth::build_token_verifier;
use crate::services::notify::{LogSink, NotificationSink, WebhookSink};
use crate::services::tasks::TaskService;
use crate::state::AppState;

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,task_api=debug,tower_http=debug cargo run
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
        // Always surface panics via tracing so they don't get lost
        tracing::error!(?info, "panic");

        // development: fail fast / production: keep serving
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
        "starting API in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config).await?;
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn build_store(config: &Config) -> Result<Arc<dyn TaskStore>, AppError> {
    let Some(url) = config.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set; tasks are kept in memory only");
        return Ok(Arc::new(MemoryTaskStore::new()));
    };

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(config.dependency_timeout)
        .connect(url)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "failed to connect to database");
            AppError::DependencyUnavailable { dependency: "store" }
        })?;

    let store = PgTaskStore::new(pool);
    store.ensure_schema().await?;
    Ok(Arc::new(store))
}

fn build_sink(config: &Config) -> Result<Arc<dyn NotificationSink>, AppError> {
    match &config.notify_webhook_url {
        Some(url) => {
            let sink = WebhookSink::new(url.clone(), config.dependency_timeout).map_err(|e| {
                tracing::error!(error = %e, "failed to build notification client");
                AppError::Internal
            })?;
            Ok(Arc::new(sink))
        }
        None => {
            tracing::info!("NOTIFY_WEBHOOK_URL not set; notifications go to the log");
            Ok(Arc::new(LogSink))
        }
    }
}

async fn build_state(config: &Config) -> Result<AppState, AppError> {
    // Process-level collaborators: one instance each for the lifetime of the server.
    let store = build_store(config).await?;
    let sink = build_sink(config)?;
    let auth = build_token_verifier(config)?;

    tracing::info!(
        store = store.backend_name(),
        sink = sink.backend_name(),
        jwks = %config.auth_jwks_url,
        "dependencies ready"
    );

    let tasks = TaskService::new(
        store,
        sink,
        config.notify_topic.clone(),
        config.dependency_timeout,
    );

    Ok(AppState::new(tasks, auth))
}

pub fn build_router(state: AppState, config: &Config) -> Router {
    let router = api::v1::routes(state.clone()).with_state(state);

    let router = middleware::security_headers::apply(router);
    let router = middleware::cors::apply(router, config);
    middleware::http::apply(router)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
