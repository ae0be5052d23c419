use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::{cors::CorsLayer, trace::TraceLayer};

use guidance_backend::config::Config;
use guidance_backend::db::Database;
use guidance_backend::engine::GuidanceEngine;
use guidance_backend::ingest::TelemetryIngestor;
use guidance_backend::logging;
use guidance_backend::routes;
use guidance_backend::state::AppState;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let config = Config::from_env();
    let _log_guard = logging::init_tracing(&config.log_level);

    let db = match Database::from_env().await {
        Ok(db) => Some(db),
        Err(err) => {
            tracing::warn!(error = %err, "database not initialized, telemetry disabled");
            None
        }
    };

    let engine = Arc::new(GuidanceEngine::bootstrap());

    let ingestor = match (&db, &config.redis_url) {
        (Some(db), Some(redis_url)) => {
            let ingestor = Arc::new(TelemetryIngestor::new(Arc::clone(db), redis_url.clone()));
            Arc::clone(&ingestor).start().await;
            Some(ingestor)
        }
        (None, Some(_)) => {
            tracing::warn!("REDIS_URL set but no database, telemetry ingestion disabled");
            None
        }
        _ => {
            tracing::info!("REDIS_URL not set, telemetry ingestion disabled");
            None
        }
    };

    let state = AppState::new(db, engine, ingestor.clone());

    let app = routes::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = config.bind_addr();
    tracing::info!(%addr, "guidance backend listening");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("bind listener failed");

    let server = axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal());

    if let Err(e) = server.await {
        tracing::error!(error = %e, "server error");
    }

    tracing::info!("HTTP server stopped, initiating graceful shutdown sequence");

    if let Some(ref ingestor) = ingestor {
        ingestor.stop().await;
    }

    tracing::info!("Graceful shutdown complete");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate()).expect("failed to install SIGTERM handler");
        sigterm.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
