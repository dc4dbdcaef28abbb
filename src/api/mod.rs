//! HTTP layer exposing the triage analyzer.

pub mod routes;
pub mod types;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::{config::Settings, nlp::ner::EntityExtractor, triage::RiskAnalyzer};

#[derive(Clone)]
pub struct AppState {
    pub analyzer: RiskAnalyzer,
    pub extractor: Arc<dyn EntityExtractor>,
}

/// Build the router without binding a socket.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/api/analyze", post(routes::analyze_transcript))
        .route("/api/analyze/entities", post(routes::analyze_entities))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(settings: Settings, host: String, port: u16) -> Result<()> {
    let (analyzer, extractor) = crate::triage::build(&settings)?;
    let app = router(AppState {
        analyzer,
        extractor,
    });

    let addr: SocketAddr = format!("{host}:{port}").parse()?;
    info!(%addr, "serving ae-triage API");
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(%err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
