//! Service startup: model loading and the HTTP listener.

use std::sync::Arc;

use creditscore_config::{ConfigError, ServiceConfig};
use creditscore_core::{ClassifierAdapter, CreditScoreError, CreditScorer, FeatureSchema, RandomForest};
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::api::{self, AppState};

/// Fatal startup error.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Model(#[from] CreditScoreError),

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Loads the configured model and wraps it in a [`CreditScorer`].
///
/// Runs once before the listener starts; any failure here stops the process.
pub fn build_scorer(config: &ServiceConfig) -> Result<CreditScorer, ServiceError> {
    let forest = RandomForest::from_json_file(&config.model.path)?;
    let adapter = ClassifierAdapter::new(Arc::new(forest), FeatureSchema::standard())?;
    Ok(CreditScorer::new(adapter, config.metrics.clone()))
}

/// Builds the router with the configured middleware.
pub fn app(config: &ServiceConfig, scorer: CreditScorer) -> axum::Router {
    let state = Arc::new(AppState::new(scorer));
    let router = api::router(state);
    if config.server.cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        router.layer(cors)
    } else {
        router
    }
}

/// Loads the model, binds and serves until the process ends.
pub async fn run(config: ServiceConfig) -> Result<(), ServiceError> {
    config.validate()?;
    let scorer = build_scorer(&config)?;
    let app = app(&config, scorer);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(event = "listening", addr = %addr);

    axum::serve(listener, app).await?;
    Ok(())
}
