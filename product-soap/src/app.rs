use std::sync::Arc;

use axum::{Router, extract::DefaultBodyLimit};
use sqlx::PgPool;
use tower_http::trace::TraceLayer;

use crate::{
    config::AppConfig,
    database,
    error::{AppError, Result},
    routes,
};

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// WSDL document served on `?wsdl`, read once at startup.
    pub wsdl: Arc<str>,
}

pub async fn build(config: &AppConfig) -> Result<Router> {
    let pool = database::create_pool(&config.database)?;
    if config.database.run_migrations {
        database::run_migrations(&pool).await?;
    }

    let wsdl = tokio::fs::read_to_string(&config.soap.wsdl_path)
        .await
        .map_err(|e| {
            AppError::ConfigError(format!(
                "Failed to read WSDL from {}: {}",
                config.soap.wsdl_path, e
            ))
        })?;
    tracing::info!("Loaded WSDL from {}", config.soap.wsdl_path);

    let state = AppState {
        db: pool,
        wsdl: Arc::from(wsdl),
    };

    Ok(router(config, state))
}

pub fn router(config: &AppConfig, state: AppState) -> Router {
    routes::create_router(&config.soap.path)
        .layer(DefaultBodyLimit::max(config.server.max_body_size))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
