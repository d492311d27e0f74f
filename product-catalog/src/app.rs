use axum::{Router, extract::DefaultBodyLimit};
use http::{HeaderValue, Method, header};
use mongodb::Database;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    config::AppConfig,
    database,
    error::{AppError, Result},
    routes,
};

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
}

pub async fn build(config: &AppConfig) -> Result<Router> {
    let db = database::connect(&config.database).await?;

    router(config, AppState { db })
}

pub fn router(config: &AppConfig, state: AppState) -> Result<Router> {
    let mut app = routes::create_router()
        .layer(DefaultBodyLimit::max(config.server.max_body_size))
        .layer(TraceLayer::new_for_http());

    if let Some(cors) = cors_layer(&config.cors.allowed_origins)? {
        app = app.layer(cors);
    }

    Ok(app.with_state(state))
}

fn cors_layer(origins: &[String]) -> Result<Option<CorsLayer>> {
    if origins.is_empty() {
        return Ok(None);
    }

    let allowed_origins: Vec<HeaderValue> = origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .map_err(|_| AppError::ConfigError(format!("Invalid CORS origin: {}", origin)))
        })
        .collect::<Result<Vec<_>>>()?;

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .allow_origin(allowed_origins);

    Ok(Some(cors))
}
