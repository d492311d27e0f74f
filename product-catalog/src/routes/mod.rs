mod categories;
mod health;
mod products;

use axum::{
    Router,
    body::Bytes,
    routing::{delete, get, post},
};
use serde_json::{Map, Value};

use crate::{
    AppState,
    error::{AppError, Result},
};

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route(
            "/products",
            get(products::list_products).post(products::create_product),
        )
        .route("/products/{id}", delete(products::delete_product))
        .route("/categories", post(categories::create_category))
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// Parses a JSON request body; an empty body validates as `{}`.
fn json_body(body: &Bytes) -> Result<Value> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }

    serde_json::from_slice(body).map_err(|e| {
        tracing::debug!("Rejected request body: {}", e);
        AppError::BadRequest("Invalid JSON body".to_string())
    })
}
