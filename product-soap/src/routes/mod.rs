mod health;
mod products;

use axum::{
    Router,
    extract::OriginalUri,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use crate::AppState;

pub fn create_router(soap_path: &str) -> Router<AppState> {
    Router::new()
        .route(
            soap_path,
            get(products::wsdl)
                .post(products::soap_endpoint)
                .fallback(not_found),
        )
        .route("/health", get(health::health_check).fallback(not_found))
        .route(
            "/health/ready",
            get(health::readiness_check).fallback(not_found),
        )
        .fallback(not_found)
}

pub async fn not_found(OriginalUri(uri): OriginalUri) -> impl IntoResponse {
    (StatusCode::NOT_FOUND, format!("404: Not Found: {}", uri))
}
