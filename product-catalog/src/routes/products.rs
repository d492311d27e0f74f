use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
};

use crate::{
    AppState,
    error::{AppError, Result},
    models::{DeleteResponse, ProductResponse, ProductWithCategoriesResponse},
    queries::product_queries,
    validation,
};

pub async fn create_product(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ProductResponse>> {
    let payload = super::json_body(&body)?;
    let req = validation::create_product(payload)?;

    let product = product_queries::create_product(&state.db, req).await?;
    tracing::info!(
        "Created product {} with {} categories",
        product.id.map(|id| id.to_hex()).unwrap_or_default(),
        product.category_ids.len()
    );

    Ok(Json(product.into()))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let id = validation::product_id(&id).map_err(AppError::InvalidParams)?;

    let deleted_count = product_queries::delete_product(&state.db, &id).await?;
    tracing::info!("Deleted {} product(s) matching {:?}", deleted_count, id);

    Ok(Json(DeleteResponse {
        acknowledged: true,
        deleted_count,
    }))
}

pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductWithCategoriesResponse>>> {
    let products = product_queries::get_all_with_categories(&state.db).await?;

    Ok(Json(products.into_iter().map(Into::into).collect()))
}
