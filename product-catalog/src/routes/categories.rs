use axum::{Json, body::Bytes, extract::State};

use crate::{
    AppState, error::Result, models::CategoryResponse, queries::category_queries, validation,
};

pub async fn create_category(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<CategoryResponse>> {
    let payload = super::json_body(&body)?;
    let req = validation::create_category(payload)?;

    let category = category_queries::create_category(&state.db, req).await?;

    Ok(Json(category.into()))
}
