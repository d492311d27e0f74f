use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::{
    error::Result,
    models::{CreateProductRequest, Product},
};

pub async fn create_product(pool: &PgPool, req: &CreateProductRequest) -> Result<Product> {
    let product = sqlx::query_as::<_, Product>(
        "INSERT INTO products (name, about, price)
         VALUES ($1, $2, $3)
         RETURNING *",
    )
    .bind(&req.name)
    .bind(&req.about)
    .bind(req.price)
    .fetch_one(pool)
    .await?;

    Ok(product)
}

pub async fn get_all(pool: &PgPool) -> Result<Vec<Product>> {
    let products = sqlx::query_as::<_, Product>("SELECT * FROM products")
        .fetch_all(pool)
        .await?;

    Ok(products)
}

/// Returns whether a row was removed.
pub async fn delete_product(pool: &PgPool, id: i32) -> Result<bool> {
    let result = sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn update_price(pool: &PgPool, id: i32, price: Decimal) -> Result<Option<Product>> {
    let product = sqlx::query_as::<_, Product>(
        "UPDATE products
         SET price = $1
         WHERE id = $2
         RETURNING *",
    )
    .bind(price)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(product)
}
