use mongodb::Database;

use crate::{
    database::CATEGORIES,
    error::Result,
    models::{Category, CreateCategoryRequest},
};

pub async fn create_category(db: &Database, req: CreateCategoryRequest) -> Result<Category> {
    let mut category = Category {
        id: None,
        name: req.name,
    };

    let ack = db
        .collection::<Category>(CATEGORIES)
        .insert_one(&category)
        .await?;

    category.id = Some(ack.inserted_id);

    Ok(category)
}
