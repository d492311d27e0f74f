use futures::TryStreamExt;
use mongodb::{
    Database,
    bson::{Bson, doc},
};

use crate::{
    database::{CATEGORIES, PRODUCTS},
    error::{AppError, Result},
    models::{CreateProductRequest, Product, ProductId, ProductWithCategories},
};

pub async fn create_product(db: &Database, req: CreateProductRequest) -> Result<Product> {
    let mut product = Product {
        id: None,
        name: req.name,
        about: req.about,
        price: req.price,
        category_ids: req.category_ids,
    };

    let ack = db
        .collection::<Product>(PRODUCTS)
        .insert_one(&product)
        .await?;

    product.id = Some(inserted_object_id(ack.inserted_id)?);

    Ok(product)
}

/// Returns the number of removed documents.
pub async fn delete_product(db: &Database, id: &ProductId) -> Result<u64> {
    let result = db
        .collection::<Product>(PRODUCTS)
        .delete_one(id.filter())
        .await?;

    Ok(result.deleted_count)
}

/// Every product with its `categoryIds` resolved against `categories`.
pub async fn get_all_with_categories(db: &Database) -> Result<Vec<ProductWithCategories>> {
    let pipeline = vec![
        doc! { "$match": {} },
        doc! {
            "$lookup": {
                "from": CATEGORIES,
                "localField": "categoryIds",
                "foreignField": "_id",
                "as": "categories",
            }
        },
    ];

    let products = db
        .collection::<Product>(PRODUCTS)
        .aggregate(pipeline)
        .with_type::<ProductWithCategories>()
        .await?
        .try_collect()
        .await?;

    Ok(products)
}

fn inserted_object_id(id: Bson) -> Result<mongodb::bson::oid::ObjectId> {
    id.as_object_id().ok_or_else(|| {
        AppError::InternalError(format!("Store returned a non-ObjectId identity: {}", id))
    })
}
