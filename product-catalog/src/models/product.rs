use mongodb::bson::{Bson, Document, doc, oid::ObjectId};
use serde::{Deserialize, Serialize, Serializer};

use super::{Category, CategoryResponse, id_string};

/// Product document as stored in the `products` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub about: String,
    pub price: f64,
    #[serde(rename = "categoryIds", default)]
    pub category_ids: Vec<ObjectId>,
}

/// Product with its referenced categories joined in at read time.
///
/// Ids are read as raw `Bson` so documents keyed by plain strings list too.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProductWithCategories {
    #[serde(rename = "_id")]
    pub id: Bson,
    pub name: String,
    pub about: String,
    pub price: f64,
    #[serde(rename = "categoryIds", default)]
    pub category_ids: Vec<Bson>,
    #[serde(default)]
    pub categories: Vec<Category>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateProductRequest {
    pub name: String,
    pub about: String,
    pub price: f64,
    pub category_ids: Vec<ObjectId>,
}

/// Identity used to address a product on delete.
///
/// Ids that parse as an ObjectId match the generated `_id`; anything else
/// is matched verbatim so documents keyed by plain strings stay reachable.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductId {
    ObjectId(ObjectId),
    Raw(String),
}

impl ProductId {
    pub fn parse(raw: &str) -> Self {
        match ObjectId::parse_str(raw) {
            Ok(id) => ProductId::ObjectId(id),
            Err(_) => ProductId::Raw(raw.to_string()),
        }
    }

    pub fn filter(&self) -> Document {
        let id = match self {
            ProductId::ObjectId(id) => Bson::ObjectId(*id),
            ProductId::Raw(raw) => Bson::String(raw.clone()),
        };

        doc! { "_id": id }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub about: String,
    #[serde(serialize_with = "serialize_price")]
    pub price: f64,
    #[serde(rename = "categoryIds")]
    pub category_ids: Vec<String>,
}

/// Whole prices are written without a fraction, so `2` echoes as `2`.
fn serialize_price<S: Serializer>(price: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

    if price.fract() == 0.0 && price.abs() <= MAX_SAFE_INTEGER {
        serializer.serialize_i64(*price as i64)
    } else {
        serializer.serialize_f64(*price)
    }
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: product.name,
            about: product.about,
            price: product.price,
            category_ids: product.category_ids.iter().map(|id| id.to_hex()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductWithCategoriesResponse {
    #[serde(flatten)]
    pub product: ProductResponse,
    pub categories: Vec<CategoryResponse>,
}

impl From<ProductWithCategories> for ProductWithCategoriesResponse {
    fn from(joined: ProductWithCategories) -> Self {
        let product = ProductResponse {
            id: id_string(&joined.id),
            name: joined.name,
            about: joined.about,
            price: joined.price,
            category_ids: joined.category_ids.iter().map(id_string).collect(),
        };

        Self {
            product,
            categories: joined.categories.into_iter().map(Into::into).collect(),
        }
    }
}

/// Store acknowledgment of a delete; a no-op delete reports a zero count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    const HEX: &str = "65a1b2c3d4e5f60718293a4b";

    #[test]
    fn object_id_strings_filter_by_object_id() {
        let id = ProductId::parse(HEX);

        assert_eq!(id, ProductId::ObjectId(ObjectId::parse_str(HEX).unwrap()));
        assert_eq!(
            id.filter(),
            doc! { "_id": ObjectId::parse_str(HEX).unwrap() }
        );
    }

    #[test]
    fn other_strings_filter_verbatim() {
        let id = ProductId::parse("legacy-42");

        assert_eq!(id.filter(), doc! { "_id": "legacy-42" });
    }

    #[test]
    fn response_renders_ids_as_hex() {
        let category_id = ObjectId::new();
        let product = Product {
            id: Some(ObjectId::parse_str(HEX).unwrap()),
            name: "Pen".to_string(),
            about: "Blue ink".to_string(),
            price: 1.5,
            category_ids: vec![category_id],
        };

        let body = serde_json::to_value(ProductResponse::from(product)).unwrap();

        assert_eq!(
            body,
            json!({
                "_id": HEX,
                "name": "Pen",
                "about": "Blue ink",
                "price": 1.5,
                "categoryIds": [category_id.to_hex()],
            })
        );
    }

    #[test]
    fn joined_categories_are_flattened_next_to_product_fields() {
        let category_id = ObjectId::new();
        let joined = ProductWithCategories {
            id: Bson::ObjectId(ObjectId::new()),
            name: "Pen".to_string(),
            about: "Blue ink".to_string(),
            price: 1.5,
            category_ids: vec![Bson::ObjectId(category_id)],
            categories: vec![Category {
                id: Some(Bson::ObjectId(category_id)),
                name: "Office".to_string(),
            }],
        };

        let body = serde_json::to_value(ProductWithCategoriesResponse::from(joined)).unwrap();

        assert_eq!(body["name"], "Pen");
        assert_eq!(body["categoryIds"], json!([category_id.to_hex()]));
        assert_eq!(body["categories"][0]["name"], "Office");
        assert_eq!(body["categories"][0]["_id"], category_id.to_hex());
    }

    #[test]
    fn aggregate_documents_deserialize_with_categories() {
        let product_id = ObjectId::new();
        let category_id = ObjectId::new();
        let document = doc! {
            "_id": product_id,
            "name": "Pen",
            "about": "Blue ink",
            "price": 3,
            "categoryIds": [category_id],
            "categories": [{ "_id": category_id, "name": "Office" }],
        };

        let joined: ProductWithCategories = mongodb::bson::from_document(document).unwrap();

        assert_eq!(joined.id, Bson::ObjectId(product_id));
        assert_eq!(joined.price, 3.0);
        assert_eq!(joined.categories.len(), 1);
        assert_eq!(joined.categories[0].id, Some(Bson::ObjectId(category_id)));
    }

    #[test]
    fn documents_keyed_by_plain_strings_are_listed() {
        let document = doc! {
            "_id": "legacy-42",
            "name": "Pen",
            "about": "Blue ink",
            "price": 2,
            "categoryIds": ["cat-1"],
            "categories": [{ "_id": "cat-1", "name": "Office" }],
        };

        let joined: ProductWithCategories = mongodb::bson::from_document(document).unwrap();
        let body = serde_json::to_value(ProductWithCategoriesResponse::from(joined)).unwrap();

        assert_eq!(body["_id"], "legacy-42");
        assert_eq!(body["categoryIds"], json!(["cat-1"]));
        assert_eq!(body["categories"][0]["_id"], "cat-1");
    }

    #[test]
    fn whole_prices_serialize_without_a_fraction() {
        let product = Product {
            id: Some(ObjectId::parse_str(HEX).unwrap()),
            name: "Pen".to_string(),
            about: "Blue ink".to_string(),
            price: 2.0,
            category_ids: Vec::new(),
        };

        let text = serde_json::to_string(&ProductResponse::from(product)).unwrap();

        assert!(text.contains("\"price\":2,"), "{}", text);
    }

    #[test]
    fn delete_response_uses_store_field_names() {
        let body = serde_json::to_value(DeleteResponse {
            acknowledged: true,
            deleted_count: 1,
        })
        .unwrap();

        assert_eq!(body, json!({ "acknowledged": true, "deletedCount": 1 }));
    }
}
