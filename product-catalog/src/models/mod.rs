mod category;
mod product;

pub use category::*;
pub use product::*;

use mongodb::bson::Bson;

/// Renders a stored `_id`: ObjectIds as hex, strings as they are.
pub fn id_string(id: &Bson) -> String {
    match id {
        Bson::ObjectId(id) => id.to_hex(),
        Bson::String(id) => id.clone(),
        other => other.to_string(),
    }
}
