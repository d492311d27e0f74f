use rust_decimal::Decimal;

use crate::soap::XmlNode;

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub about: String,
    pub price: Decimal,
}

impl Product {
    pub fn into_fields(self) -> Vec<XmlNode> {
        vec![
            XmlNode::Text("id", self.id.to_string()),
            XmlNode::Text("name", self.name),
            XmlNode::Text("about", self.about),
            XmlNode::Text("price", self.price.to_string()),
        ]
    }

    pub fn into_element(self) -> XmlNode {
        XmlNode::Element("product", self.into_fields())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateProductRequest {
    pub name: String,
    pub about: String,
    pub price: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeleteProductRequest {
    pub id: i32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatchPriceRequest {
    pub id: i32,
    pub price: Decimal,
}

/// Fixed acknowledgment returned by `DeleteProduct`.
pub const DELETE_ACK: &str = "DELETE OK";
