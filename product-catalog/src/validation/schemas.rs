use mongodb::bson::oid::ObjectId;
use serde::Deserialize;
use serde_json::Value;
use validator::{Validate, ValidationError};

use super::{Body, Issue, IssueList, parse, to_issues};
use crate::models::{CreateCategoryRequest, CreateProductRequest, ProductId};

/// `{ name: string, about: string, price: number > 0, categoryIds: string[] }`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProductBody {
    #[validate(required)]
    pub name: Option<String>,
    #[validate(required)]
    pub about: Option<String>,
    #[validate(required, range(exclusive_min = 0.0))]
    pub price: Option<f64>,
    #[serde(rename = "categoryIds")]
    #[validate(required, custom(function = "object_ids"))]
    pub category_ids: Option<Vec<String>>,
}

impl Body for CreateProductBody {
    const FIELDS: &'static [(&'static str, &'static str)] = &[
        ("name", "string"),
        ("about", "string"),
        ("price", "number"),
        ("categoryIds", "array"),
    ];
}

impl CreateProductBody {
    fn into_request(self) -> Option<CreateProductRequest> {
        let category_ids = self
            .category_ids?
            .iter()
            .map(|id| ObjectId::parse_str(id).ok())
            .collect::<Option<Vec<_>>>()?;

        Some(CreateProductRequest {
            name: self.name?,
            about: self.about?,
            price: self.price?,
            category_ids,
        })
    }
}

/// `{ name: string }`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCategoryBody {
    #[validate(required)]
    pub name: Option<String>,
}

impl Body for CreateCategoryBody {
    const FIELDS: &'static [(&'static str, &'static str)] = &[("name", "string")];
}

#[derive(Debug, Clone, Validate)]
pub struct ProductIdParams {
    #[validate(custom(function = "not_blank"))]
    pub id: String,
}

fn object_ids(ids: &[String]) -> Result<(), ValidationError> {
    let invalid: Vec<usize> = ids
        .iter()
        .enumerate()
        .filter(|(_, id)| ObjectId::parse_str(id.as_str()).is_err())
        .map(|(index, _)| index)
        .collect();

    if invalid.is_empty() {
        return Ok(());
    }

    let mut err = ValidationError::new("object_id").with_message("Invalid ObjectId".into());
    err.add_param("indices".into(), &invalid);
    Err(err)
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }

    Ok(())
}

/// Validates a product body and converts its category ids to ObjectIds.
pub fn create_product(body: Value) -> Result<CreateProductRequest, IssueList> {
    parse::<CreateProductBody>(body)?
        .into_request()
        .ok_or_else(|| IssueList::single(Issue::custom(Vec::new(), "Invalid input")))
}

pub fn create_category(body: Value) -> Result<CreateCategoryRequest, IssueList> {
    let body = parse::<CreateCategoryBody>(body)?;

    body.name
        .map(|name| CreateCategoryRequest { name })
        .ok_or_else(|| IssueList::single(Issue::custom(Vec::new(), "Invalid input")))
}

/// Product identity from a path segment; must not be blank.
pub fn product_id(raw: &str) -> Result<ProductId, IssueList> {
    let params = ProductIdParams {
        id: raw.to_string(),
    };
    params
        .validate()
        .map_err(|e| to_issues(&e, &[("id", "string")]))?;

    Ok(ProductId::parse(&params.id))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::validation::{IssueCode, PathSegment};

    fn issue_paths(err: &IssueList) -> Vec<String> {
        err.issues
            .iter()
            .map(|i| {
                i.path
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(".")
            })
            .collect()
    }

    #[test]
    fn accepts_a_complete_product() {
        let req = create_product(json!({
            "name": "Pen",
            "about": "Blue ink",
            "price": 1.5,
            "categoryIds": ["65a1b2c3d4e5f60718293a4b"],
            "ignored": true,
        }))
        .unwrap();

        assert_eq!(req.name, "Pen");
        assert_eq!(req.about, "Blue ink");
        assert_eq!(req.price, 1.5);
        assert_eq!(
            req.category_ids,
            vec![ObjectId::parse_str("65a1b2c3d4e5f60718293a4b").unwrap()]
        );
    }

    #[test]
    fn price_only_body_names_the_missing_fields() {
        let err = create_product(json!({ "price": 1.5 })).unwrap_err();

        assert_eq!(issue_paths(&err), vec!["name", "about", "categoryIds"]);
        assert!(err.issues.iter().all(|i| i.message == "Required"));
        assert_eq!(err.issues[2].expected, Some("array"));
    }

    #[test]
    fn non_positive_price_is_rejected() {
        let err = create_product(json!({
            "name": "Pen",
            "about": "Blue ink",
            "price": 0,
            "categoryIds": [],
        }))
        .unwrap_err();

        assert_eq!(err.issues.len(), 1);
        assert_eq!(err.issues[0].code, IssueCode::TooSmall);
        assert_eq!(err.issues[0].path, vec![PathSegment::from("price")]);
    }

    #[test]
    fn malformed_category_ids_are_reported_by_index() {
        let err = create_product(json!({
            "name": "Pen",
            "about": "Blue ink",
            "price": 2,
            "categoryIds": ["65a1b2c3d4e5f60718293a4b", "not-an-id", "also-bad"],
        }))
        .unwrap_err();

        assert_eq!(issue_paths(&err), vec!["categoryIds.1", "categoryIds.2"]);
        assert!(err.issues.iter().all(|i| i.code == IssueCode::Custom));
        assert_eq!(err.issues[0].message, "Invalid ObjectId");
    }

    #[test]
    fn category_requires_a_string_name() {
        assert_eq!(
            create_category(json!({ "name": "Office" })).unwrap().name,
            "Office"
        );

        let err = create_category(json!({ "name": 5 })).unwrap_err();
        assert_eq!(err.issues[0].code, IssueCode::InvalidType);

        let err = create_category(json!({})).unwrap_err();
        assert_eq!(issue_paths(&err), vec!["name"]);
    }

    #[test]
    fn blank_product_ids_are_rejected() {
        let err = product_id("   ").unwrap_err();
        assert_eq!(err.issues[0].code, IssueCode::TooSmall);
        assert_eq!(err.issues[0].path, vec![PathSegment::from("id")]);

        assert!(product_id("").is_err());
        assert_eq!(product_id("abc").unwrap(), ProductId::Raw("abc".to_string()));
    }
}
