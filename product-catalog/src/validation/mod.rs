//! Request-body schemas checked with `validator`, reported as field-level
//! issue lists.

mod issue;
mod report;
mod schemas;

pub use issue::{Issue, IssueCode, IssueList, PathSegment};
pub use report::{Body, parse, to_issues};
pub use schemas::{
    CreateCategoryBody, CreateProductBody, ProductIdParams, create_category, create_product,
    product_id,
};
