use std::fmt;

use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    InvalidType,
    TooSmall,
    Custom,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => f.write_str(key),
            PathSegment::Index(index) => write!(f, "{}", index),
        }
    }
}

/// One failed check, located by its path inside the request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Issue {
    pub code: IssueCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<i64>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inclusive: Option<bool>,
    pub path: Vec<PathSegment>,
    pub message: String,
}

impl Issue {
    /// `received` is `undefined` for a missing key, which reads as `Required`.
    pub fn invalid_type(path: Vec<PathSegment>, expected: &'static str, received: &'static str) -> Self {
        let message = if received == UNDEFINED {
            "Required".to_string()
        } else {
            format!("Expected {}, received {}", expected, received)
        };

        Self {
            code: IssueCode::InvalidType,
            expected: Some(expected),
            received: Some(received),
            minimum: None,
            kind: None,
            inclusive: None,
            path,
            message,
        }
    }

    /// Number must be strictly greater than `minimum`.
    pub fn not_greater_than(path: Vec<PathSegment>, minimum: i64) -> Self {
        Self {
            code: IssueCode::TooSmall,
            expected: None,
            received: None,
            minimum: Some(minimum),
            kind: Some("number"),
            inclusive: Some(false),
            path,
            message: format!("Number must be greater than {}", minimum),
        }
    }

    pub fn string_too_short(path: Vec<PathSegment>, minimum: i64) -> Self {
        Self {
            code: IssueCode::TooSmall,
            expected: None,
            received: None,
            minimum: Some(minimum),
            kind: Some("string"),
            inclusive: Some(true),
            path,
            message: format!("String must contain at least {} character(s)", minimum),
        }
    }

    /// Body whose field types the deserializer refused.
    pub fn mismatched(message: impl Into<String>) -> Self {
        Self {
            code: IssueCode::InvalidType,
            expected: None,
            received: None,
            minimum: None,
            kind: None,
            inclusive: None,
            path: Vec::new(),
            message: message.into(),
        }
    }

    pub fn custom(path: Vec<PathSegment>, message: impl Into<String>) -> Self {
        Self {
            code: IssueCode::Custom,
            expected: None,
            received: None,
            minimum: None,
            kind: None,
            inclusive: None,
            path,
            message: message.into(),
        }
    }
}

pub const UNDEFINED: &str = "undefined";

/// JSON type name as reported in `received`.
pub fn received_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IssueList {
    pub issues: Vec<Issue>,
}

impl IssueList {
    pub fn single(issue: Issue) -> Self {
        Self {
            issues: vec![issue],
        }
    }
}

impl fmt::Display for IssueList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let described: Vec<String> = self
            .issues
            .iter()
            .map(|issue| {
                let path: Vec<String> = issue.path.iter().map(ToString::to_string).collect();
                format!("{}: {}", path.join("."), issue.message)
            })
            .collect();

        f.write_str(&described.join("; "))
    }
}

impl std::error::Error for IssueList {}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn missing_field_serializes_as_required() {
        let issue = Issue::invalid_type(vec!["name".into()], "string", UNDEFINED);

        assert_eq!(
            serde_json::to_value(&issue).unwrap(),
            json!({
                "code": "invalid_type",
                "expected": "string",
                "received": "undefined",
                "path": ["name"],
                "message": "Required",
            })
        );
    }

    #[test]
    fn wrong_type_names_both_types() {
        let value = json!(12);
        let issue = Issue::invalid_type(
            vec!["categoryIds".into(), 1.into()],
            "string",
            received_type(&value),
        );

        assert_eq!(issue.message, "Expected string, received number");
        assert_eq!(
            serde_json::to_value(&issue.path).unwrap(),
            json!(["categoryIds", 1])
        );
    }

    #[test]
    fn too_small_carries_bounds() {
        let issue = Issue::not_greater_than(vec!["price".into()], 0);

        assert_eq!(
            serde_json::to_value(&issue).unwrap(),
            json!({
                "code": "too_small",
                "minimum": 0,
                "type": "number",
                "inclusive": false,
                "path": ["price"],
                "message": "Number must be greater than 0",
            })
        );
    }

    #[test]
    fn display_lists_paths_and_messages() {
        let err = IssueList {
            issues: vec![
                Issue::invalid_type(vec!["name".into()], "string", UNDEFINED),
                Issue::custom(vec!["categoryIds".into(), 0.into()], "Invalid ObjectId"),
            ],
        };

        assert_eq!(err.to_string(), "name: Required; categoryIds.0: Invalid ObjectId");
    }
}
