use serde::de::DeserializeOwned;
use serde_json::Value;
use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

use super::issue::{Issue, IssueList, PathSegment, UNDEFINED, received_type};

/// A request body checked with `validator`.
pub trait Body: DeserializeOwned + Validate {
    /// Checked fields in the order issues are reported, each with the JSON
    /// type it expects.
    const FIELDS: &'static [(&'static str, &'static str)];
}

/// Deserializes and validates a JSON body. Unknown keys are ignored.
pub fn parse<T: Body>(value: Value) -> Result<T, IssueList> {
    if !value.is_object() {
        return Err(IssueList::single(Issue::invalid_type(
            Vec::new(),
            "object",
            received_type(&value),
        )));
    }

    let body: T = serde_json::from_value(value)
        .map_err(|e| IssueList::single(Issue::mismatched(e.to_string())))?;
    body.validate().map_err(|e| to_issues(&e, T::FIELDS))?;

    Ok(body)
}

/// Flattens `validator` errors into issues, ordered by `fields`.
pub fn to_issues(errors: &ValidationErrors, fields: &[(&'static str, &'static str)]) -> IssueList {
    let mut issues = Vec::new();
    for &(field, expected) in fields {
        let Some(ValidationErrorsKind::Field(failures)) = errors.errors().get(field) else {
            continue;
        };
        for failure in failures {
            issues.extend(field_issues(field, expected, failure));
        }
    }

    if issues.is_empty() {
        issues.push(Issue::custom(Vec::new(), errors.to_string()));
    }

    IssueList { issues }
}

fn field_issues(field: &'static str, expected: &'static str, failure: &ValidationError) -> Vec<Issue> {
    let path = vec![PathSegment::from(field)];

    match failure.code.as_ref() {
        "required" => vec![Issue::invalid_type(path, expected, UNDEFINED)],
        "range" => {
            let minimum = failure
                .params
                .get("exclusive_min")
                .and_then(Value::as_f64)
                .unwrap_or(0.0);
            vec![Issue::not_greater_than(path, minimum as i64)]
        }
        "blank" => vec![Issue::string_too_short(path, 1)],
        _ => {
            let message = failure
                .message
                .as_deref()
                .unwrap_or("Invalid input")
                .to_string();

            // Element checks name the offending positions.
            match failure.params.get("indices").and_then(Value::as_array) {
                Some(indices) => indices
                    .iter()
                    .filter_map(Value::as_u64)
                    .map(|index| {
                        Issue::custom(
                            vec![PathSegment::from(field), PathSegment::Index(index as usize)],
                            message.clone(),
                        )
                    })
                    .collect(),
                None => vec![Issue::custom(path, message)],
            }
        }
    }
}
