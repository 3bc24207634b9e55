//! Shape validation for inbound review-request bodies.
//!
//! Validation is deliberately type-only: every field must be present with
//! the right JSON type, and `category` (when present) must be one of the
//! three known labels. No semantic checks (URL well-formedness, non-empty
//! strings) are performed.

use serde_json::Value;

use crate::base::types::{Category, ReviewRequestEvent};

/// A single shape violation found in the request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: &'static str,
    pub expected: &'static str,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "`{}` must be {}", self.field, self.expected)
    }
}

fn violation(field: &'static str, expected: &'static str) -> Violation {
    Violation { field, expected }
}

/// Validates a parsed JSON body against the review-request shape.
///
/// Returns the typed event, or every violation found. All checks run even
/// after the first failure so the caller can report the full list.
pub fn validate(body: &Value) -> Result<ReviewRequestEvent, Vec<Violation>> {
    let Some(object) = body.as_object() else {
        return Err(vec![violation("body", "a JSON object")]);
    };

    let mut violations = Vec::new();

    let reviewers = match object.get("reviewers").and_then(Value::as_array) {
        Some(elements) => {
            let strings: Option<Vec<String>> = elements.iter().map(|e| e.as_str().map(str::to_string)).collect();
            match strings {
                Some(reviewers) => Some(reviewers),
                None => {
                    violations.push(violation("reviewers", "an array of strings"));
                    None
                }
            }
        }
        None => {
            violations.push(violation("reviewers", "an array of strings"));
            None
        }
    };

    let repository = require_string(object, "repository", &mut violations);
    let pr_id = match object.get("pr_id").and_then(Value::as_i64) {
        Some(id) => Some(id),
        None => {
            violations.push(violation("pr_id", "an integer"));
            None
        }
    };
    let pr_url = require_string(object, "pr_url", &mut violations);
    let pr_title = require_string(object, "pr_title", &mut violations);

    // Absent category means the legacy/default framing; anything present
    // must be one of the three labels.
    let category = match object.get("category") {
        None => Some(None),
        Some(value) => match serde_json::from_value::<Category>(value.clone()) {
            Ok(category) => Some(Some(category)),
            Err(_) => {
                violations.push(violation("category", "one of \"feature\", \"release\", \"hotfix\""));
                None
            }
        },
    };

    if !violations.is_empty() {
        return Err(violations);
    }

    // All Options are Some here; the checks above pushed a violation otherwise.
    Ok(ReviewRequestEvent {
        reviewers: reviewers.unwrap(),
        repository: repository.unwrap(),
        pr_id: pr_id.unwrap(),
        pr_url: pr_url.unwrap(),
        pr_title: pr_title.unwrap(),
        category: category.unwrap(),
    })
}

fn require_string(object: &serde_json::Map<String, Value>, field: &'static str, violations: &mut Vec<Violation>) -> Option<String> {
    match object.get(field).and_then(Value::as_str) {
        Some(value) => Some(value.to_string()),
        None => {
            violations.push(violation(field, "a string"));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn valid_body() -> Value {
        json!({
            "reviewers": ["alice", "bob"],
            "repository": "acme/widgets",
            "pr_id": 42,
            "pr_url": "https://example.com/acme/widgets/pull/42",
            "pr_title": "Add frobnicator",
            "category": "feature",
        })
    }

    #[test]
    fn accepts_a_well_shaped_body() {
        let event = validate(&valid_body()).unwrap();

        assert_eq!(event.reviewers, vec!["alice", "bob"]);
        assert_eq!(event.repository, "acme/widgets");
        assert_eq!(event.pr_id, 42);
        assert_eq!(event.category, Some(Category::Feature));
    }

    #[test]
    fn accepts_a_body_without_category() {
        let mut body = valid_body();
        body.as_object_mut().unwrap().remove("category");

        let event = validate(&body).unwrap();
        assert_eq!(event.category, None);
    }

    #[test]
    fn rejects_a_non_object_body() {
        let violations = validate(&json!([1, 2, 3])).unwrap_err();
        assert_eq!(violations[0].field, "body");
    }

    #[test]
    fn rejects_wrongly_typed_fields() {
        let mut body = valid_body();
        body["reviewers"] = json!(["alice", 7]);
        body["pr_id"] = json!("42");

        let violations = validate(&body).unwrap_err();
        let fields: Vec<_> = violations.iter().map(|v| v.field).collect();

        assert_eq!(fields, vec!["reviewers", "pr_id"]);
    }

    #[test]
    fn rejects_a_missing_field() {
        let mut body = valid_body();
        body.as_object_mut().unwrap().remove("pr_title");

        let violations = validate(&body).unwrap_err();
        assert_eq!(violations, vec![Violation { field: "pr_title", expected: "a string" }]);
    }

    #[test]
    fn rejects_an_unknown_category() {
        let mut body = valid_body();
        body["category"] = json!("chore");

        let violations = validate(&body).unwrap_err();
        assert_eq!(violations[0].field, "category");
    }

    #[test]
    fn rejects_a_fractional_pr_id() {
        let mut body = valid_body();
        body["pr_id"] = json!(42.5);

        let violations = validate(&body).unwrap_err();
        assert_eq!(violations[0].field, "pr_id");
    }

    #[test]
    fn does_not_enforce_semantics() {
        // Empty strings and a nonsense URL are shape-valid on purpose.
        let body = json!({
            "reviewers": [],
            "repository": "",
            "pr_id": 0,
            "pr_url": "not a url",
            "pr_title": "",
        });

        assert!(validate(&body).is_ok());
    }
}
