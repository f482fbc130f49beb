//! Document model shared by every store adapter
//!
//! Documents are schemaless JSON objects keyed by a string identifier. The
//! helpers here implement the merge and ordering rules that all adapters
//! agree on.

use std::cmp::Ordering;

use serde_json::{Map, Value};

/// A stored document: a JSON object
pub type Document = Map<String, Value>;

/// Comparison operators supported by `count_where`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    GreaterThan,
    GreaterOrEqual,
    LessThan,
    LessOrEqual,
    Equal,
}

impl Comparison {
    /// Evaluate `lhs <op> rhs`
    pub fn matches(&self, lhs: f64, rhs: f64) -> bool {
        match self {
            Comparison::GreaterThan => lhs > rhs,
            Comparison::GreaterOrEqual => lhs >= rhs,
            Comparison::LessThan => lhs < rhs,
            Comparison::LessOrEqual => lhs <= rhs,
            Comparison::Equal => lhs == rhs,
        }
    }

    /// SQL spelling of the operator
    pub fn as_sql(&self) -> &'static str {
        match self {
            Comparison::GreaterThan => ">",
            Comparison::GreaterOrEqual => ">=",
            Comparison::LessThan => "<",
            Comparison::LessOrEqual => "<=",
            Comparison::Equal => "=",
        }
    }
}

/// Apply `patch` over `base`, top-level keys only.
///
/// Arrays and nested objects in `patch` replace the stored value whole.
pub fn merge_shallow(mut base: Document, patch: &Document) -> Document {
    for (key, value) in patch {
        base.insert(key.clone(), value.clone());
    }
    base
}

/// Numeric value of a top-level field, if present
pub fn numeric_field(doc: &Document, field: &str) -> Option<f64> {
    doc.get(field).and_then(Value::as_f64)
}

/// Order two keyed documents by `field` descending, then key ascending.
///
/// Documents without a numeric value sort as zero.
pub fn score_order(field: &str, a: (&str, &Document), b: (&str, &Document)) -> Ordering {
    let score_a = numeric_field(a.1, field).unwrap_or(0.0);
    let score_b = numeric_field(b.1, field).unwrap_or(0.0);
    score_b
        .partial_cmp(&score_a)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.0.cmp(b.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_merge_replaces_arrays_whole() {
        let base = doc(json!({"displayName": "A", "interests": ["X", "W"]}));
        let patch = doc(json!({"interests": ["Y"], "bio": "hello"}));

        let merged = merge_shallow(base, &patch);
        assert_eq!(merged["displayName"], json!("A"));
        assert_eq!(merged["interests"], json!(["Y"]));
        assert_eq!(merged["bio"], json!("hello"));
    }

    #[test]
    fn test_numeric_field() {
        let d = doc(json!({"totalScore": 12, "nickname": "n"}));
        assert_eq!(numeric_field(&d, "totalScore"), Some(12.0));
        assert_eq!(numeric_field(&d, "nickname"), None);
        assert_eq!(numeric_field(&d, "missing"), None);
    }

    #[test]
    fn test_score_order_breaks_ties_by_key() {
        let high = doc(json!({"totalScore": 10}));
        let low = doc(json!({"totalScore": 5}));

        assert_eq!(
            score_order("totalScore", ("b", &high), ("a", &low)),
            Ordering::Less
        );
        assert_eq!(
            score_order("totalScore", ("a", &high), ("b", &high)),
            Ordering::Less
        );
    }

    #[test]
    fn test_comparison() {
        assert!(Comparison::GreaterThan.matches(2.0, 1.0));
        assert!(!Comparison::GreaterThan.matches(1.0, 1.0));
        assert!(Comparison::LessOrEqual.matches(1.0, 1.0));
        assert_eq!(Comparison::GreaterOrEqual.as_sql(), ">=");
    }
}
