//! Autocomplete candidate records

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Greedy on purpose: `"a [b] c [d]"` annotates as `"b] c [d"`.
static ANNOTATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[(.*)\]").expect("annotation pattern is valid"));

/// Opaque identifier of a candidate, as sent by the service
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum CandidateId {
    Int(i64),
    /// Integers above `i64::MAX`
    UInt(u64),
    Text(String),
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CandidateId::Int(n) => write!(f, "{}", n),
            CandidateId::UInt(n) => write!(f, "{}", n),
            CandidateId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for CandidateId {
    fn from(n: i64) -> Self {
        CandidateId::Int(n)
    }
}

impl From<&str> for CandidateId {
    fn from(s: &str) -> Self {
        CandidateId::Text(s.to_string())
    }
}

/// A single autocomplete suggestion
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Missing when the service omitted it or sent something that is not a number or string
    pub id: Option<CandidateId>,
    /// Display text, possibly carrying a bracketed annotation (`"Foo [bar]"`)
    pub name: String,
    /// Ranking score (`match` on the wire)
    pub popularity: f64,
}

impl Candidate {
    pub fn new(id: i64, name: impl Into<String>, popularity: f64) -> Self {
        Self {
            id: Some(CandidateId::Int(id)),
            name: name.into(),
            popularity,
        }
    }

    /// Build a candidate from one element of the service's `autocomplete` array.
    ///
    /// Field problems are tolerated: a missing or odd `id` becomes `None`, a missing
    /// `name` becomes empty and a missing `match` scores zero. Only non-objects are
    /// rejected.
    pub fn from_json(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;

        let id = match obj.get("id") {
            Some(Value::Number(n)) => Some(match (n.as_i64(), n.as_u64()) {
                (Some(i), _) => CandidateId::Int(i),
                (None, Some(u)) => CandidateId::UInt(u),
                (None, None) => CandidateId::Text(n.to_string()),
            }),
            Some(Value::String(s)) => Some(CandidateId::Text(s.clone())),
            _ => None,
        };

        let name = match obj.get("name") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => String::new(),
        };

        let popularity = match obj.get("match") {
            Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
            Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
            _ => 0.0,
        };
        // "NaN" parses as a float but is not a score
        let popularity = if popularity.is_nan() { 0.0 } else { popularity };

        Some(Self {
            id,
            name,
            popularity,
        })
    }

    /// Secondary text extracted from the bracketed part of the name
    pub fn annotation(&self) -> Option<&str> {
        ANNOTATION_RE
            .captures(&self.name)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
            .filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_annotation_extracted_from_brackets() {
        let c = Candidate::new(1, "Music [genre]", 1.0);
        assert_eq!(c.name, "Music [genre]");
        assert_eq!(c.annotation(), Some("genre"));
    }

    #[test]
    fn test_annotation_absent() {
        assert_eq!(Candidate::new(1, "Music", 1.0).annotation(), None);
        assert_eq!(Candidate::new(1, "Music [", 1.0).annotation(), None);
        assert_eq!(Candidate::new(1, "Music []", 1.0).annotation(), None);
    }

    #[test]
    fn test_annotation_is_greedy() {
        let c = Candidate::new(1, "a [b] c [d]", 1.0);
        assert_eq!(c.annotation(), Some("b] c [d"));
    }

    #[test]
    fn test_from_json_full_record() {
        let c = Candidate::from_json(&json!({"id": 7, "name": "Chess", "match": 5})).unwrap();
        assert_eq!(c, Candidate::new(7, "Chess", 5.0));
    }

    #[test]
    fn test_from_json_string_and_float_ids() {
        let c = Candidate::from_json(&json!({"id": "abc", "name": "x", "match": 1.5})).unwrap();
        assert_eq!(c.id, Some(CandidateId::Text("abc".into())));
        assert_eq!(c.popularity, 1.5);

        let c = Candidate::from_json(&json!({"id": 2.5, "name": "x"})).unwrap();
        assert_eq!(c.id, Some(CandidateId::Text("2.5".into())));
    }

    #[test]
    fn test_from_json_tolerates_missing_fields() {
        let c = Candidate::from_json(&json!({})).unwrap();
        assert_eq!(c.id, None);
        assert_eq!(c.name, "");
        assert_eq!(c.popularity, 0.0);

        let c = Candidate::from_json(&json!({"id": null, "name": null, "match": "3"})).unwrap();
        assert_eq!(c.id, None);
        assert_eq!(c.popularity, 3.0);
    }

    #[test]
    fn test_from_json_large_ids_stay_numeric() {
        let c = Candidate::from_json(&json!({"id": u64::MAX, "name": "x"})).unwrap();
        assert_eq!(c.id, Some(CandidateId::UInt(u64::MAX)));
        assert_eq!(serde_json::to_value(c.id.as_ref().unwrap()).unwrap(), json!(u64::MAX));
        assert_eq!(c.id.unwrap().to_string(), "18446744073709551615");

        let c = Candidate::from_json(&json!({"id": -4, "name": "x"})).unwrap();
        assert_eq!(serde_json::to_value(c.id.unwrap()).unwrap(), json!(-4));
    }

    #[test]
    fn test_from_json_nan_score_is_zero() {
        let c = Candidate::from_json(&json!({"id": 1, "name": "Ghost", "match": "NaN"})).unwrap();
        assert_eq!(c.popularity, 0.0);
    }

    #[test]
    fn test_from_json_rejects_non_objects() {
        assert!(Candidate::from_json(&json!("Chess")).is_none());
        assert!(Candidate::from_json(&json!(null)).is_none());
        assert!(Candidate::from_json(&json!([1, 2])).is_none());
    }

    #[test]
    fn test_id_display() {
        assert_eq!(CandidateId::Int(42).to_string(), "42");
        assert_eq!(CandidateId::from("x-1").to_string(), "x-1");
    }
}
