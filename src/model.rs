//! Domain types for the boolean builder.
//!
//! These types are storage-agnostic - they don't know about the filesystem.
//! Field names serialize to the same camelCase JSON keys the original web
//! builder used, so persisted records and export files stay interchangeable.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum number of buckets a query model may hold.
pub const MAX_BUCKETS: usize = 8;

/// Operator joining a bucket's group to the next active bucket's group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Operator {
    #[default]
    #[serde(rename = "AND")]
    And,
    #[serde(rename = "OR")]
    Or,
    #[serde(rename = "AND NOT")]
    AndNot,
}

impl Operator {
    /// The exact token emitted into the query string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::And => "AND",
            Operator::Or => "OR",
            Operator::AndNot => "AND NOT",
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Operator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "and" => Ok(Operator::And),
            "or" => Ok(Operator::Or),
            "and-not" | "and not" | "andnot" => Ok(Operator::AndNot),
            other => Err(format!(
                "Unknown operator: {other}. Must be one of: and, or, and-not"
            )),
        }
    }
}

/// How the rendered query is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// One token (group or operator) per line.
    #[default]
    Pretty,
    /// Single line, tokens joined by spaces.
    Minified,
}

impl std::str::FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Ok(OutputMode::Pretty),
            "minified" => Ok(OutputMode::Minified),
            other => Err(format!(
                "Unknown output mode: {other}. Must be: pretty or minified"
            )),
        }
    }
}

/// Cosmetic color tag for a term pill. Ten labels, assigned by position at
/// insertion time (position mod 10) and stored on the term from then on, so
/// reordering never recolors unrelated terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TermColor {
    Lavender,
    Blue,
    Mint,
    Cyan,
    Teal,
    Yellow,
    Orange,
    Red,
    Pink,
    Violet,
}

/// Palette order matters: it is the mod-10 assignment cycle.
pub const TERM_COLORS: [TermColor; 10] = [
    TermColor::Lavender,
    TermColor::Blue,
    TermColor::Mint,
    TermColor::Cyan,
    TermColor::Teal,
    TermColor::Yellow,
    TermColor::Orange,
    TermColor::Red,
    TermColor::Pink,
    TermColor::Violet,
];

impl TermColor {
    pub fn for_position(position: usize) -> TermColor {
        TERM_COLORS[position % TERM_COLORS.len()]
    }
}

/// A single keyword or phrase inside a bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Term {
    pub id: String,
    pub value: String,
    #[serde(rename = "colorKey")]
    pub color_key: TermColor,
}

impl Term {
    /// Build a term for the given insertion position. The caller is
    /// responsible for trimming and rejecting empty values first.
    pub fn new(value: impl Into<String>, position: usize) -> Term {
        Term {
            id: format!("term-{}", Uuid::new_v4()),
            value: value.into(),
            color_key: TermColor::for_position(position),
        }
    }
}

/// An ordered, named collection of terms. Terms are ORed together; the
/// `operator_after` joins this bucket's group to the next active bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    pub id: String,
    pub name: String,
    pub terms: Vec<Term>,
    #[serde(rename = "isEnabled")]
    pub is_enabled: bool,
    #[serde(rename = "operatorAfter")]
    pub operator_after: Operator,
}

impl Bucket {
    /// The positional default bucket: `bucket-N` / `Bucket N`.
    pub fn numbered(n: usize) -> Bucket {
        Bucket {
            id: format!("bucket-{n}"),
            name: format!("Bucket {n}"),
            terms: Vec::new(),
            is_enabled: true,
            operator_after: Operator::And,
        }
    }
}

/// The live unit of work: ordered buckets plus the rendering mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryModel {
    pub buckets: Vec<Bucket>,
    #[serde(rename = "outputMode")]
    pub output_mode: OutputMode,
}

impl Default for QueryModel {
    fn default() -> Self {
        QueryModel {
            buckets: vec![Bucket::numbered(1)],
            output_mode: OutputMode::Pretty,
        }
    }
}

impl QueryModel {
    pub fn bucket(&self, id: &str) -> Option<&Bucket> {
        self.buckets.iter().find(|b| b.id == id)
    }

    /// Parse a persisted state record, tolerating every malformation the
    /// original builder tolerated: missing/unparsable JSON falls back to the
    /// default model, legacy plain-string terms are upgraded in place with a
    /// synthesized id and position-based color, and terms that normalize to
    /// an empty value are dropped.
    pub fn from_persisted(raw: &str) -> QueryModel {
        let parsed: serde_json::Value = match serde_json::from_str(raw) {
            Ok(v) => v,
            Err(_) => return QueryModel::default(),
        };

        let raw_buckets = match parsed.get("buckets").and_then(|b| b.as_array()) {
            Some(buckets) if !buckets.is_empty() => buckets,
            _ => return QueryModel::default(),
        };

        let output_mode = match parsed.get("outputMode").and_then(|m| m.as_str()) {
            Some("minified") => OutputMode::Minified,
            _ => OutputMode::Pretty,
        };

        let mut buckets = Vec::with_capacity(raw_buckets.len());
        for raw_bucket in raw_buckets {
            match normalize_bucket(raw_bucket) {
                Some(bucket) => buckets.push(bucket),
                None => return QueryModel::default(),
            }
        }

        QueryModel {
            buckets,
            output_mode,
        }
    }
}

fn normalize_bucket(raw: &serde_json::Value) -> Option<Bucket> {
    let id = raw.get("id")?.as_str()?.to_string();
    let name = raw
        .get("name")
        .and_then(|n| n.as_str())
        .unwrap_or_default()
        .to_string();
    let is_enabled = raw.get("isEnabled").and_then(|e| e.as_bool()).unwrap_or(true);
    let operator_after = raw
        .get("operatorAfter")
        .and_then(|op| serde_json::from_value(op.clone()).ok())
        .unwrap_or_default();

    let raw_terms = raw.get("terms")?.as_array()?;
    let terms = raw_terms
        .iter()
        .enumerate()
        .map(|(index, term)| normalize_term(term, index))
        .filter(|term| !term.value.is_empty())
        .collect();

    Some(Bucket {
        id,
        name,
        terms,
        is_enabled,
        operator_after,
    })
}

/// Upgrade one persisted term entry. Well-formed `{id, value, colorKey}`
/// objects pass through; legacy plain strings (and anything else) get a
/// fresh id and the position-based color.
fn normalize_term(raw: &serde_json::Value, index: usize) -> Term {
    if raw.is_object() {
        if let Ok(term) = serde_json::from_value::<Term>(raw.clone()) {
            return term;
        }
    }

    let value = raw.as_str().unwrap_or_default().to_string();
    Term {
        id: format!("term-{}", Uuid::new_v4()),
        value,
        color_key: TermColor::for_position(index),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_model_is_one_empty_enabled_bucket() {
        let model = QueryModel::default();
        assert_eq!(model.buckets.len(), 1);
        let bucket = &model.buckets[0];
        assert_eq!(bucket.id, "bucket-1");
        assert_eq!(bucket.name, "Bucket 1");
        assert!(bucket.terms.is_empty());
        assert!(bucket.is_enabled);
        assert_eq!(bucket.operator_after, Operator::And);
        assert_eq!(model.output_mode, OutputMode::Pretty);
    }

    #[test]
    fn color_palette_cycles_every_ten_positions() {
        assert_eq!(TermColor::for_position(0), TermColor::Lavender);
        assert_eq!(TermColor::for_position(9), TermColor::Violet);
        assert_eq!(TermColor::for_position(10), TermColor::Lavender);
        assert_eq!(TermColor::for_position(23), TermColor::Cyan);
    }

    #[test]
    fn operator_serializes_to_exact_tokens() {
        assert_eq!(
            serde_json::to_string(&Operator::AndNot).unwrap(),
            "\"AND NOT\""
        );
        assert_eq!(serde_json::to_string(&Operator::And).unwrap(), "\"AND\"");
        let parsed: Operator = serde_json::from_str("\"OR\"").unwrap();
        assert_eq!(parsed, Operator::Or);
    }

    #[test]
    fn from_persisted_falls_back_on_garbage() {
        assert_eq!(QueryModel::from_persisted("not json"), QueryModel::default());
        assert_eq!(QueryModel::from_persisted("{}"), QueryModel::default());
        assert_eq!(
            QueryModel::from_persisted(r#"{"buckets": [], "outputMode": "minified"}"#),
            QueryModel::default()
        );
    }

    #[test]
    fn from_persisted_upgrades_legacy_string_terms() {
        let raw = r#"{
            "buckets": [{
                "id": "bucket-1",
                "name": "Skills",
                "terms": ["React", "", "TypeScript"],
                "isEnabled": true,
                "operatorAfter": "AND"
            }],
            "outputMode": "minified"
        }"#;
        let model = QueryModel::from_persisted(raw);
        assert_eq!(model.output_mode, OutputMode::Minified);
        let terms = &model.buckets[0].terms;
        assert_eq!(terms.len(), 2);
        assert_eq!(terms[0].value, "React");
        assert_eq!(terms[1].value, "TypeScript");
        assert!(terms[0].id.starts_with("term-"));
        // Colors come from the entry's original position, empty entry included.
        assert_eq!(terms[0].color_key, TermColor::Lavender);
        assert_eq!(terms[1].color_key, TermColor::Mint);
    }

    #[test]
    fn from_persisted_keeps_wellformed_terms_verbatim() {
        let raw = r#"{
            "buckets": [{
                "id": "bucket-1",
                "name": "",
                "terms": [{"id": "term-abc", "value": "SaaS", "colorKey": "pink"}],
                "isEnabled": false,
                "operatorAfter": "AND NOT"
            }],
            "outputMode": "pretty"
        }"#;
        let model = QueryModel::from_persisted(raw);
        let bucket = &model.buckets[0];
        assert!(!bucket.is_enabled);
        assert_eq!(bucket.operator_after, Operator::AndNot);
        assert_eq!(bucket.terms[0].id, "term-abc");
        assert_eq!(bucket.terms[0].color_key, TermColor::Pink);
    }
}
