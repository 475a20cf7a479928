/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the manifest loader and the UI layer. Every manifest entry is
/// normalized exactly once, right after it is fetched, so the query
/// engine and the views never branch on the legacy record shapes.

use chrono::{DateTime, NaiveDate};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Document kind used when a record doesn't say
pub const DEFAULT_KIND: &str = "PDF";

/// Prefix for links derived from a bare `filename`
pub const MATERIALS_PREFIX: &str = "/materials";

/// Identity of a record in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordId {
    /// The `id` field from the manifest (numbers are kept as their text)
    Given(String),
    /// Assigned at ingestion from the record's position in the manifest
    Synthetic(usize),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Given(id) => write!(f, "{}", id),
            RecordId::Synthetic(index) => write!(f, "auto-{}", index),
        }
    }
}

/// Represents a single document in the catalog
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogRecord {
    /// Stable identity, never regenerated after ingestion
    pub id: RecordId,
    /// Display title (empty if missing)
    pub title: String,
    /// Subject label, e.g. "Science" (empty if missing)
    pub subject: String,
    /// Resolved class standard (e.g. "10"), None if the record has none
    pub standard: Option<String>,
    /// Document kind, "PDF" unless the record says otherwise
    pub kind: String,
    /// Date as written in the manifest
    pub date_raw: Option<String>,
    /// Parsed calendar date, None if missing or unparseable
    pub date: Option<NaiveDate>,
    /// `url`, or `/materials/<filename>`, or None if neither is present
    pub link: Option<String>,
}

impl CatalogRecord {
    /// Normalize one loose manifest object.
    ///
    /// `index` is the element position in the manifest and only matters
    /// when the object carries no usable `id`.
    pub fn from_json(index: usize, object: &Map<String, Value>) -> Self {
        let id = object
            .get("id")
            .and_then(scalar_text)
            .filter(|id| !id.is_empty())
            .map(RecordId::Given)
            .unwrap_or(RecordId::Synthetic(index));

        let date_raw = object.get("date").and_then(scalar_text);
        let date = date_raw.as_deref().and_then(parse_date);

        let link = object
            .get("url")
            .and_then(scalar_text)
            .filter(|url| !url.is_empty())
            .or_else(|| {
                object
                    .get("filename")
                    .and_then(scalar_text)
                    .filter(|name| !name.is_empty())
                    .map(|name| format!("{}/{}", MATERIALS_PREFIX, name))
            });

        CatalogRecord {
            id,
            title: object.get("title").and_then(scalar_text).unwrap_or_default(),
            subject: object.get("subject").and_then(scalar_text).unwrap_or_default(),
            standard: resolve_standard(object),
            kind: object
                .get("type")
                .and_then(scalar_text)
                .filter(|kind| !kind.is_empty())
                .unwrap_or_else(|| DEFAULT_KIND.to_string()),
            date_raw,
            date,
            link,
        }
    }

    /// Year shown on the compact card ("2024" from "2024-03-01")
    pub fn year(&self) -> Option<&str> {
        self.date_raw
            .as_deref()
            .and_then(|raw| raw.split('-').next())
            .filter(|year| !year.is_empty())
    }

    /// "Class 10", or None when the record has no class
    pub fn class_label(&self) -> Option<String> {
        self.standard.as_ref().map(|std| format!("Class {}", std))
    }

    /// Colour family for the subject badge
    pub fn accent(&self) -> SubjectAccent {
        SubjectAccent::for_subject(&self.subject)
    }
}

/// Colour families used for subject badges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubjectAccent {
    Science,
    Maths,
    English,
    Social,
    Neutral,
}

impl SubjectAccent {
    /// Pick an accent by substring so "Social Science" and "Mathematics" still match
    pub fn for_subject(subject: &str) -> Self {
        let subject = subject.to_lowercase();
        // "social science" contains "science", check it first
        if subject.contains("social") {
            SubjectAccent::Social
        } else if subject.contains("science") {
            SubjectAccent::Science
        } else if subject.contains("math") {
            SubjectAccent::Maths
        } else if subject.contains("english") {
            SubjectAccent::English
        } else {
            SubjectAccent::Neutral
        }
    }
}

/// Resolve the class of a record.
///
/// Order: a non-empty `standard`, then the first element of a legacy
/// `class` array, then a scalar `class`. Numbers are coerced to text.
fn resolve_standard(object: &Map<String, Value>) -> Option<String> {
    let standard = object
        .get("standard")
        .and_then(scalar_text)
        .filter(|std| !std.trim().is_empty());

    standard
        .or_else(|| match object.get("class") {
            Some(Value::Array(values)) => values.first().and_then(scalar_text),
            Some(value) => scalar_text(value),
            None => None,
        })
        .map(|std| std.trim().to_string())
        .filter(|std| !std.is_empty())
}

/// Text form of a JSON string or number. Anything else counts as missing.
///
/// Whole floats print without a fraction (`10.0` -> "10") so they compare
/// equal to the integer and string spellings of the same class.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) if number.is_f64() => number.as_f64().map(|float| {
            if float.fract() == 0.0 && float.abs() < 1e15 {
                format!("{}", float as i64)
            } else {
                float.to_string()
            }
        }),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// Parse the date formats seen in manifests
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y/%m/%d"))
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

/// Turn a record link into something the system browser can open.
///
/// Absolute URLs pass through; site-relative paths like
/// `/materials/class10/science/unit1.pdf` are joined onto `base`.
pub fn resolve_link(link: &str, base: &str) -> Option<Url> {
    if let Ok(url) = Url::parse(link) {
        return Some(url);
    }
    Url::parse(base).ok()?.join(link).ok()
}
