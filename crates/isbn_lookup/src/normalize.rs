//! Conversion of a [`RawBookPayload`] into a [`DisplayBookRecord`].
//!
//! This is the only place where fallbacks for missing data live; a renderer can print every
//! field of a [`DisplayBookRecord`] as is and skip the `Option`al ones when they are `None`.

use serde::Serialize;
use serde_json::{Number, Value};

use crate::payload::{Loose, RawBookPayload, Text};

/// Shown when the record has no title.
pub const UNTITLED: &str = "Untitled";
/// Shown for missing authors, publisher and publication date.
pub const UNKNOWN: &str = "Unknown";
/// Shown when the page count is missing.
pub const NOT_AVAILABLE: &str = "N/A";
/// Cover image used when the record has no thumbnail.
pub const PLACEHOLDER_COVER: &str = "/placeholder-cover.png";

/// A book record where every field is safe to display.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct DisplayBookRecord {
    /// Title, or [`UNTITLED`].
    pub title: String,
    /// Subtitle, not shown when `None`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// Comma separated author names, or [`UNKNOWN`].
    pub authors: String,
    /// Publisher, or [`UNKNOWN`].
    pub publisher: String,
    /// Publication date as given by the source, or [`UNKNOWN`].
    pub published_date: String,
    /// Page count, or [`NOT_AVAILABLE`].
    pub page_count: String,
    /// Cover image URL, or [`PLACEHOLDER_COVER`].
    pub thumbnail: String,
    /// Rating, not shown when `None`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,
    /// Description, not shown when `None`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Comma separated categories.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<String>,
    /// Language code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Upstream source of the record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Average rating together with the number of ratings it is based on.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct Rating {
    /// Average rating.
    pub average: f64,
    /// Number of ratings, `0` when the source did not say.
    pub count: u64,
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} ratings)", self.average, self.count)
    }
}

/// Applies the display defaults to `payload`.
///
/// Never fails: anything missing, `null` or of the wrong shape is replaced by a placeholder or
/// left out.
#[must_use]
pub fn normalize(payload: &RawBookPayload) -> DisplayBookRecord {
    DisplayBookRecord {
        title: text(payload.title.as_ref()).unwrap_or_else(|| UNTITLED.to_owned()),
        subtitle: text(payload.subtitle.as_ref()),
        authors: joined(payload.authors.as_ref()).unwrap_or_else(|| UNKNOWN.to_owned()),
        publisher: text(payload.publisher.as_ref()).unwrap_or_else(|| UNKNOWN.to_owned()),
        published_date: text(payload.published_date.as_ref())
            .unwrap_or_else(|| UNKNOWN.to_owned()),
        page_count: payload
            .page_count
            .as_ref()
            .and_then(Loose::as_valid)
            .and_then(whole_number)
            .unwrap_or_else(|| NOT_AVAILABLE.to_owned()),
        thumbnail: text(payload.thumbnail.as_ref())
            .unwrap_or_else(|| PLACEHOLDER_COVER.to_owned()),
        rating: valid(payload.average_rating.as_ref()).map(|average| Rating {
            average,
            count: valid(payload.ratings_count.as_ref()).unwrap_or_default(),
        }),
        description: payload
            .description
            .as_ref()
            .and_then(Loose::as_valid)
            .map(Text::as_str)
            .and_then(non_blank),
        categories: joined(payload.categories.as_ref()),
        language: text(payload.language.as_ref()),
        source: text(payload.data_source.as_ref()),
    }
}

fn valid<T: Copy>(field: Option<&Loose<T>>) -> Option<T> {
    field.and_then(Loose::as_valid).copied()
}

// non-negative integers, `412.0` included
fn whole_number(n: &Number) -> Option<String> {
    if let Some(n) = n.as_u64() {
        return Some(n.to_string());
    }
    n.as_f64()
        .filter(|f| f.is_finite() && *f >= 0.0 && f.fract().abs() < f64::EPSILON)
        .map(|f| format!("{:.0}", f.abs()))
}

fn text(field: Option<&Loose<String>>) -> Option<String> {
    field
        .and_then(Loose::as_valid)
        .map(String::as_str)
        .and_then(non_blank)
}

fn non_blank(s: &str) -> Option<String> {
    let s = s.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_owned())
    }
}

// `None` unless the field is a list with at least one non-blank string.
fn joined(field: Option<&Loose<Vec<Value>>>) -> Option<String> {
    let items = field
        .and_then(Loose::as_valid)?
        .iter()
        .filter_map(Value::as_str)
        .filter_map(non_blank)
        .collect::<Vec<_>>();

    if items.is_empty() {
        None
    } else {
        Some(items.join(", "))
    }
}
