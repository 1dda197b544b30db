//! Wire model of the book service.
//!
//! The service aggregates several upstream sources and none of them agree on which fields are
//! filled in, so every field here is optional and a value of the wrong shape is kept as
//! [`Loose::Malformed`] instead of failing the whole response.

use serde::Deserialize;
use serde_json::{Map, Number, Value};

/// A field value that either has the expected shape or does not.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Loose<T> {
    /// The value deserialized as `T`.
    Valid(T),
    /// Any other JSON value.
    Malformed(Value),
}

impl<T> Loose<T> {
    /// Returns the value if it has the expected shape.
    #[allow(clippy::missing_const_for_fn)] // can't be const
    pub fn valid(self) -> Option<T> {
        match self {
            Self::Valid(value) => Some(value),
            Self::Malformed(_) => None,
        }
    }

    /// Borrowing version of [`Loose::valid`].
    pub const fn as_valid(&self) -> Option<&T> {
        match self {
            Self::Valid(value) => Some(value),
            Self::Malformed(_) => None,
        }
    }
}

/// Free text that some sources wrap in an object, e.g. `{ "type": "/type/text", "value": ".." }`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Text {
    /// A bare string.
    Plain(String),
    /// A typed text object; only the value is kept.
    Typed {
        /// The text itself.
        value: String,
    },
}

impl Text {
    /// The text content regardless of how it was wrapped.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Plain(s) | Self::Typed { value: s } => s,
        }
    }
}

/// Book metadata as returned by the service, before any defaults are applied.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct RawBookPayload {
    /// Main title.
    pub title: Option<Loose<String>>,
    /// Subtitle, rarely present.
    pub subtitle: Option<Loose<String>>,
    /// Author names; entries that are not strings are ignored.
    pub authors: Option<Loose<Vec<Value>>>,
    /// Publisher name.
    pub publisher: Option<Loose<String>>,
    /// Publication date in whatever format the source used.
    pub published_date: Option<Loose<String>>,
    /// Description or blurb.
    pub description: Option<Loose<Text>>,
    /// Number of pages, some sources send it as a float.
    pub page_count: Option<Loose<Number>>,
    /// Cover image URL.
    pub thumbnail: Option<Loose<String>>,
    /// Average user rating.
    pub average_rating: Option<Loose<f64>>,
    /// Number of ratings behind `average_rating`.
    pub ratings_count: Option<Loose<u64>>,
    /// Subject categories; entries that are not strings are ignored.
    pub categories: Option<Loose<Vec<Value>>>,
    /// Language code.
    pub language: Option<Loose<String>>,
    /// Name of the upstream source the record came from.
    pub data_source: Option<Loose<String>>,
}

/// The response envelope: `{ success, data?, message? }`.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ApiResponse {
    /// Application level success flag, anything but `true` is a failure.
    pub success: Option<Loose<bool>>,
    /// The book record on success, kept as an object until [`ApiResponse::into_data`].
    pub data: Option<Loose<Map<String, Value>>>,
    /// A human readable message, usually only set on failure.
    pub message: Option<Loose<String>>,
}

impl ApiResponse {
    /// Whether the server reported success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self.success, Some(Loose::Valid(true)))
    }

    /// The server supplied message, if it is a non-empty string.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message
            .as_ref()
            .and_then(Loose::as_valid)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
    }

    /// Takes the book record out of the envelope if it is an object.
    #[must_use]
    pub fn into_data(self) -> Option<RawBookPayload> {
        let object = self.data.and_then(Loose::valid)?;
        // a struct would also be filled from a sequence
        serde_json::from_value(Value::Object(object)).ok()
    }
}
