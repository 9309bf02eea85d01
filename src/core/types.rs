use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::core::constants::{catalog, http_status};

/// A single book source from a catalog.
///
/// The record is kept as the raw JSON object it was loaded from, so every
/// field (and the field order) survives a validation run untouched. Only
/// [`Entry::url`] is ever read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Entry(Map<String, Value>);

impl Entry {
    /// Wrap an already parsed JSON object.
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Create an entry that only carries a URL.
    ///
    /// # Examples
    /// ```
    /// use bookcheck::core::types::Entry;
    ///
    /// let entry = Entry::from_url("https://example.com");
    /// assert_eq!(entry.url(), Some("https://example.com"));
    /// ```
    pub fn from_url(url: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert(catalog::URL_FIELD.to_string(), Value::String(url.into()));
        Self(fields)
    }

    /// The URL to probe, if the entry has a non-empty `bookSourceUrl` string.
    pub fn url(&self) -> Option<&str> {
        self.0
            .get(catalog::URL_FIELD)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// All fields of the underlying record.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.url() {
            Some(url) => write!(f, "{url}"),
            None => write!(f, "<no {}>", catalog::URL_FIELD),
        }
    }
}

/// The result of probing one entry once.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub entry: Entry,
    pub success: bool,
    /// Status code of the response, when one arrived
    pub status_code: Option<u16>,
    /// Why no response arrived
    pub description: Option<String>,
}

impl Outcome {
    /// Build an outcome from a received HTTP status.
    ///
    /// Only [`http_status::OK`] counts as reachable; redirects that were not
    /// followed, client errors and server errors are all unreachable.
    pub fn from_status(entry: Entry, status_code: u16) -> Self {
        Self {
            entry,
            success: status_code == http_status::OK,
            status_code: Some(status_code),
            description: None,
        }
    }

    /// Build an outcome for a probe that never got a response.
    pub fn unreachable(entry: Entry, description: impl Into<String>) -> Self {
        Self {
            entry,
            success: false,
            status_code: None,
            description: Some(description.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.success
    }

    pub fn is_not_ok(&self) -> bool {
        !self.is_ok()
    }

    pub fn into_entry(self) -> Entry {
        self.entry
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (&self.status_code, &self.description) {
            (Some(num), _) => write!(f, "{} - {}", num, &self.entry),
            (None, Some(desc)) => write!(f, "{} - {}", &self.entry, desc),
            (None, None) => write!(f, "{}", &self.entry),
        }
    }
}

/// Final classification of a catalog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Partition {
    /// Entries that answered 200 on some pass, in completion order
    pub good: Vec<Entry>,
    /// Entries that never answered 200, in completion order of the last pass
    pub error: Vec<Entry>,
    /// Number of passes that were executed
    pub passes: u32,
}

impl Partition {
    /// Number of entries classified, which always equals the input size.
    pub fn total(&self) -> usize {
        self.good.len() + self.error.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}
