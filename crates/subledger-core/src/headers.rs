//! Message header handling.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A single header as handed over by the mail collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Header name as it appeared in the message.
    pub name: String,
    /// Decoded header value.
    pub value: String,
}

impl Header {
    /// Creates a header from a name/value pair.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Ordered collection of message headers with case-insensitive lookup.
///
/// Insertion order is kept for iteration and serialization. Lookups go
/// through a lower-cased name index, so when several headers share a name
/// the first one added wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Header>", into = "Vec<Header>")]
pub struct Headers {
    entries: Vec<Header>,
    index: HashMap<String, Vec<usize>>,
}

impl Headers {
    /// Creates a new empty header collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a header value.
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let header = Header::new(name, value);
        self.index
            .entry(header.name.to_lowercase())
            .or_default()
            .push(self.entries.len());
        self.entries.push(header);
    }

    /// Gets the first value for a header.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.index
            .get(&name.to_lowercase())
            .and_then(|positions| positions.first())
            .map(|&pos| self.entries[pos].value.as_str())
    }

    /// Gets all values for a header, in insertion order.
    #[must_use]
    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.index
            .get(&name.to_lowercase())
            .map(|positions| {
                positions
                    .iter()
                    .map(|&pos| self.entries[pos].value.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Returns an iterator over all headers in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|h| (h.name.as_str(), h.value.as_str()))
    }

    /// Number of headers, counting repeated names separately.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no headers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<Header>> for Headers {
    fn from(entries: Vec<Header>) -> Self {
        let mut headers = Self::new();
        for header in entries {
            headers.add(header.name, header.value);
        }
        headers
    }
}

impl From<Headers> for Vec<Header> {
    fn from(headers: Headers) -> Self {
        headers.entries
    }
}

impl<N, V> FromIterator<(N, V)> for Headers
where
    N: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut headers = Self::new();
        for (name, value) in iter {
            headers.add(name, value);
        }
        headers
    }
}
