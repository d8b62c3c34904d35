//! The attendee directory: tag identifier to record.

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

/// Opaque identifier read from a physical tag. Never empty, never padded.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TagId(pub(super) String);

/// A stored tag identifier that is blank or carries surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid tag identifier: {0:?}")]
pub struct InvalidTagId(pub String);

impl TagId {
    /// Parses a raw reader value. Returns `None` for blank input.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TagId {
    type Error = InvalidTagId;

    /// Stored identifiers must already be in parsed form.
    fn try_from(raw: String) -> Result<Self, Self::Error> {
        match Self::parse(&raw) {
            Some(tag) if tag.0 == raw => Ok(tag),
            _ => Err(InvalidTagId(raw)),
        }
    }
}

impl From<TagId> for String {
    fn from(tag: TagId) -> Self {
        tag.0
    }
}

impl fmt::Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Mapping from tag to attendee record.
///
/// Ordered so snapshots serialize the same way every time.
/// Updates go through [`Directory::with_record`], which returns a new
/// directory rather than mutating records in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Directory<R> {
    entries: BTreeMap<TagId, R>,
}

impl<R> Directory<R> {
    pub fn get(&self, tag: &TagId) -> Option<&R> {
        self.entries.get(tag)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TagId, &R)> {
        self.entries.iter()
    }
}

impl<R: Clone> Directory<R> {
    /// A copy of this directory with `tag` bound to `record`.
    #[must_use]
    pub fn with_record(&self, tag: TagId, record: R) -> Self {
        let mut entries = self.entries.clone();
        entries.insert(tag, record);
        Self { entries }
    }
}

impl<R> FromIterator<(TagId, R)> for Directory<R> {
    fn from_iter<I: IntoIterator<Item = (TagId, R)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
