//! Case-insensitive names shared by every named entity.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// An immutable name for states, events, commands, and counters.
///
/// The raw string is stored verbatim, but equality and hashing compare the
/// lowercase form, so `Idle` and `idle` name the same thing.
///
/// # Example
///
/// ```rust
/// use statekit::core::Identifier;
///
/// let a = Identifier::new("Idle");
/// let b = Identifier::new("idle");
///
/// assert_eq!(a, b);
/// assert_eq!(a.as_str(), "Idle");
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identifier {
    value: String,
}

impl Identifier {
    /// Create an identifier from any string. Every string is valid.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// The name exactly as it was written.
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// The normalized form used for comparison and hashing.
    pub fn normalized(&self) -> String {
        self.value.to_lowercase()
    }

    /// Compare against a raw string with the same case-insensitive rule.
    pub fn matches(&self, other: &str) -> bool {
        self.value.to_lowercase() == other.to_lowercase()
    }
}

impl PartialEq for Identifier {
    fn eq(&self, other: &Self) -> bool {
        self.matches(&other.value)
    }
}

impl Eq for Identifier {}

impl Hash for Identifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.normalized().hash(state);
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl From<&str> for Identifier {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Identifier {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}
