use std::fmt;

use serde::{Deserialize, Serialize};

/// A player identifier, opaque to the engine.
///
/// The surrounding service layer owns player identity, authentication, and
/// registration; the engine only ever sees the string it was handed and
/// requires that it be unique within a division.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(String);

impl PlayerId {
    /// Wraps a caller-supplied string as a player id.
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self(id.into())
    }

    /// Returns the underlying string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for PlayerId {
    fn from(other: String) -> Self {
        Self(other)
    }
}

impl From<&str> for PlayerId {
    fn from(other: &str) -> Self {
        Self(other.to_owned())
    }
}
