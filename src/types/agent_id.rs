use std::fmt;
use std::ops::Deref;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const MAX_AGENT_ID_LEN: usize = 64;

/// Normalized, filesystem-safe agent identifier (e.g. `exec`, `code-review`).
///
/// Grammar: 1-64 characters of `[a-z0-9_-]`, starting with a letter or digit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AgentId(String);

impl AgentId {
    /// Validate `raw` as an agent id. No normalization is applied.
    pub fn parse(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        if is_valid_agent_id(&raw) {
            Ok(Self(raw))
        } else {
            Err(Error::InvalidAgentId(raw))
        }
    }

    /// Derive an id from a definition filename such as `Code-Review.md`.
    ///
    /// Returns `None` for non-markdown files or names outside the grammar.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let path = Path::new(filename);
        let ext = path.extension()?.to_str()?;
        if !ext.eq_ignore_ascii_case("md") {
            return None;
        }
        let stem = path.file_stem()?.to_str()?;
        Self::parse(stem.trim().to_lowercase()).ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Filename this id is stored under within a tier root.
    pub fn filename(&self) -> String {
        format!("{}.md", self.0)
    }
}

fn is_valid_agent_id(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    s.len() <= MAX_AGENT_ID_LEN
        && (first.is_ascii_lowercase() || first.is_ascii_digit())
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Deref for AgentId {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for AgentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for AgentId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(value)
    }
}

impl TryFrom<&str> for AgentId {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        Self::parse(value)
    }
}

impl From<AgentId> for String {
    fn from(id: AgentId) -> Self {
        id.0
    }
}

impl PartialEq<str> for AgentId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for AgentId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
