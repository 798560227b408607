use std::io;
use std::path::PathBuf;

use crate::types::{AgentId, AgentScope};

/// Reasons a single definition document can be rejected.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("file is {size} bytes, exceeds the {max} byte limit")]
    TooLarge { size: u64, max: u64 },

    #[error("missing front-matter opening delimiter '---' on the first line")]
    MissingOpeningDelimiter,

    #[error("missing front-matter closing delimiter '---'")]
    MissingClosingDelimiter,

    #[error("front-matter must be a YAML mapping, found {found}")]
    NotAMapping { found: &'static str },

    #[error("invalid front-matter YAML: {0}")]
    Yaml(#[source] serde_yaml::Error),

    #[error("invalid front-matter: {0}")]
    Schema(String),
}

/// All errors that can occur while resolving agent definitions.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid agent definition: {0}")]
    Parse(#[from] ParseError),

    #[error("invalid agent id '{0}'")]
    InvalidAgentId(String),

    #[error("agent definition not found: {0}")]
    NotFound(AgentId),

    #[error("circular agent inheritance detected: {id} ({scope})")]
    CircularInheritance { id: AgentId, scope: AgentScope },

    #[error("agent inheritance depth exceeded for '{id}' (max: {max})")]
    InheritanceDepthExceeded { id: AgentId, max: usize },

    #[error("invalid built-in agent definition: {0}")]
    BuiltIn(String),

    #[error("timed out after {timeout:?} reading {}", path.display())]
    Timeout {
        path: PathBuf,
        timeout: std::time::Duration,
    },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
