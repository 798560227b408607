pub mod local;

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{Error, ParseError, Result};
use crate::parser::{parse_agent_definition_markdown, ParsedAgentDefinition, MAX_FILE_SIZE};

pub use local::LocalRuntime;

/// Size and kind of a filesystem entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStat {
    pub size: u64,
    pub is_directory: bool,
}

/// File access used by discovery and resolution.
///
/// Implementations may be local or remote (e.g. a shell-backed filesystem);
/// every method may block on I/O, so all of them are async.
#[async_trait]
pub trait AgentRuntime: Send + Sync {
    /// Resolve a configured root (which may start with `~`) to a concrete path.
    async fn resolve_path(&self, path: &Path) -> Result<PathBuf>;

    /// Names of regular `*.md` files directly inside `dir`.
    ///
    /// A missing directory yields an empty list, not an error.
    async fn list_markdown_files(&self, dir: &Path) -> Result<Vec<String>>;

    async fn stat(&self, path: &Path) -> Result<FileStat>;

    async fn read_to_string(&self, path: &Path) -> Result<String>;
}

/// Stat, size-check, read, and parse one definition file.
///
/// Returns `Ok(None)` when the path is a directory. Any other failure is an
/// error the caller is expected to treat as "absent at this tier". When
/// `io_timeout` is set it bounds the whole sequence, `stat` included.
pub(crate) async fn load_definition_file(
    runtime: &dyn AgentRuntime,
    path: &Path,
    io_timeout: Option<Duration>,
) -> Result<Option<ParsedAgentDefinition>> {
    match io_timeout {
        Some(timeout) => tokio::time::timeout(timeout, load_unbounded(runtime, path))
            .await
            .map_err(|_| Error::Timeout {
                path: path.to_path_buf(),
                timeout,
            })?,
        None => load_unbounded(runtime, path).await,
    }
}

async fn load_unbounded(runtime: &dyn AgentRuntime, path: &Path) -> Result<Option<ParsedAgentDefinition>> {
    let stat = runtime.stat(path).await?;
    if stat.is_directory {
        return Ok(None);
    }
    if stat.size > MAX_FILE_SIZE {
        return Err(ParseError::TooLarge {
            size: stat.size,
            max: MAX_FILE_SIZE,
        }
        .into());
    }

    let content = runtime.read_to_string(path).await?;
    let parsed = parse_agent_definition_markdown(&content, stat.size)?;
    Ok(Some(parsed))
}
