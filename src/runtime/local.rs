use std::ffi::OsStr;
use std::io;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tokio_stream::wrappers::ReadDirStream;
use tokio_stream::StreamExt;

use crate::error::{Error, Result};

use super::{AgentRuntime, FileStat};

/// Runtime backed by the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalRuntime {
    home_dir: Option<PathBuf>,
}

impl LocalRuntime {
    #[must_use]
    pub fn new() -> Self {
        Self {
            home_dir: dirs::home_dir(),
        }
    }

    /// Use `home` when expanding `~` instead of the current user's home.
    #[must_use]
    pub fn with_home_dir(home: impl Into<PathBuf>) -> Self {
        Self {
            home_dir: Some(home.into()),
        }
    }
}

impl Default for LocalRuntime {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AgentRuntime for LocalRuntime {
    async fn resolve_path(&self, path: &Path) -> Result<PathBuf> {
        let mut components = path.components();
        match components.next() {
            Some(Component::Normal(first)) if first == OsStr::new("~") => {
                let home = self
                    .home_dir
                    .as_ref()
                    .ok_or_else(|| Error::InvalidInput("cannot expand '~': no home directory".into()))?;
                Ok(home.join(components.as_path()))
            }
            _ => Ok(path.to_path_buf()),
        }
    }

    async fn list_markdown_files(&self, dir: &Path) -> Result<Vec<String>> {
        let read_dir = match tokio::fs::read_dir(dir).await {
            Ok(rd) => rd,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut entries = ReadDirStream::new(read_dir);
        let mut names = Vec::new();
        while let Some(entry) = entries.next().await {
            let entry = entry?;
            if !entry.file_type().await?.is_file() {
                continue;
            }
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if name.to_lowercase().ends_with(".md") {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }

    async fn stat(&self, path: &Path) -> Result<FileStat> {
        let meta = tokio::fs::metadata(path).await?;
        Ok(FileStat {
            size: meta.len(),
            is_directory: meta.is_dir(),
        })
    }

    async fn read_to_string(&self, path: &Path) -> Result<String> {
        Ok(tokio::fs::read_to_string(path).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn expands_home() {
        let rt = LocalRuntime::with_home_dir("/home/dev");
        let resolved = rt.resolve_path(Path::new("~/.unix/agents")).await.unwrap();
        assert_eq!(resolved, PathBuf::from("/home/dev/.unix/agents"));

        let untouched = rt.resolve_path(Path::new("/etc/agents")).await.unwrap();
        assert_eq!(untouched, PathBuf::from("/etc/agents"));
    }

    #[tokio::test]
    async fn lists_only_markdown_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.md"), "x").unwrap();
        std::fs::write(dir.path().join("A.MD"), "x").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "x").unwrap();
        std::fs::create_dir(dir.path().join("nested.md")).unwrap();

        let rt = LocalRuntime::new();
        let names = rt.list_markdown_files(dir.path()).await.unwrap();
        assert_eq!(names, vec!["A.MD".to_string(), "b.md".to_string()]);
    }

    #[tokio::test]
    async fn missing_directory_lists_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let rt = LocalRuntime::new();
        let names = rt.list_markdown_files(&dir.path().join("absent")).await.unwrap();
        assert!(names.is_empty());
    }

    #[tokio::test]
    async fn stat_reports_directories() {
        let dir = tempfile::tempdir().unwrap();
        let rt = LocalRuntime::new();
        assert!(rt.stat(dir.path()).await.unwrap().is_directory);
        assert!(rt.stat(&dir.path().join("missing.md")).await.is_err());
    }
}
