use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use tempfile::TempDir;

use crate::error::Result;
use crate::runtime::{AgentRuntime, FileStat, LocalRuntime};
use crate::types::{AgentDefinitionRoots, AgentDefinitionsOptions};

/// Temporary project and global tier roots.
pub(crate) struct Fixture {
    pub project: TempDir,
    pub global: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            project: tempfile::tempdir().unwrap(),
            global: tempfile::tempdir().unwrap(),
        }
    }

    pub fn roots(&self) -> AgentDefinitionRoots {
        AgentDefinitionRoots {
            project_root: self.project.path().to_path_buf(),
            global_root: self.global.path().to_path_buf(),
        }
    }

    pub fn options(&self) -> AgentDefinitionsOptions {
        AgentDefinitionsOptions::with_roots(self.roots())
    }

    pub fn write_project(&self, id: &str, content: &str) {
        write(self.project.path(), id, content);
    }

    pub fn write_global(&self, id: &str, content: &str) {
        write(self.global.path(), id, content);
    }
}

fn write(root: &Path, id: &str, content: &str) {
    std::fs::write(root.join(format!("{id}.md")), content).unwrap();
}

/// Route `tracing` output through the test harness. Safe to call repeatedly.
pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Definition document with `name`, extra front-matter lines, and a body.
pub(crate) fn agent_md(name: &str, extra: &str, body: &str) -> String {
    format!("---\nname: {name}\n{extra}---\n{body}")
}

/// Which per-file operation [`SlowRuntime`] stalls.
#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum SlowOp {
    Stat,
    Read,
}

/// Local runtime whose `op` calls under `slow_root` take `delay`.
pub(crate) struct SlowRuntime {
    pub inner: LocalRuntime,
    pub slow_root: PathBuf,
    pub op: SlowOp,
    pub delay: Duration,
}

impl SlowRuntime {
    async fn stall(&self, op: SlowOp, path: &Path) {
        if op == self.op && path.starts_with(&self.slow_root) {
            tokio::time::sleep(self.delay).await;
        }
    }
}

#[async_trait]
impl AgentRuntime for SlowRuntime {
    async fn resolve_path(&self, path: &Path) -> Result<PathBuf> {
        self.inner.resolve_path(path).await
    }

    async fn list_markdown_files(&self, dir: &Path) -> Result<Vec<String>> {
        self.inner.list_markdown_files(dir).await
    }

    async fn stat(&self, path: &Path) -> Result<FileStat> {
        self.stall(SlowOp::Stat, path).await;
        self.inner.stat(path).await
    }

    async fn read_to_string(&self, path: &Path) -> Result<String> {
        self.stall(SlowOp::Read, path).await;
        self.inner.read_to_string(path).await
    }
}
