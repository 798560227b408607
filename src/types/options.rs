use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default maximum number of definitions in one inheritance chain.
pub const MAX_INHERITANCE_DEPTH: usize = 10;

/// Workspace-relative directory holding project-tier definitions.
pub const PROJECT_AGENTS_DIR: &str = ".unix/agents";

/// Directory holding global-tier definitions. `~` is expanded by the runtime.
pub const GLOBAL_AGENTS_ROOT: &str = "~/.unix/agents";

/// Directories scanned for the project and global tiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentDefinitionRoots {
    pub project_root: PathBuf,
    pub global_root: PathBuf,
}

impl AgentDefinitionRoots {
    /// `<workspace>/.unix/agents` and `~/.unix/agents`.
    pub fn for_workspace(workspace_path: impl Into<PathBuf>) -> Result<Self> {
        let workspace_path = workspace_path.into();
        if workspace_path.as_os_str().is_empty() {
            return Err(Error::InvalidInput("workspace path is required".into()));
        }
        Ok(Self {
            project_root: workspace_path.join(PROJECT_AGENTS_DIR),
            global_root: PathBuf::from(GLOBAL_AGENTS_ROOT),
        })
    }
}

/// Configuration for discovery and resolution.
///
/// All fields are public. Use `..Default::default()` for fields you don't
/// need to set.
#[derive(Debug, Clone)]
pub struct AgentDefinitionsOptions {
    /// Workspace whose `.unix/agents` directory forms the project tier.
    pub workspace_path: Option<PathBuf>,

    /// Explicit tier roots. Takes precedence over `workspace_path`.
    pub roots: Option<AgentDefinitionRoots>,

    /// Maximum number of definitions followed through `base` references.
    pub max_inheritance_depth: usize,

    /// Per-file read timeout. A file that times out is treated as absent.
    pub io_timeout: Option<Duration>,
}

impl Default for AgentDefinitionsOptions {
    fn default() -> Self {
        Self {
            workspace_path: None,
            roots: None,
            max_inheritance_depth: MAX_INHERITANCE_DEPTH,
            io_timeout: None,
        }
    }
}

impl AgentDefinitionsOptions {
    /// Options rooted at a workspace with default tier roots.
    pub fn for_workspace(workspace_path: impl Into<PathBuf>) -> Self {
        Self {
            workspace_path: Some(workspace_path.into()),
            ..Default::default()
        }
    }

    /// Options with explicit tier roots.
    pub fn with_roots(roots: AgentDefinitionRoots) -> Self {
        Self {
            roots: Some(roots),
            ..Default::default()
        }
    }

    /// The roots to scan: the explicit override, else the workspace defaults.
    pub fn resolve_roots(&self) -> Result<AgentDefinitionRoots> {
        if let Some(ref roots) = self.roots {
            return Ok(roots.clone());
        }
        match self.workspace_path {
            Some(ref workspace) => AgentDefinitionRoots::for_workspace(workspace),
            None => Err(Error::InvalidInput(
                "either roots or workspace_path must be set".into(),
            )),
        }
    }
}
