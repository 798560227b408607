use std::sync::Arc;

use crate::body::resolve_agent_body;
use crate::discovery::discover_agent_definitions;
use crate::error::Result;
use crate::inheritance::{resolve_inheritance_chain, Resolution};
use crate::policy::resolve_tool_policy;
use crate::reader::read_agent_definition;
use crate::runtime::AgentRuntime;
use crate::types::{
    AgentDefinitionDescriptor, AgentDefinitionPackage, AgentDefinitionsOptions, AgentId,
    AgentScope, InheritanceLink, SkipAbove, ToolPolicy, ToolPolicyFlags,
};

/// Entry point bundling a runtime with its options.
///
/// Cheap to clone; clones share the runtime.
///
/// # Example
/// ```no_run
/// use std::sync::Arc;
/// use agent_definitions::{AgentDefinitionsOptions, AgentDefinitionsService, AgentId, LocalRuntime};
/// use agent_definitions::types::ToolPolicyFlags;
///
/// # async fn example() -> agent_definitions::Result<()> {
/// let service = AgentDefinitionsService::new(
///     Arc::new(LocalRuntime::new()),
///     AgentDefinitionsOptions::for_workspace("/path/to/workspace"),
/// );
///
/// for agent in service.discover().await? {
///     println!("{} ({})", agent.name, agent.scope);
/// }
///
/// let exec = AgentId::parse("exec")?;
/// let prompt = service.resolve_body(&exec).await?;
/// let policy = service
///     .resolve_tool_policy_for_agent(&exec, ToolPolicyFlags::default())
///     .await?;
/// # let _ = (prompt, policy);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct AgentDefinitionsService {
    runtime: Arc<dyn AgentRuntime>,
    options: AgentDefinitionsOptions,
}

impl std::fmt::Debug for AgentDefinitionsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentDefinitionsService")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl AgentDefinitionsService {
    #[must_use]
    pub fn new(runtime: Arc<dyn AgentRuntime>, options: AgentDefinitionsOptions) -> Self {
        Self { runtime, options }
    }

    pub fn options(&self) -> &AgentDefinitionsOptions {
        &self.options
    }

    /// Every non-disabled agent, one per id, sorted by name.
    pub async fn discover(&self) -> Result<Vec<AgentDefinitionDescriptor>> {
        discover_agent_definitions(self.runtime.as_ref(), &self.options).await
    }

    /// The highest-precedence definition for `id`.
    pub async fn read(&self, id: &AgentId) -> Result<AgentDefinitionPackage> {
        read_agent_definition(self.runtime.as_ref(), &self.options, id, None).await
    }

    /// Like [`read`](Self::read), ignoring `scope` and every scope above it.
    pub async fn read_skipping(&self, id: &AgentId, scope: AgentScope) -> Result<AgentDefinitionPackage> {
        read_agent_definition(self.runtime.as_ref(), &self.options, id, Some(SkipAbove(scope))).await
    }

    /// Inheritance chain starting at an already-read definition.
    pub async fn resolve_chain(&self, initial: &AgentDefinitionPackage) -> Resolution<Vec<InheritanceLink>> {
        resolve_inheritance_chain(self.runtime.as_ref(), &self.options, initial).await
    }

    /// Effective prompt body for `id`, following `base` references.
    pub async fn resolve_body(&self, id: &AgentId) -> Result<String> {
        resolve_agent_body(self.runtime.as_ref(), &self.options, id).await
    }

    /// Read `id`, resolve its chain, and build its tool policy.
    ///
    /// Only the initial read can fail. A partial chain still yields a policy
    /// built from the links that did resolve.
    pub async fn resolve_tool_policy_for_agent(
        &self,
        id: &AgentId,
        flags: ToolPolicyFlags,
    ) -> Result<ToolPolicy> {
        let initial = self.read(id).await?;
        let chain = self.resolve_chain(&initial).await;
        if let Some(reason) = chain.reason() {
            tracing::debug!(agent_id = %id, "building tool policy from partial chain: {reason}");
        }
        Ok(resolve_tool_policy(chain.value(), flags))
    }
}
