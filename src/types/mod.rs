pub mod agent_id;
pub mod agents;
pub mod frontmatter;
pub mod options;
pub mod policy;
pub mod scope;

// Re-exports for convenience.
pub use agent_id::AgentId;
pub use agents::{AgentDefinitionDescriptor, AgentDefinitionPackage, InheritanceLink};
pub use frontmatter::{AgentFrontmatter, AgentPrompt, AgentSubagent, AgentTools, AgentUi};
pub use options::{AgentDefinitionRoots, AgentDefinitionsOptions, MAX_INHERITANCE_DEPTH};
pub use policy::{ToolPolicy, ToolPolicyAction, ToolPolicyFlags, ToolPolicyRule};
pub use scope::{AgentScope, SkipAbove, VisitKey};
