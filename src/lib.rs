//! Layered markdown agent definitions.
//!
//! Definitions live in three tiers (project, global, built-in). This crate
//! discovers them, resolves `base` inheritance across tiers, merges prompt
//! bodies, and builds ordered tool policies.

pub mod body;
pub mod builtin;
pub mod discovery;
pub mod error;
pub mod inheritance;
pub mod parser;
pub mod policy;
pub mod reader;
pub mod runtime;
pub mod service;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export key types at crate root for ergonomic use.
pub use error::{Error, ParseError, Result};
pub use types::{
    AgentDefinitionDescriptor, AgentDefinitionPackage, AgentDefinitionRoots, AgentDefinitionsOptions,
    AgentFrontmatter, AgentId, AgentScope, InheritanceLink, ToolPolicy, ToolPolicyAction,
    ToolPolicyFlags, ToolPolicyRule,
};

// Re-export primary APIs.
pub use body::resolve_agent_body;
pub use discovery::discover_agent_definitions;
pub use inheritance::{resolve_inheritance_chain, Resolution, StopReason};
pub use reader::read_agent_definition;
pub use service::AgentDefinitionsService;

// Re-export runtime and policy helpers.
pub use policy::{
    apply_tool_policy, evaluate_tool_policy, is_tool_enabled, resolve_tool_policy, PatternMatcher,
    RegexMatcher,
};
pub use runtime::{AgentRuntime, FileStat, LocalRuntime};
