//! Agent definitions shipped with the platform.
//!
//! The markdown sources are embedded at compile time and parsed on first
//! access. The parsed catalog (or the parse failure) is memoized for the rest
//! of the process.

use std::sync::OnceLock;

use crate::error::{Error, Result};
use crate::parser::parse_agent_definition_markdown;
use crate::types::{AgentDefinitionPackage, AgentId, AgentScope};

const BUILTIN_SOURCES: &[(&str, &str)] = &[
    ("exec", include_str!("agents/exec.md")),
    ("plan", include_str!("agents/plan.md")),
    ("ask", include_str!("agents/ask.md")),
    ("explore", include_str!("agents/explore.md")),
    ("compact", include_str!("agents/compact.md")),
];

static BUILTIN_AGENTS: OnceLock<std::result::Result<Vec<AgentDefinitionPackage>, String>> =
    OnceLock::new();

/// All built-in definitions, scope `built-in`.
///
/// Concurrent first callers race on a single initialization; every caller
/// observes the same result.
pub fn builtin_agent_definitions() -> Result<&'static [AgentDefinitionPackage]> {
    BUILTIN_AGENTS
        .get_or_init(|| parse_sources(BUILTIN_SOURCES))
        .as_deref()
        .map_err(|e| Error::BuiltIn(e.clone()))
}

/// Built-in definition for `id`, if one ships.
pub fn builtin_agent_definition(id: &AgentId) -> Result<Option<&'static AgentDefinitionPackage>> {
    Ok(builtin_agent_definitions()?.iter().find(|pkg| &pkg.id == id))
}

fn parse_sources(sources: &[(&str, &str)]) -> std::result::Result<Vec<AgentDefinitionPackage>, String> {
    sources
        .iter()
        .map(|(id, content)| {
            let agent_id = AgentId::parse(*id).map_err(|e| e.to_string())?;
            let parsed = parse_agent_definition_markdown(content, content.len() as u64)
                .map_err(|e| format!("{id}: {e}"))?;
            Ok(AgentDefinitionPackage {
                id: agent_id,
                scope: AgentScope::BuiltIn,
                frontmatter: parsed.frontmatter,
                body: parsed.body,
            })
        })
        .collect()
}
