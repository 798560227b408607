use serde::{Deserialize, Serialize};

/// What a matching rule does to a tool.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ToolPolicyAction {
    Enable,
    Disable,
}

impl std::fmt::Display for ToolPolicyAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Enable => "enable",
            Self::Disable => "disable",
        })
    }
}

/// A single ordered policy entry.
///
/// `regex_match` must match the whole tool name; the last matching rule in a
/// [`ToolPolicy`] decides.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToolPolicyRule {
    pub regex_match: String,
    pub action: ToolPolicyAction,
}

impl ToolPolicyRule {
    pub fn enable(pattern: impl Into<String>) -> Self {
        Self {
            regex_match: pattern.into(),
            action: ToolPolicyAction::Enable,
        }
    }

    pub fn disable(pattern: impl Into<String>) -> Self {
        Self {
            regex_match: pattern.into(),
            action: ToolPolicyAction::Disable,
        }
    }
}

/// Ordered rule list, evaluated last-match-wins.
pub type ToolPolicy = Vec<ToolPolicyRule>;

/// Runtime facts about the agent instance the policy is built for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToolPolicyFlags {
    /// The agent was spawned by another agent.
    pub is_subagent: bool,
    /// The task nesting limit has been reached for this workspace.
    pub disable_task_tools_for_depth: bool,
}
