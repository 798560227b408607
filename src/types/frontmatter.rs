use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::agent_id::AgentId;

/// Validated front-matter of an agent definition document.
///
/// Unknown keys are dropped on deserialization at every level, so documents
/// written for newer releases still load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentFrontmatter {
    /// Display name.
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Identifier of the definition this one inherits from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<AgentId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<AgentTools>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ui: Option<AgentUi>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<AgentPrompt>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subagent: Option<AgentSubagent>,

    /// Default AI parameters, passed through uninterpreted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai: Option<Map<String, Value>>,
}

/// Tool-policy fragment: patterns to enable, then patterns to disable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentTools {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remove: Option<Vec<String>>,
}

impl AgentTools {
    pub fn add_patterns(&self) -> &[String] {
        self.add.as_deref().unwrap_or_default()
    }

    pub fn remove_patterns(&self) -> &[String] {
        self.remove.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentUi {
    /// Hide from the agent picker. Wins over `selectable` when both are set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selectable: Option<bool>,

    /// Drop the agent from listings while still shadowing lower tiers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentPrompt {
    /// Append this body to the base body (default) instead of replacing it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub append: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentSubagent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runnable: Option<bool>,
}

impl AgentFrontmatter {
    pub fn ui_selectable(&self) -> bool {
        match &self.ui {
            None => true,
            Some(ui) => match (ui.hidden, ui.selectable) {
                (Some(hidden), _) => !hidden,
                (None, Some(selectable)) => selectable,
                (None, None) => true,
            },
        }
    }

    pub fn ui_disabled(&self) -> bool {
        self.ui.as_ref().and_then(|ui| ui.disabled) == Some(true)
    }

    pub fn ui_color(&self) -> Option<&str> {
        self.ui.as_ref().and_then(|ui| ui.color.as_deref())
    }

    pub fn subagent_runnable(&self) -> bool {
        self.subagent.as_ref().and_then(|s| s.runnable).unwrap_or(false)
    }

    pub fn prompt_append(&self) -> bool {
        self.prompt.as_ref().and_then(|p| p.append) != Some(false)
    }
}
