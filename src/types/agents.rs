use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::agent_id::AgentId;
use super::frontmatter::{AgentFrontmatter, AgentTools};
use super::scope::{AgentScope, VisitKey};

/// One definition as read from a single tier: front-matter plus raw body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentDefinitionPackage {
    pub id: AgentId,
    pub scope: AgentScope,
    pub frontmatter: AgentFrontmatter,
    /// Instruction text after the closing front-matter delimiter.
    pub body: String,
}

impl AgentDefinitionPackage {
    pub fn visit_key(&self) -> VisitKey {
        VisitKey::new(self.id.clone(), self.scope)
    }

    pub fn descriptor(&self) -> AgentDefinitionDescriptor {
        let fm = &self.frontmatter;
        AgentDefinitionDescriptor {
            id: self.id.clone(),
            scope: self.scope,
            name: fm.name.clone(),
            description: fm.description.clone(),
            ui_selectable: fm.ui_selectable(),
            ui_color: fm.ui_color().map(str::to_owned),
            subagent_runnable: fm.subagent_runnable(),
            base: fm.base.clone(),
            ai_defaults: fm.ai.clone(),
            tools: fm.tools.clone(),
        }
    }

    pub fn inheritance_link(&self) -> InheritanceLink {
        InheritanceLink {
            id: self.id.clone(),
            scope: self.scope,
            base: self.frontmatter.base.clone(),
            tools: self.frontmatter.tools.clone(),
            ui_color: self.frontmatter.ui_color().map(str::to_owned),
        }
    }
}

/// Listing view of a definition, without the body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentDefinitionDescriptor {
    pub id: AgentId,
    pub scope: AgentScope,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub ui_selectable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ui_color: Option<String>,
    pub subagent_runnable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<AgentId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_defaults: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<AgentTools>,
}

/// One element of a resolved inheritance chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InheritanceLink {
    pub id: AgentId,
    pub scope: AgentScope,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<AgentId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<AgentTools>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ui_color: Option<String>,
}
