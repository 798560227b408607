use std::fmt;

use serde::{Deserialize, Serialize};

use super::agent_id::AgentId;

/// Precedence tier an agent definition was loaded from.
///
/// Ordered by precedence: `Project` shadows `Global`, which shadows `BuiltIn`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentScope {
    #[serde(rename = "project")]
    Project,
    #[serde(rename = "global")]
    Global,
    #[serde(rename = "built-in")]
    BuiltIn,
}

impl AgentScope {
    /// All scopes, highest precedence first.
    pub const PRECEDENCE: [AgentScope; 3] =
        [AgentScope::Project, AgentScope::Global, AgentScope::BuiltIn];

    /// Priority index; lower means higher precedence.
    pub fn priority(self) -> usize {
        match self {
            Self::Project => 0,
            Self::Global => 1,
            Self::BuiltIn => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Global => "global",
            Self::BuiltIn => "built-in",
        }
    }
}

impl fmt::Display for AgentScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Excludes the given scope and every scope of higher precedence from a lookup.
///
/// Used when a definition names itself as its base: a project `exec.md` with
/// `base: exec` must resolve to the global or built-in `exec`, never to itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkipAbove(pub AgentScope);

impl SkipAbove {
    /// Whether a lookup carrying this skip value must ignore `scope`.
    pub fn excludes(self, scope: AgentScope) -> bool {
        scope.priority() <= self.0.priority()
    }

    /// Skip value for resolving `base_id` from the definition `current_id`
    /// found at `current_scope`.
    pub fn for_base(base_id: &AgentId, current_id: &AgentId, current_scope: AgentScope) -> Option<Self> {
        (base_id == current_id).then_some(Self(current_scope))
    }

    /// Combine two skip values, keeping the one that excludes more scopes.
    ///
    /// Once a self-reference skip is in effect, a later step can only widen it.
    pub fn merge(a: Option<Self>, b: Option<Self>) -> Option<Self> {
        match (a, b) {
            (None, b) => b,
            (a, None) => a,
            (Some(a), Some(b)) => {
                if a.0.priority() >= b.0.priority() {
                    Some(a)
                } else {
                    Some(b)
                }
            }
        }
    }
}

/// Identity of one visited definition during inheritance resolution.
///
/// Keyed by scope as well as id so that `project/exec` may extend
/// `built-in/exec` without tripping cycle detection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VisitKey {
    pub id: AgentId,
    pub scope: AgentScope,
}

impl VisitKey {
    pub fn new(id: AgentId, scope: AgentScope) -> Self {
        Self { id, scope }
    }
}

impl fmt::Display for VisitKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.id, self.scope)
    }
}
