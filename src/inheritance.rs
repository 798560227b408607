use std::collections::HashSet;
use std::fmt;

use crate::reader::read_agent_definition;
use crate::runtime::AgentRuntime;
use crate::types::{
    AgentDefinitionPackage, AgentDefinitionsOptions, AgentId, InheritanceLink, SkipAbove, VisitKey,
};

/// Why a resolution stopped before reaching the root of the chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// The walk came back to a definition it had already visited.
    Cycle(VisitKey),
    /// The chain reached the configured maximum length.
    DepthLimit { max: usize },
    /// A `base` reference could not be read.
    BaseUnavailable { base: AgentId, error: String },
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cycle(key) => write!(f, "circular inheritance at {key}"),
            Self::DepthLimit { max } => write!(f, "inheritance depth limit of {max} reached"),
            Self::BaseUnavailable { base, error } => write!(f, "base '{base}' unavailable: {error}"),
        }
    }
}

/// Outcome of a tolerant resolution.
///
/// `Partial` still carries a usable value; callers that need strictness can
/// check [`Resolution::reason`].
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution<T> {
    Complete(T),
    Partial { value: T, reason: StopReason },
}

impl<T> Resolution<T> {
    pub fn value(&self) -> &T {
        match self {
            Self::Complete(value) | Self::Partial { value, .. } => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Self::Complete(value) | Self::Partial { value, .. } => value,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete(_))
    }

    pub fn reason(&self) -> Option<&StopReason> {
        match self {
            Self::Complete(_) => None,
            Self::Partial { reason, .. } => Some(reason),
        }
    }
}

/// Walk `base` references from `initial`, producing links ordered child → base.
///
/// Same-id bases skip the scope they were declared in, and that skip is
/// carried forward for the rest of the walk. Cycles, the depth limit, and
/// unreadable bases end the walk with a `Partial` result holding what was
/// resolved so far; nothing here is fatal.
pub async fn resolve_inheritance_chain(
    runtime: &dyn AgentRuntime,
    options: &AgentDefinitionsOptions,
    initial: &AgentDefinitionPackage,
) -> Resolution<Vec<InheritanceLink>> {
    let max_depth = options.max_inheritance_depth.max(1);
    let mut chain: Vec<InheritanceLink> = Vec::new();
    let mut visited: HashSet<VisitKey> = HashSet::new();
    let mut skip: Option<SkipAbove> = None;
    let mut current = initial.clone();

    loop {
        let key = current.visit_key();
        if !visited.insert(key.clone()) {
            tracing::warn!(
                agent_id = %initial.id,
                visit_key = %key,
                "circular agent inheritance detected, using partial chain"
            );
            return Resolution::Partial {
                value: chain,
                reason: StopReason::Cycle(key),
            };
        }
        chain.push(current.inheritance_link());

        let Some(base) = current.frontmatter.base.clone() else {
            return Resolution::Complete(chain);
        };

        if chain.len() >= max_depth {
            tracing::warn!(
                agent_id = %initial.id,
                max_depth,
                "agent inheritance depth limit reached, using partial chain"
            );
            return Resolution::Partial {
                value: chain,
                reason: StopReason::DepthLimit { max: max_depth },
            };
        }

        skip = SkipAbove::merge(skip, SkipAbove::for_base(&base, &current.id, current.scope));

        match read_agent_definition(runtime, options, &base, skip).await {
            Ok(pkg) => current = pkg,
            Err(e) => {
                tracing::warn!(
                    agent_id = %initial.id,
                    base = %base,
                    "failed to read base agent definition, using partial chain: {e}"
                );
                return Resolution::Partial {
                    value: chain,
                    reason: StopReason::BaseUnavailable {
                        base,
                        error: e.to_string(),
                    },
                };
            }
        }
    }
}
