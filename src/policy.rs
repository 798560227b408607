//! Tool policy resolution and evaluation.
//!
//! A policy is an ordered rule list. [`resolve_tool_policy`] builds one from
//! an inheritance chain; [`evaluate_tool_policy`] and friends apply it to tool
//! names.

use regex::Regex;

use crate::types::{InheritanceLink, ToolPolicy, ToolPolicyAction, ToolPolicyFlags, ToolPolicyRule};

pub const TASK_TOOL: &str = "task";
pub const TASK_TOOL_FAMILY: &str = "task_.*";
pub const PROPOSE_PLAN_TOOL: &str = "propose_plan";
pub const ASK_USER_QUESTION_TOOL: &str = "ask_user_question";
pub const AGENT_REPORT_TOOL: &str = "agent_report";

/// Build the ordered tool policy for a resolved chain (child first).
///
/// Starts from "everything disabled", then layers each link's `tools.add`
/// and `tools.remove` from the root base down to the child, then the runtime
/// restrictions from `flags`.
pub fn resolve_tool_policy(chain: &[InheritanceLink], flags: ToolPolicyFlags) -> ToolPolicy {
    let mut policy: ToolPolicy = vec![ToolPolicyRule::disable(".*")];

    for link in chain.iter().rev() {
        let Some(ref tools) = link.tools else {
            continue;
        };
        policy.extend(non_empty(tools.add_patterns()).map(ToolPolicyRule::enable));
        policy.extend(non_empty(tools.remove_patterns()).map(ToolPolicyRule::disable));
    }

    if flags.disable_task_tools_for_depth {
        policy.push(ToolPolicyRule::disable(TASK_TOOL));
        policy.push(ToolPolicyRule::disable(TASK_TOOL_FAMILY));
    }

    if flags.is_subagent {
        policy.push(ToolPolicyRule::disable(TASK_TOOL));
        policy.push(ToolPolicyRule::disable(TASK_TOOL_FAMILY));
        policy.push(ToolPolicyRule::disable(PROPOSE_PLAN_TOOL));
        policy.push(ToolPolicyRule::disable(ASK_USER_QUESTION_TOOL));
        policy.push(ToolPolicyRule::enable(AGENT_REPORT_TOOL));
    }

    policy
}

fn non_empty(patterns: &[String]) -> impl Iterator<Item = &str> {
    patterns.iter().map(|p| p.trim()).filter(|p| !p.is_empty())
}

/// Decides whether a policy pattern applies to a tool name.
pub trait PatternMatcher {
    fn matches(&self, pattern: &str, candidate: &str) -> bool;
}

/// Matches patterns as regular expressions anchored to the whole name.
///
/// A pattern that fails to compile never matches.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexMatcher;

impl PatternMatcher for RegexMatcher {
    fn matches(&self, pattern: &str, candidate: &str) -> bool {
        match Regex::new(&format!("^(?:{pattern})$")) {
            Ok(re) => re.is_match(candidate),
            Err(e) => {
                tracing::warn!(pattern, "ignoring invalid tool policy pattern: {e}");
                false
            }
        }
    }
}

/// Action of the last rule matching `tool`, if any.
pub fn evaluate_tool_policy(
    policy: &[ToolPolicyRule],
    tool: &str,
    matcher: &dyn PatternMatcher,
) -> Option<ToolPolicyAction> {
    policy
        .iter()
        .rev()
        .find(|rule| matcher.matches(&rule.regex_match, tool))
        .map(|rule| rule.action)
}

/// Whether `tool` is enabled under `policy`. Unmatched tools are enabled.
pub fn is_tool_enabled(policy: &[ToolPolicyRule], tool: &str, matcher: &dyn PatternMatcher) -> bool {
    evaluate_tool_policy(policy, tool, matcher) != Some(ToolPolicyAction::Disable)
}

/// Keep only the tools `policy` enables, preserving order.
pub fn apply_tool_policy<S: AsRef<str>>(
    policy: &[ToolPolicyRule],
    tools: impl IntoIterator<Item = S>,
    matcher: &dyn PatternMatcher,
) -> Vec<S> {
    tools
        .into_iter()
        .filter(|tool| is_tool_enabled(policy, tool.as_ref(), matcher))
        .collect()
}
