use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::reader::read_agent_definition;
use crate::runtime::AgentRuntime;
use crate::types::{AgentDefinitionsOptions, AgentId, SkipAbove, VisitKey};

/// Resolve the effective system-prompt body for `id`.
///
/// Bodies are appended base-first, separated by a blank line when both sides
/// have content. A definition with `prompt.append: false` stops the walk and
/// its base is never read. Unlike chain resolution this is strict: cycles,
/// depth overruns, and unreadable bases are errors.
pub async fn resolve_agent_body(
    runtime: &dyn AgentRuntime,
    options: &AgentDefinitionsOptions,
    id: &AgentId,
) -> Result<String> {
    let max_depth = options.max_inheritance_depth.max(1);
    let mut visited: HashSet<VisitKey> = HashSet::new();
    let mut bodies: Vec<String> = Vec::new();
    let mut skip: Option<SkipAbove> = None;
    let mut current = read_agent_definition(runtime, options, id, None).await?;

    loop {
        if !visited.insert(current.visit_key()) {
            return Err(Error::CircularInheritance {
                id: current.id,
                scope: current.scope,
            });
        }
        if visited.len() > max_depth {
            return Err(Error::InheritanceDepthExceeded {
                id: id.clone(),
                max: max_depth,
            });
        }

        let base = match current.frontmatter.base {
            Some(ref base) if current.frontmatter.prompt_append() => base.clone(),
            _ => {
                bodies.push(current.body);
                break;
            }
        };
        skip = SkipAbove::merge(skip, SkipAbove::for_base(&base, &current.id, current.scope));
        bodies.push(std::mem::take(&mut current.body));

        current = read_agent_definition(runtime, options, &base, skip).await?;
    }

    Ok(bodies
        .into_iter()
        .rev()
        .fold(String::new(), |acc, body| join_bodies(acc, &body)))
}

fn join_bodies(mut base: String, child: &str) -> String {
    if !base.trim().is_empty() && !child.trim().is_empty() {
        base.push_str("\n\n");
    }
    base.push_str(child);
    base
}
