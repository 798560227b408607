use std::io;

use crate::builtin::builtin_agent_definition;
use crate::error::{Error, Result};
use crate::runtime::{load_definition_file, AgentRuntime};
use crate::types::{AgentDefinitionPackage, AgentDefinitionsOptions, AgentId, AgentScope, SkipAbove};

/// Read the highest-precedence definition for `id`.
///
/// Tries project, then global, then built-in, leaving out every scope that
/// `skip` excludes. Within a tier, files are matched to `id` with the same
/// filename rules discovery uses. A file that is missing, unreadable,
/// oversized, malformed, or times out is treated as absent at its scope and
/// the lookup falls through. A broken built-in catalog is a hard error.
pub async fn read_agent_definition(
    runtime: &dyn AgentRuntime,
    options: &AgentDefinitionsOptions,
    id: &AgentId,
    skip: Option<SkipAbove>,
) -> Result<AgentDefinitionPackage> {
    let roots = options.resolve_roots()?;
    let excluded = |scope: AgentScope| skip.is_some_and(|s| s.excludes(scope));

    let candidates = [
        (AgentScope::Project, &roots.project_root),
        (AgentScope::Global, &roots.global_root),
    ];

    for (scope, root) in candidates {
        if excluded(scope) {
            continue;
        }

        let resolved = match runtime.resolve_path(root).await {
            Ok(path) => path,
            Err(e) => {
                tracing::debug!(%scope, root = %root.display(), "cannot resolve agents root: {e}");
                continue;
            }
        };
        let filenames = match runtime.list_markdown_files(&resolved).await {
            Ok(names) => names,
            Err(e) => {
                tracing::warn!(%scope, root = %resolved.display(), "failed to read agents directory: {e}");
                continue;
            }
        };

        // Filenames map to ids the same way discovery maps them, and a later
        // file in listing order wins.
        let matching = filenames
            .iter()
            .rev()
            .filter(|name| AgentId::from_filename(name).as_ref() == Some(id));
        for filename in matching {
            let path = resolved.join(filename);
            match load_definition_file(runtime, &path, options.io_timeout).await {
                Ok(Some(parsed)) => {
                    return Ok(AgentDefinitionPackage {
                        id: id.clone(),
                        scope,
                        frontmatter: parsed.frontmatter,
                        body: parsed.body,
                    });
                }
                Ok(None) => {}
                Err(Error::Io(e)) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => {
                    tracing::warn!(
                        agent_id = %id,
                        %scope,
                        path = %path.display(),
                        "ignoring agent definition: {e}"
                    );
                }
            }
        }
    }

    if !excluded(AgentScope::BuiltIn) {
        if let Some(pkg) = builtin_agent_definition(id)? {
            return Ok(pkg.clone());
        }
    }

    Err(Error::NotFound(id.clone()))
}
