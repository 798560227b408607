use std::collections::HashMap;
use std::path::Path;

use crate::builtin::builtin_agent_definitions;
use crate::error::Result;
use crate::runtime::{load_definition_file, AgentRuntime};
use crate::types::{
    AgentDefinitionDescriptor, AgentDefinitionPackage, AgentDefinitionsOptions, AgentId, AgentScope,
};

struct Entry {
    descriptor: AgentDefinitionDescriptor,
    disabled: bool,
}

impl Entry {
    fn from_package(pkg: &AgentDefinitionPackage) -> Self {
        Self {
            descriptor: pkg.descriptor(),
            disabled: pkg.frontmatter.ui_disabled(),
        }
    }
}

/// List every available agent, one descriptor per id, sorted by name.
///
/// Built-ins are seeded first, then global and project definitions overwrite
/// them by id. The two tiers are scanned concurrently. Broken files are
/// skipped with a warning. Disabled definitions still shadow lower scopes but
/// are left out of the result.
pub async fn discover_agent_definitions(
    runtime: &dyn AgentRuntime,
    options: &AgentDefinitionsOptions,
) -> Result<Vec<AgentDefinitionDescriptor>> {
    let roots = options.resolve_roots()?;
    let mut by_id: HashMap<AgentId, Entry> = HashMap::new();

    for pkg in builtin_agent_definitions()? {
        by_id.insert(pkg.id.clone(), Entry::from_package(pkg));
    }

    let (global, project) = futures::join!(
        scan_root(runtime, options, AgentScope::Global, &roots.global_root),
        scan_root(runtime, options, AgentScope::Project, &roots.project_root),
    );
    for pkg in global.iter().chain(project.iter()) {
        by_id.insert(pkg.id.clone(), Entry::from_package(pkg));
    }

    let mut descriptors: Vec<AgentDefinitionDescriptor> = by_id
        .into_values()
        .filter(|entry| !entry.disabled)
        .map(|entry| entry.descriptor)
        .collect();
    descriptors.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.id.cmp(&b.id))
    });
    Ok(descriptors)
}

async fn scan_root(
    runtime: &dyn AgentRuntime,
    options: &AgentDefinitionsOptions,
    scope: AgentScope,
    root: &Path,
) -> Vec<AgentDefinitionPackage> {
    let resolved = match runtime.resolve_path(root).await {
        Ok(path) => path,
        Err(e) => {
            tracing::warn!(%scope, root = %root.display(), "failed to resolve agents root: {e}");
            return Vec::new();
        }
    };

    let filenames = match runtime.list_markdown_files(&resolved).await {
        Ok(names) => names,
        Err(e) => {
            tracing::warn!(%scope, root = %resolved.display(), "failed to read agents directory: {e}");
            return Vec::new();
        }
    };

    let mut packages = Vec::with_capacity(filenames.len());

    for filename in filenames {
        let Some(id) = AgentId::from_filename(&filename) else {
            tracing::warn!(%scope, root = %resolved.display(), "skipping invalid agent filename '{filename}'");
            continue;
        };

        let path = resolved.join(&filename);
        match load_definition_file(runtime, &path, options.io_timeout).await {
            Ok(Some(parsed)) => packages.push(AgentDefinitionPackage {
                id,
                scope,
                frontmatter: parsed.frontmatter,
                body: parsed.body,
            }),
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(agent_id = %id, %scope, path = %path.display(), "skipping invalid agent definition: {e}");
            }
        }
    }
    packages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::LocalRuntime;
    use crate::test_support::{agent_md, init_tracing, Fixture, SlowOp, SlowRuntime};

    async fn discover(fx: &Fixture) -> Vec<AgentDefinitionDescriptor> {
        discover_agent_definitions(&LocalRuntime::new(), &fx.options())
            .await
            .unwrap()
    }

    fn find<'a>(agents: &'a [AgentDefinitionDescriptor], id: &str) -> Option<&'a AgentDefinitionDescriptor> {
        agents.iter().find(|a| a.id == id)
    }

    #[tokio::test]
    async fn includes_builtins_when_roots_are_empty() {
        let fx = Fixture::new();
        let agents = discover(&fx).await;
        let exec = find(&agents, "exec").unwrap();
        assert_eq!(exec.scope, AgentScope::BuiltIn);
        assert!(exec.subagent_runnable);
        assert!(find(&agents, "plan").is_some());
    }

    #[tokio::test]
    async fn project_agents_override_global_agents() {
        let fx = Fixture::new();
        fx.write_global("foo", &agent_md("Foo (global)", "", ""));
        fx.write_project("foo", &agent_md("Foo (project)", "", ""));
        fx.write_global("bar", &agent_md("Bar (global)", "", ""));

        let agents = discover(&fx).await;
        let foo = find(&agents, "foo").unwrap();
        assert_eq!(foo.scope, AgentScope::Project);
        assert_eq!(foo.name, "Foo (project)");
        assert_eq!(find(&agents, "bar").unwrap().scope, AgentScope::Global);
        assert_eq!(agents.iter().filter(|a| a.id == "foo").count(), 1);
    }

    #[tokio::test]
    async fn project_can_shadow_builtin() {
        let fx = Fixture::new();
        fx.write_project("exec", &agent_md("My Exec", "base: exec\n", ""));

        let agents = discover(&fx).await;
        let exec = find(&agents, "exec").unwrap();
        assert_eq!(exec.scope, AgentScope::Project);
        assert_eq!(exec.base.as_ref().unwrap(), "exec");
    }

    #[tokio::test]
    async fn disabled_project_agent_hides_global() {
        let fx = Fixture::new();
        fx.write_global("foo", &agent_md("Foo (global)", "", ""));
        fx.write_project("foo", &agent_md("Foo (project)", "ui:\n  disabled: true\n", ""));

        let agents = discover(&fx).await;
        assert!(find(&agents, "foo").is_none());
    }

    #[tokio::test]
    async fn disabling_a_builtin_removes_it() {
        let fx = Fixture::new();
        fx.write_global("plan", &agent_md("Plan", "ui:\n  disabled: true\n", ""));

        let agents = discover(&fx).await;
        assert!(find(&agents, "plan").is_none());
        assert!(find(&agents, "exec").is_some());
    }

    #[tokio::test]
    async fn invalid_files_are_skipped() {
        init_tracing();
        let fx = Fixture::new();
        fx.write_project("broken", "not a definition");
        fx.write_project("Bad Name", &agent_md("Bad", "", ""));
        fx.write_global("broken", &agent_md("Broken (global)", "", ""));
        fx.write_project("ok", &agent_md("Ok", "", ""));

        let agents = discover(&fx).await;
        // The malformed project file does not shadow the valid global one.
        assert_eq!(find(&agents, "broken").unwrap().scope, AgentScope::Global);
        assert!(find(&agents, "ok").is_some());
        assert!(!agents.iter().any(|a| a.name == "Bad"));
    }

    #[tokio::test]
    async fn filenames_are_lowercased() {
        let fx = Fixture::new();
        fx.write_project("Reviewer", &agent_md("Reviewer", "", ""));

        let agents = discover(&fx).await;
        assert_eq!(find(&agents, "reviewer").unwrap().scope, AgentScope::Project);
    }

    #[tokio::test]
    async fn discovered_ids_read_back_from_same_file() {
        let fx = Fixture::new();
        fx.write_project("Reviewer", &agent_md("Reviewer", "", "Review.\n"));

        let agents = discover(&fx).await;
        let listed = find(&agents, "reviewer").unwrap();
        let pkg = crate::reader::read_agent_definition(&LocalRuntime::new(), &fx.options(), &listed.id, None)
            .await
            .unwrap();
        assert_eq!(pkg.scope, listed.scope);
        assert_eq!(pkg.frontmatter.name, listed.name);
        assert_eq!(pkg.body, "Review.\n");
    }

    #[tokio::test]
    async fn slow_stat_drops_only_that_file() {
        let fx = Fixture::new();
        fx.write_project("stuck", &agent_md("Stuck", "", ""));
        fx.write_global("steady", &agent_md("Steady", "", ""));

        let runtime = SlowRuntime {
            inner: LocalRuntime::new(),
            slow_root: fx.project.path().to_path_buf(),
            op: SlowOp::Stat,
            delay: std::time::Duration::from_secs(30),
        };
        let options = AgentDefinitionsOptions {
            io_timeout: Some(std::time::Duration::from_millis(200)),
            ..fx.options()
        };

        let agents = tokio::time::timeout(
            std::time::Duration::from_secs(5),
            discover_agent_definitions(&runtime, &options),
        )
        .await
        .expect("discovery must not hang on a slow stat")
        .unwrap();
        assert!(find(&agents, "stuck").is_none());
        assert_eq!(find(&agents, "steady").unwrap().scope, AgentScope::Global);
    }

    #[tokio::test]
    async fn missing_roots_are_empty() {
        let fx = Fixture::new();
        let options = AgentDefinitionsOptions::with_roots(crate::types::AgentDefinitionRoots {
            project_root: fx.project.path().join("does-not-exist"),
            global_root: fx.global.path().join("does-not-exist"),
        });
        let agents = discover_agent_definitions(&LocalRuntime::new(), &options)
            .await
            .unwrap();
        assert!(agents.iter().all(|a| a.scope == AgentScope::BuiltIn));
    }

    #[tokio::test]
    async fn sorted_by_name_and_descriptor_fields() {
        let fx = Fixture::new();
        fx.write_project(
            "zed",
            &agent_md(
                "aardvark",
                "description: first\nui:\n  hidden: true\n  color: red\nsubagent:\n  runnable: true\nai:\n  model: m\n",
                "",
            ),
        );

        let agents = discover(&fx).await;
        let names: Vec<String> = agents.iter().map(|a| a.name.to_lowercase()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);

        let zed = &agents[0];
        assert_eq!(zed.id, "zed");
        assert_eq!(zed.description.as_deref(), Some("first"));
        assert!(!zed.ui_selectable);
        assert_eq!(zed.ui_color.as_deref(), Some("red"));
        assert!(zed.subagent_runnable);
        assert_eq!(zed.ai_defaults.as_ref().unwrap()["model"], "m");
    }
}
