//! Plugin dependency validation and load-order resolution.
//!
//! Orders plugins so that every plugin is processed after the plugins it
//! depends on. Soft ("recommends") constraints are honored when possible
//! and relaxed when they cannot be satisfied; hard constraints never are.

use std::collections::HashSet;

use tracing::info;

use super::descriptor::DependencyGraph;
use super::error::PluginError;

/// A plugin whose recommended partners are not all installed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingRecommends {
    /// The recommending plugin.
    pub plugin: String,
    /// Recommended plugins that are not installed, in declared order.
    pub missing: Vec<String>,
}

/// Outcome of dependency validation: informational findings only.
///
/// Fatal findings abort validation with an error instead of appearing here.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    /// Unsatisfied recommendations, in installed-plugin order.
    pub missing_recommends: Vec<MissingRecommends>,
}

/// Check every plugin's declarations against the installed set.
///
/// A hard dependency on a plugin that is not installed is fatal and aborts
/// resolution before any ordering is attempted. An unsatisfied
/// recommendation is recorded in the report, logged, and otherwise ignored.
///
/// # Errors
/// Returns [`PluginError::MissingDependencies`] for the first plugin (in
/// installed order) with a hard dependency outside the installed set.
pub fn validate_dependencies(
    installed: &[String],
    graph: &DependencyGraph,
) -> Result<ValidationReport, PluginError> {
    let installed_set: HashSet<&str> = installed.iter().map(String::as_str).collect();
    let mut report = ValidationReport::default();

    for plugin in installed {
        let deps = graph.get(plugin);

        let missing_hard: Vec<String> = deps
            .depends_on
            .iter()
            .filter(|dep| !installed_set.contains(dep.as_str()))
            .cloned()
            .collect();
        if !missing_hard.is_empty() {
            return Err(PluginError::missing_dependencies(plugin, &missing_hard));
        }

        let missing_soft: Vec<String> = deps
            .recommends
            .iter()
            .filter(|dep| !installed_set.contains(dep.as_str()))
            .cloned()
            .collect();
        if !missing_soft.is_empty() {
            info!(
                plugin = %plugin,
                recommends = %missing_soft.join(", "),
                "plugin recommends additional plugin(s) that are not installed"
            );
            report.missing_recommends.push(MissingRecommends {
                plugin: plugin.clone(),
                missing: missing_soft,
            });
        }
    }

    Ok(report)
}

/// Resolve plugin load order based on declared dependencies.
///
/// Works in rounds over the not-yet-ordered set. Each round first takes
/// every plugin whose hard *and* recommended prerequisites are already
/// ordered; when that selects nothing it retries with hard dependencies
/// alone, so an unsatisfiable recommendation never wedges resolution. When
/// even the relaxed pass selects nothing, the remaining plugins block each
/// other through hard dependencies and the cycle is reported.
///
/// The result is a permutation of `installed`. Selection follows the input
/// order, so identical inputs always produce identical orderings.
///
/// # Errors
/// Returns [`PluginError::DependencyCycle`] naming the plugins still
/// unordered when no further progress can be made.
pub fn resolve_load_order(
    installed: &[String],
    graph: &DependencyGraph,
) -> Result<Vec<String>, PluginError> {
    let mut to_process: Vec<&str> = installed.iter().map(String::as_str).collect();
    let mut ordered: Vec<String> = Vec::with_capacity(installed.len());
    let mut ordered_set: HashSet<&str> = HashSet::with_capacity(installed.len());

    while !to_process.is_empty() {
        // Plugins whose full prerequisite set, recommendations included, is
        // already ordered.
        let mut ready: Vec<&str> = to_process
            .iter()
            .copied()
            .filter(|plugin| {
                let deps = graph.get(plugin);
                deps.depends_on
                    .iter()
                    .chain(deps.recommends.iter())
                    .all(|dep| ordered_set.contains(dep.as_str()))
            })
            .collect();

        // Relaxed pass: hard dependencies only.
        if ready.is_empty() {
            ready = to_process
                .iter()
                .copied()
                .filter(|plugin| {
                    graph
                        .get(plugin)
                        .depends_on
                        .iter()
                        .all(|dep| ordered_set.contains(dep.as_str()))
                })
                .collect();
        }

        if ready.is_empty() {
            return Err(PluginError::dependency_cycle(&to_process));
        }

        for plugin in &ready {
            ordered.push((*plugin).to_string());
        }
        ordered_set.extend(ready.iter().copied());
        to_process.retain(|plugin| !ordered_set.contains(plugin));
    }

    Ok(ordered)
}
