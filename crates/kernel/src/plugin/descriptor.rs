//! Parser for plugin `config.yml` dependency descriptors.
//!
//! Each plugin directory may carry a `config.yml` declaring which other
//! plugins it depends on (`depends_on_plugins`) or recommends
//! (`recommends_plugins`). Plugins without a descriptor impose no ordering
//! constraints.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use super::error::PluginError;

/// Name of the descriptor file looked up inside each plugin directory.
pub const DESCRIPTOR_FILE: &str = "config.yml";

/// Dependency declarations parsed from a plugin's `config.yml`.
///
/// Descriptor files routinely carry unrelated plugin settings; anything
/// beyond the two dependency keys is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PluginDependencies {
    /// Plugins that must be ordered before this one.
    #[serde(default, rename = "depends_on_plugins")]
    pub depends_on: Vec<String>,

    /// Plugins this one prefers to be ordered after, but can load without.
    #[serde(default, rename = "recommends_plugins")]
    pub recommends: Vec<String>,
}

impl PluginDependencies {
    /// Parse a descriptor from YAML text.
    pub fn parse_str(plugin: &str, content: &str) -> Result<Self, PluginError> {
        serde_yml::from_str(content)
            .map_err(|e| PluginError::invalid_descriptor(plugin, e.to_string()))
    }
}

/// Dependency declarations for every installed plugin.
///
/// The domain always equals the installed-plugin set: plugins without a
/// descriptor file map to the empty declaration.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    plugins: HashMap<String, PluginDependencies>,
}

static NO_DEPENDENCIES: PluginDependencies = PluginDependencies {
    depends_on: Vec::new(),
    recommends: Vec::new(),
};

impl DependencyGraph {
    /// Look up a plugin's declarations.
    ///
    /// Names outside the graph read as declaring nothing, so lookups are
    /// total for any plugin the loader covered.
    pub fn get(&self, plugin: &str) -> &PluginDependencies {
        self.plugins.get(plugin).unwrap_or(&NO_DEPENDENCIES)
    }

    /// Number of plugins covered by the graph.
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    /// True when the graph covers no plugins.
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}

impl FromIterator<(String, PluginDependencies)> for DependencyGraph {
    fn from_iter<I: IntoIterator<Item = (String, PluginDependencies)>>(iter: I) -> Self {
        Self {
            plugins: iter.into_iter().collect(),
        }
    }
}

/// Build the dependency graph for a set of installed plugins.
///
/// Reads `<plugin_base_dir>/<plugin>/config.yml` for each installed plugin.
/// A missing descriptor file means the plugin declares nothing; a descriptor
/// that exists but cannot be read or parsed is fatal. The returned graph
/// always covers the full installed set.
pub fn load_dependencies(
    plugin_base_dir: &Path,
    installed: &[String],
) -> Result<DependencyGraph, PluginError> {
    let mut plugins = HashMap::with_capacity(installed.len());

    for plugin in installed {
        let descriptor = plugin_base_dir.join(plugin).join(DESCRIPTOR_FILE);
        if !descriptor.is_file() {
            plugins.insert(plugin.clone(), PluginDependencies::default());
            continue;
        }

        let content = std::fs::read_to_string(&descriptor).map_err(|e| {
            PluginError::invalid_descriptor(
                plugin,
                format!("failed to read {}: {e}", descriptor.display()),
            )
        })?;

        let deps = PluginDependencies::parse_str(plugin, &content)?;
        debug!(
            plugin = %plugin,
            depends_on = ?deps.depends_on,
            recommends = ?deps.recommends,
            "loaded plugin descriptor"
        );
        plugins.insert(plugin.clone(), deps);
    }

    Ok(DependencyGraph { plugins })
}
