//! Plugin system error types with clear, actionable messages.
//!
//! All errors include the plugin name and relevant context to help
//! operators quickly identify and fix configuration issues.

use thiserror::Error;

/// Errors that can occur during plugin dependency resolution and ordering.
#[derive(Debug, Error)]
pub enum PluginError {
    /// The plugin's dependency descriptor could not be read or parsed.
    #[error("plugin '{plugin}': invalid dependency descriptor: {details}")]
    InvalidDescriptor { plugin: String, details: String },

    /// Plugin declares hard dependencies on plugins that aren't installed.
    #[error("plugin '{plugin}' is missing dependency plugin(s): {missing}")]
    MissingDependencies { plugin: String, missing: String },

    /// No plugin in the remaining set has all of its hard dependencies
    /// ordered, so resolution cannot make progress.
    #[error("plugin dependency cycle detected among the following plugins: {plugins}")]
    DependencyCycle { plugins: String },

    /// A directory supplied for ordering does not live under the plugin
    /// base directory.
    #[error("unexpected plugin dir: '{dir}' was expected to begin with '{base}'")]
    UnexpectedPluginDir { dir: String, base: String },

    /// A directory's owning plugin is absent from the computed load order.
    #[error("expected to find plugin '{plugin}' in the computed load order but didn't")]
    UnorderedPlugin { plugin: String },

    /// A supplied path could not be resolved to absolute form.
    #[error("failed to resolve '{path}' to an absolute path")]
    PathResolve {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl PluginError {
    /// Create a missing-dependencies error, naming the missing plugins in
    /// their declared order.
    pub fn missing_dependencies(plugin: impl Into<String>, missing: &[String]) -> Self {
        Self::MissingDependencies {
            plugin: plugin.into(),
            missing: missing.join(", "),
        }
    }

    /// Create a dependency-cycle error naming the stuck plugin set.
    pub fn dependency_cycle(remaining: &[&str]) -> Self {
        Self::DependencyCycle {
            plugins: remaining.join(", "),
        }
    }

    /// Create an invalid-descriptor error.
    pub fn invalid_descriptor(plugin: impl Into<String>, details: impl Into<String>) -> Self {
        Self::InvalidDescriptor {
            plugin: plugin.into(),
            details: details.into(),
        }
    }
}
