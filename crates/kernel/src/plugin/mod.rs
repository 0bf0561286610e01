//! Plugin system for Fondo.
//!
//! This module handles:
//! - Parsing plugin dependency descriptors from `config.yml` files
//! - Validating hard and recommended dependencies against the installed set
//! - Resolving a deterministic plugin load order
//! - Sorting plugin-owned directories into that order

mod cli;
mod dependency;
mod descriptor;
mod error;
mod paths;

pub use cli::cmd_plugin_order;
pub use dependency::{
    MissingRecommends, ValidationReport, resolve_load_order, validate_dependencies,
};
pub use descriptor::{DESCRIPTOR_FILE, DependencyGraph, PluginDependencies, load_dependencies};
pub use error::PluginError;
pub use paths::{plugin_local_dirs, sort_plugin_dirs};

use std::path::{Path, PathBuf};

/// Resolve the load order for `installed` from descriptors on disk.
///
/// Loads every plugin's descriptor, validates the declarations, and computes
/// the order. The report carries unsatisfied recommendations; a hard failure
/// at any stage aborts with an error and no partial ordering.
pub fn resolve_load_order_from_disk(
    installed: &[String],
    plugin_base_dir: &Path,
) -> Result<(Vec<String>, ValidationReport), PluginError> {
    let graph = load_dependencies(plugin_base_dir, installed)?;
    let report = validate_dependencies(installed, &graph)?;
    let ordered = resolve_load_order(installed, &graph)?;
    Ok((ordered, report))
}

/// Sort `dirs` so that every plugin's directories come after the directories
/// of the plugins it depends on.
///
/// One-call form of the full pipeline: descriptor loading, validation,
/// ordering, and directory sorting.
pub fn order_plugin_dirs(
    dirs: &[PathBuf],
    installed: &[String],
    plugin_base_dir: &Path,
) -> Result<Vec<PathBuf>, PluginError> {
    let (ordered, _report) = resolve_load_order_from_disk(installed, plugin_base_dir)?;
    sort_plugin_dirs(dirs, &ordered, plugin_base_dir)
}
