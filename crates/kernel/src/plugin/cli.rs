//! CLI command implementations for plugin management.
//!
//! These commands run with plain filesystem access only, without starting
//! the full application.

use std::path::Path;

use anyhow::Result;

use super::{load_dependencies, resolve_load_order, validate_dependencies};

/// Print the resolved plugin load order.
pub fn cmd_plugin_order(plugins_dir: &Path, plugins: &[String]) -> Result<()> {
    if plugins.is_empty() {
        println!("No plugins configured.");
        return Ok(());
    }

    let graph = load_dependencies(plugins_dir, plugins)?;
    let report = validate_dependencies(plugins, &graph)?;
    let ordered = resolve_load_order(plugins, &graph)?;

    println!(
        "{:<10} {:<24} {:<28} {}",
        "POSITION", "PLUGIN", "DEPENDS ON", "RECOMMENDS"
    );
    println!("{}", "-".repeat(80));

    for (position, plugin) in ordered.iter().enumerate() {
        let deps = graph.get(plugin);
        let depends_on = if deps.depends_on.is_empty() {
            "-".to_string()
        } else {
            deps.depends_on.join(", ")
        };
        let recommends = if deps.recommends.is_empty() {
            "-".to_string()
        } else {
            deps.recommends.join(", ")
        };

        println!(
            "{:<10} {:<24} {:<28} {}",
            position + 1,
            plugin,
            depends_on,
            recommends
        );
    }

    for entry in &report.missing_recommends {
        println!(
            "note: plugin '{}' recommends additional plugin(s): {}",
            entry.plugin,
            entry.missing.join(", ")
        );
    }

    Ok(())
}
