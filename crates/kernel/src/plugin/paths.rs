//! Sorting plugin-owned directories into a computed load order.
//!
//! Hosts collect per-plugin directories (often one per plugin per artifact
//! type, e.g. `frontend` and `backend` trees) and need them sorted so that a
//! plugin's files are always processed after the files of every plugin it
//! depends on.

use std::path::{Component, Path, PathBuf};

use super::error::PluginError;

/// Per-plugin local directories, in plugin-list order.
///
/// With `subpath` set, yields `<base>/<plugin>/<subpath>` for each plugin;
/// otherwise `<base>/<plugin>`. Existence is not checked — callers filter
/// for the artifact types they actually ship.
pub fn plugin_local_dirs(
    plugin_base_dir: &Path,
    plugins: &[String],
    subpath: Option<&str>,
) -> Vec<PathBuf> {
    plugins
        .iter()
        .map(|plugin| {
            let dir = plugin_base_dir.join(plugin);
            match subpath {
                Some(sub) => dir.join(sub),
                None => dir,
            }
        })
        .collect()
}

/// Sort plugin directories by their owning plugin's position in `ordered`.
///
/// Every directory must live under `plugin_base_dir`; the owning plugin is
/// the first path segment below it. The base directory and every supplied
/// path are resolved to absolute form first, and the returned paths are the
/// absolute ones. The sort is stable: several directories owned by one
/// plugin keep their relative input order.
///
/// # Errors
/// - [`PluginError::UnexpectedPluginDir`] if a path is not under the base
///   directory.
/// - [`PluginError::UnorderedPlugin`] if a path's owning plugin does not
///   appear in `ordered`.
pub fn sort_plugin_dirs(
    dirs: &[PathBuf],
    ordered: &[String],
    plugin_base_dir: &Path,
) -> Result<Vec<PathBuf>, PluginError> {
    let base = absolute(plugin_base_dir)?;

    let mut keyed: Vec<(usize, PathBuf)> = Vec::with_capacity(dirs.len());
    for dir in dirs {
        let dir = absolute(dir)?;
        let plugin = owning_plugin(&dir, &base)?;
        let position = ordered
            .iter()
            .position(|candidate| candidate == plugin)
            .ok_or_else(|| PluginError::UnorderedPlugin {
                plugin: plugin.to_string(),
            })?;
        keyed.push((position, dir));
    }

    keyed.sort_by_key(|(position, _)| *position);
    Ok(keyed.into_iter().map(|(_, dir)| dir).collect())
}

/// The plugin that owns `dir`: the first normal path segment under `base`.
///
/// A literal `.` segment is skipped, so `<base>/./blog` resolves to `blog`.
fn owning_plugin<'a>(dir: &'a Path, base: &Path) -> Result<&'a str, PluginError> {
    let unexpected = || PluginError::UnexpectedPluginDir {
        dir: dir.display().to_string(),
        base: format!("{}{}", base.display(), std::path::MAIN_SEPARATOR),
    };

    let relative = dir.strip_prefix(base).map_err(|_| unexpected())?;

    relative
        .components()
        .find_map(|component| match component {
            Component::Normal(segment) => segment.to_str(),
            _ => None,
        })
        .ok_or_else(unexpected)
}

fn absolute(path: &Path) -> Result<PathBuf, PluginError> {
    std::path::absolute(path).map_err(|source| PluginError::PathResolve {
        path: path.display().to_string(),
        source,
    })
}
