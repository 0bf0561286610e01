#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Integration tests for the plugin resolution pipeline.
//!
//! These tests exercise the REAL pipeline over descriptor files on disk,
//! not hand-built graphs.
//!
//! ## Test Coverage
//!
//! - Descriptor loading from plugin directories (present, absent, malformed)
//! - Validation of hard and recommended dependencies
//! - Load-order resolution (precedence, permutation, idempotence)
//! - Cycle detection
//! - Directory ordering (projection, stable ties, error paths)

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use fondo_kernel::plugin::{
    DESCRIPTOR_FILE, PluginError, load_dependencies, order_plugin_dirs, plugin_local_dirs,
    resolve_load_order_from_disk, sort_plugin_dirs,
};

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_string()).collect()
}

/// Create a plugin directory under `base`, with a descriptor when given.
fn install_plugin(base: &Path, name: &str, descriptor: Option<&str>) {
    let dir = base.join(name);
    fs::create_dir_all(&dir).unwrap();
    if let Some(content) = descriptor {
        fs::write(dir.join(DESCRIPTOR_FILE), content).unwrap();
    }
}

#[test]
fn plugins_without_descriptors_impose_no_constraints() {
    let tmp = TempDir::new().unwrap();
    let installed = names(&["manifests", "exhibits", "iiif_viewer"]);
    for plugin in &installed {
        install_plugin(tmp.path(), plugin, None);
    }

    let (ordered, report) = resolve_load_order_from_disk(&installed, tmp.path()).unwrap();
    assert_eq!(ordered, installed);
    assert!(report.missing_recommends.is_empty());
}

#[test]
fn descriptors_drive_ordering() {
    let tmp = TempDir::new().unwrap();
    install_plugin(
        tmp.path(),
        "exhibits",
        Some("depends_on_plugins:\n  - manifests\nrecommends_plugins:\n  - iiif_viewer\n"),
    );
    install_plugin(tmp.path(), "manifests", None);
    install_plugin(tmp.path(), "iiif_viewer", None);

    let installed = names(&["exhibits", "manifests", "iiif_viewer"]);
    let (ordered, report) = resolve_load_order_from_disk(&installed, tmp.path()).unwrap();

    assert_eq!(ordered, names(&["manifests", "iiif_viewer", "exhibits"]));
    assert!(report.missing_recommends.is_empty());
}

#[test]
fn graph_covers_every_installed_plugin() {
    let tmp = TempDir::new().unwrap();
    install_plugin(tmp.path(), "a", Some("depends_on_plugins: [b]\n"));
    install_plugin(tmp.path(), "b", None);

    let installed = names(&["a", "b"]);
    let graph = load_dependencies(tmp.path(), &installed).unwrap();

    assert_eq!(graph.len(), 2);
    assert_eq!(graph.get("a").depends_on, names(&["b"]));
    assert!(graph.get("b").depends_on.is_empty());
}

#[test]
fn descriptor_with_unrelated_settings_parses() {
    let tmp = TempDir::new().unwrap();
    install_plugin(
        tmp.path(),
        "branding",
        Some("branding_img: logo.png\nsys_menu_html: <b>custom</b>\n"),
    );

    let installed = names(&["branding"]);
    let graph = load_dependencies(tmp.path(), &installed).unwrap();
    assert!(graph.get("branding").depends_on.is_empty());
    assert!(graph.get("branding").recommends.is_empty());
}

#[test]
fn malformed_descriptor_aborts_resolution() {
    let tmp = TempDir::new().unwrap();
    install_plugin(tmp.path(), "broken", Some("depends_on_plugins: {not: a list}\n"));
    install_plugin(tmp.path(), "fine", None);

    let installed = names(&["broken", "fine"]);
    let result = resolve_load_order_from_disk(&installed, tmp.path());
    assert!(matches!(
        result,
        Err(PluginError::InvalidDescriptor { ref plugin, .. }) if plugin == "broken"
    ));
}

#[test]
fn missing_hard_dependency_aborts_resolution() {
    let tmp = TempDir::new().unwrap();
    install_plugin(tmp.path(), "exhibits", Some("depends_on_plugins: [manifests]\n"));

    let installed = names(&["exhibits"]);
    let result = resolve_load_order_from_disk(&installed, tmp.path());

    let err = result.unwrap_err();
    assert_eq!(
        err.to_string(),
        "plugin 'exhibits' is missing dependency plugin(s): manifests"
    );
}

#[test]
fn missing_recommendation_is_reported_not_fatal() {
    let tmp = TempDir::new().unwrap();
    install_plugin(tmp.path(), "exhibits", Some("recommends_plugins: [iiif_viewer]\n"));
    install_plugin(tmp.path(), "manifests", None);

    let installed = names(&["exhibits", "manifests"]);
    let (ordered, report) = resolve_load_order_from_disk(&installed, tmp.path()).unwrap();

    assert!(ordered.contains(&"exhibits".to_string()));
    assert_eq!(report.missing_recommends.len(), 1);
    assert_eq!(report.missing_recommends[0].plugin, "exhibits");
    assert_eq!(report.missing_recommends[0].missing, names(&["iiif_viewer"]));
}

#[test]
fn hard_dependency_cycle_is_fatal() {
    let tmp = TempDir::new().unwrap();
    install_plugin(tmp.path(), "a", Some("depends_on_plugins: [b]\n"));
    install_plugin(tmp.path(), "b", Some("depends_on_plugins: [a]\n"));

    let installed = names(&["a", "b"]);
    let result = resolve_load_order_from_disk(&installed, tmp.path());
    assert!(matches!(
        result,
        Err(PluginError::DependencyCycle { ref plugins }) if plugins == "a, b"
    ));
}

#[test]
fn ordering_is_an_idempotent_permutation_honoring_precedence() {
    let tmp = TempDir::new().unwrap();
    install_plugin(tmp.path(), "exhibits", Some("depends_on_plugins: [manifests, storage]\n"));
    install_plugin(tmp.path(), "manifests", Some("depends_on_plugins: [storage]\n"));
    install_plugin(tmp.path(), "storage", None);
    install_plugin(tmp.path(), "oai", Some("recommends_plugins: [manifests]\n"));
    install_plugin(tmp.path(), "reports", None);

    let installed = names(&["exhibits", "manifests", "storage", "oai", "reports"]);
    let (first, _) = resolve_load_order_from_disk(&installed, tmp.path()).unwrap();
    let (second, _) = resolve_load_order_from_disk(&installed, tmp.path()).unwrap();

    assert_eq!(first, second);

    let mut as_set = first.clone();
    as_set.sort();
    let mut expected = installed.clone();
    expected.sort();
    assert_eq!(as_set, expected);

    let pos = |name: &str| first.iter().position(|x| x == name).unwrap();
    assert!(pos("storage") < pos("manifests"));
    assert!(pos("storage") < pos("exhibits"));
    assert!(pos("manifests") < pos("exhibits"));
    assert!(pos("manifests") < pos("oai"));
}

#[test]
fn full_pipeline_orders_directories() {
    let tmp = TempDir::new().unwrap();
    install_plugin(tmp.path(), "c", Some("depends_on_plugins: [b]\n"));
    install_plugin(tmp.path(), "b", Some("depends_on_plugins: [a]\n"));
    install_plugin(tmp.path(), "a", None);

    let installed = names(&["c", "a", "b"]);
    let dirs = vec![
        tmp.path().join("c/x"),
        tmp.path().join("a/y"),
        tmp.path().join("a/z"),
        tmp.path().join("b/w"),
    ];

    let sorted = order_plugin_dirs(&dirs, &installed, tmp.path()).unwrap();
    assert_eq!(
        sorted,
        vec![
            tmp.path().join("a/y"),
            tmp.path().join("a/z"),
            tmp.path().join("b/w"),
            tmp.path().join("c/x"),
        ]
    );
}

#[test]
fn artifact_type_directories_sort_stably_per_plugin() {
    let tmp = TempDir::new().unwrap();
    install_plugin(tmp.path(), "b", Some("depends_on_plugins: [a]\n"));
    install_plugin(tmp.path(), "a", None);

    let installed = names(&["b", "a"]);
    let mut dirs: Vec<PathBuf> = plugin_local_dirs(tmp.path(), &installed, Some("frontend"));
    dirs.extend(plugin_local_dirs(tmp.path(), &installed, Some("backend")));

    let sorted = order_plugin_dirs(&dirs, &installed, tmp.path()).unwrap();
    assert_eq!(
        sorted,
        vec![
            tmp.path().join("a/frontend"),
            tmp.path().join("a/backend"),
            tmp.path().join("b/frontend"),
            tmp.path().join("b/backend"),
        ]
    );
}

#[test]
fn directory_outside_base_is_fatal() {
    let tmp = TempDir::new().unwrap();
    let elsewhere = TempDir::new().unwrap();
    install_plugin(tmp.path(), "a", None);

    let installed = names(&["a"]);
    let dirs = vec![elsewhere.path().join("a")];

    let result = order_plugin_dirs(&dirs, &installed, tmp.path());
    assert!(matches!(result, Err(PluginError::UnexpectedPluginDir { .. })));
}

#[test]
fn directory_for_unlisted_plugin_is_fatal() {
    let tmp = TempDir::new().unwrap();
    install_plugin(tmp.path(), "a", None);

    let ordered = names(&["a"]);
    let dirs = vec![tmp.path().join("surprise")];

    let result = sort_plugin_dirs(&dirs, &ordered, tmp.path());
    assert!(matches!(
        result,
        Err(PluginError::UnorderedPlugin { ref plugin }) if plugin == "surprise"
    ));
}
