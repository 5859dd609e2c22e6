//! End-to-end checks against a realistic manifest.

use std::path::{Path, PathBuf};

use docman_manifest::{
    DocsCheckOptions, Manifest, NavTarget, ValidationOptions, check_docs, validate,
};
use pretty_assertions::assert_eq;

fn fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/mkdocs.yml")
}

fn load() -> Manifest {
    Manifest::load(&fixture()).unwrap()
}

#[test]
fn nav_order_is_literal() {
    let labels = load().top_level_labels();
    assert_eq!(
        labels[..6].to_vec(),
        vec!["Home", "Install", "AvailableModels", "EasyBIT", "Eval", "Transform"]
    );
    assert_eq!(labels.last().map(String::as_str), Some("Contributing"));
}

#[test]
fn site_metadata() {
    let manifest = load();
    assert_eq!(manifest.site.site_name, "EasyDel");
    assert_eq!(manifest.site.site_author.as_deref(), Some("Erfan Zare Chavoshi"));
    assert_eq!(
        manifest.site.copyright.as_deref(),
        Some("Erfan Zare Chavoshi-EasyDel")
    );
    assert_eq!(
        manifest.site.repo_url.as_deref(),
        Some("https://github.com/erfanzar/EasyDeL")
    );
}

#[test]
fn theme_and_plugins() {
    let manifest = load();
    let theme = manifest.theme.as_ref().unwrap();
    assert_eq!(theme.name.as_deref(), Some("readthedocs"));
    assert_eq!(theme.highlightjs(), Some(true));
    assert_eq!(theme.hljs_languages(), vec!["yaml", "python"]);

    let plugins = manifest.plugins.as_ref().unwrap();
    assert_eq!(plugins.names(), vec!["search", "mkdocstrings"]);
    assert_eq!(manifest.docstring_style(), Some("sphinx"));
}

#[test]
fn every_page_has_document_extension() {
    let manifest = load();
    let pages = manifest.pages();
    assert_eq!(pages.len(), 12);
    assert!(
        pages
            .iter()
            .all(|p| !p.path.is_empty() && p.path.ends_with(".md"))
    );
    assert!(validate(&manifest, &ValidationOptions::default()).is_empty());
}

#[test]
fn nav_is_shallow() {
    let manifest = load();
    let nav = manifest.nav.as_ref().unwrap();
    assert_eq!(nav.depth(), 2);
    assert!(matches!(
        nav.entries[6].target,
        NavTarget::Section(ref children) if children.len() == 2
    ));
}

#[test]
fn roundtrip_preserves_structure() {
    let manifest = load();
    let original: serde_yaml::Value =
        serde_yaml::from_str(&std::fs::read_to_string(fixture()).unwrap()).unwrap();

    let text = manifest.to_yaml_string().unwrap();
    let reparsed_value: serde_yaml::Value = serde_yaml::from_str(&text).unwrap();
    assert_eq!(reparsed_value, original);

    let reparsed = Manifest::from_yaml_str(&text).unwrap();
    assert_eq!(reparsed, manifest);
    assert_eq!(reparsed.top_level_labels(), manifest.top_level_labels());
}

#[test]
fn docs_directory_cross_check() {
    let manifest = load();
    let dir = tempfile::tempdir().unwrap();
    for page in manifest.pages() {
        std::fs::write(dir.path().join(page.path), "# Page\n").unwrap();
    }
    std::fs::write(dir.path().join("Unlisted.md"), "# Orphan\n").unwrap();

    let options = DocsCheckOptions {
        orphans: true,
        ..DocsCheckOptions::default()
    };
    let report = check_docs(&manifest, dir.path(), &options).unwrap();
    assert_eq!(report.codes(), vec!["docs-orphan-page"]);

    std::fs::remove_file(dir.path().join("Install.md")).unwrap();
    let report = check_docs(&manifest, dir.path(), &DocsCheckOptions::default()).unwrap();
    assert_eq!(report.codes(), vec!["docs-missing-page"]);
    assert!(report.has_errors());
}
