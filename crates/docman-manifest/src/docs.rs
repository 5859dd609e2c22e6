//! Cross-check of nav targets against a docs directory.

use std::collections::{BTreeSet, HashSet};
use std::path::{Component, Path, PathBuf};

use glob::{MatchOptions, Pattern};

use crate::error::ManifestError;
use crate::manifest::Manifest;
use crate::validate::{Diagnostic, Report, escapes_docs_dir};

/// Settings for [`check_docs`].
#[derive(Clone, Debug)]
pub struct DocsCheckOptions {
    /// Document extensions scanned for orphans, without the leading dot.
    pub extensions: Vec<String>,
    /// Report documents that no nav entry references.
    pub orphans: bool,
    /// Glob patterns, relative to the docs directory, skipped by the orphan scan.
    pub exclude: Vec<String>,
}

impl Default for DocsCheckOptions {
    fn default() -> Self {
        Self {
            extensions: vec!["md".to_owned(), "markdown".to_owned()],
            orphans: false,
            exclude: Vec::new(),
        }
    }
}

/// Check that every nav page exists under `docs_dir`, and optionally that
/// every document under `docs_dir` is reachable from the nav.
pub fn check_docs(
    manifest: &Manifest,
    docs_dir: &Path,
    options: &DocsCheckOptions,
) -> Result<Report, ManifestError> {
    if !docs_dir.is_dir() {
        return Err(ManifestError::DocsDirNotFound(docs_dir.to_path_buf()));
    }

    let exclude = options
        .exclude
        .iter()
        .map(|p| {
            Pattern::new(p).map_err(|source| ManifestError::Pattern {
                pattern: p.clone(),
                source,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut report = Report::new();
    let mut referenced: HashSet<String> = HashSet::new();

    for page in manifest.pages() {
        let rel = normalize(page.path);
        if rel.is_empty() || escapes_docs_dir(&rel) {
            // Reported by `validate` as nav-empty-path / nav-absolute-path.
            continue;
        }
        let target = docs_dir.join(&rel);
        if !target.is_file() {
            let location = if page.trail.is_empty() {
                format!("nav > {}", page.path)
            } else {
                format!("nav > {}", page.trail.join(" > "))
            };
            report.push(Diagnostic::error(
                "docs-missing-page",
                format!("nav references missing file {}", target.display()),
                Some(location),
            ));
        }
        referenced.insert(rel);
    }

    if options.orphans {
        for rel in scan_documents(docs_dir, &options.extensions)? {
            if exclude.iter().any(|p| p.matches(&rel)) || referenced.contains(&rel) {
                continue;
            }
            report.push(Diagnostic::warning(
                "docs-orphan-page",
                format!("document {rel} is not referenced in nav"),
                None,
            ));
        }
    }

    tracing::debug!(
        docs_dir = %docs_dir.display(),
        pages = referenced.len(),
        findings = report.len(),
        "Checked docs directory"
    );

    Ok(report)
}

/// Relative paths (with `/` separators) of every document under `docs_dir`.
///
/// Extensions match case-insensitively, like nav path validation.
fn scan_documents(
    docs_dir: &Path,
    extensions: &[String],
) -> Result<BTreeSet<String>, ManifestError> {
    // glob drops a leading `./` from the paths it yields
    let root = without_cur_dir(docs_dir);
    let prefix = if root.as_os_str().is_empty() {
        String::new()
    } else {
        format!("{}/", Pattern::escape(&root.to_string_lossy()))
    };
    let match_options = MatchOptions {
        case_sensitive: false,
        ..MatchOptions::new()
    };
    let mut found = BTreeSet::new();

    for ext in extensions {
        let pattern = format!("{prefix}**/*.{}", Pattern::escape(ext));
        let paths =
            glob::glob_with(&pattern, match_options).map_err(|source| ManifestError::Pattern {
                pattern: pattern.clone(),
                source,
            })?;
        for entry in paths {
            let path = match entry {
                Ok(path) => path,
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping unreadable path during docs scan");
                    continue;
                }
            };
            let Ok(rel) = path
                .strip_prefix(&root)
                .or_else(|_| path.strip_prefix(docs_dir))
            else {
                tracing::warn!(
                    path = %path.display(),
                    docs_dir = %docs_dir.display(),
                    "Scanned path is outside the docs directory"
                );
                continue;
            };
            let rel = rel
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            found.insert(rel);
        }
    }

    Ok(found)
}

/// `dir` with `.` components removed; `./docs` becomes `docs`, `.` becomes empty.
fn without_cur_dir(dir: &Path) -> PathBuf {
    dir.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

fn normalize(path: &str) -> String {
    path.trim_start_matches("./").to_owned()
}
