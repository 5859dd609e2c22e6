//! Structural validation of a loaded manifest.
//!
//! Findings are collected into a [`Report`] rather than returned as errors:
//! a manifest with problems is still a manifest, and callers decide what
//! severity fails a build.

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::manifest::Manifest;
use crate::nav::{NavEntry, NavTarget};

/// Diagnostic severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Fails the check.
    Error,
    /// Reported, does not fail the check.
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => f.write_str("error"),
            Self::Warning => f.write_str("warning"),
        }
    }
}

/// One structural finding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    /// Severity.
    pub severity: Severity,
    /// Stable rule code (e.g., `nav-extension`).
    pub code: &'static str,
    /// Human-readable description.
    pub message: String,
    /// Position in the manifest (e.g., "nav > Modules > GPT2").
    pub location: Option<String>,
}

impl Diagnostic {
    pub(crate) fn error(code: &'static str, message: String, location: Option<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message,
            location,
        }
    }

    pub(crate) fn warning(code: &'static str, message: String, location: Option<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message,
            location,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.code, self.message)?;
        if let Some(location) = &self.location {
            write!(f, " (at {location})")?;
        }
        Ok(())
    }
}

/// Ordered collection of diagnostics, in discovery order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Report {
    diagnostics: Vec<Diagnostic>,
}

impl Report {
    /// Empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Append another report.
    pub fn extend(&mut self, other: Report) {
        self.diagnostics.extend(other.diagnostics);
    }

    /// All diagnostics in discovery order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Diagnostics ordered for display: errors first, otherwise stable.
    pub fn sorted(&self) -> Vec<&Diagnostic> {
        let mut out: Vec<_> = self.diagnostics.iter().collect();
        out.sort_by_key(|d| d.severity);
        out
    }

    /// Error diagnostics.
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
    }

    /// Warning diagnostics.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }

    /// Whether any error was reported.
    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    /// Whether nothing was reported.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Number of diagnostics.
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Diagnostic codes in discovery order.
    pub fn codes(&self) -> Vec<&'static str> {
        self.diagnostics.iter().map(|d| d.code).collect()
    }
}

/// Settings for [`validate`].
#[derive(Clone, Debug)]
pub struct ValidationOptions {
    /// Recognized document extensions, without the leading dot.
    pub extensions: Vec<String>,
    /// Maximum section nesting; top-level entries are depth 1.
    pub max_depth: usize,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            extensions: vec!["md".to_owned(), "markdown".to_owned()],
            max_depth: 3,
        }
    }
}

/// Whether `path` ends in one of `extensions` (case-insensitive).
pub(crate) fn has_document_extension(path: &str, extensions: &[String]) -> bool {
    let name = path.rsplit('/').next().unwrap_or(path);
    name.rsplit_once('.').is_some_and(|(stem, ext)| {
        !stem.is_empty() && extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))
    })
}

/// Whether `path` is absolute or climbs out of the docs directory.
pub(crate) fn escapes_docs_dir(path: &str) -> bool {
    path.starts_with('/') || path.split('/').any(|segment| segment == "..")
}

/// Run every structural check against `manifest`.
pub fn validate(manifest: &Manifest, options: &ValidationOptions) -> Report {
    let mut report = Report::new();

    if let Some(nav) = &manifest.nav {
        check_sibling_labels(&nav.entries, "nav", &mut report);

        let mut seen_pages: HashSet<&str> = HashSet::new();
        for node in nav.walk() {
            let location = Some(format!("nav > {}", node.location));

            if node.entry.label.as_deref() == Some("") {
                report.push(Diagnostic::error(
                    "nav-empty-label",
                    "nav label is empty".to_owned(),
                    location.clone(),
                ));
            }

            if node.depth == options.max_depth + 1 {
                report.push(Diagnostic::error(
                    "nav-depth",
                    format!(
                        "nav is nested {} levels deep, limit is {}",
                        node.depth, options.max_depth
                    ),
                    location.clone(),
                ));
            }

            match &node.entry.target {
                NavTarget::Page(path) => {
                    check_page_path(path, options, location.clone(), &mut report);
                    if !path.is_empty() && !seen_pages.insert(path.as_str()) {
                        report.push(Diagnostic::warning(
                            "nav-duplicate-page",
                            format!("page {path:?} is referenced more than once"),
                            location,
                        ));
                    }
                }
                NavTarget::Section(children) => {
                    if children.is_empty() {
                        report.push(Diagnostic::warning(
                            "nav-empty-section",
                            "section has no entries".to_owned(),
                            location.clone(),
                        ));
                    }
                    let parent = format!("nav > {}", node.location);
                    check_sibling_labels(children, &parent, &mut report);
                }
                NavTarget::Link(_) => {}
            }
        }
    }

    if let Some(plugins) = &manifest.plugins {
        let mut seen = HashSet::new();
        for plugin in &plugins.items {
            if !seen.insert(plugin.name.as_str()) {
                report.push(Diagnostic::error(
                    "plugin-duplicate",
                    format!("plugin {:?} is enabled more than once", plugin.name),
                    Some("plugins".to_owned()),
                ));
            }
        }
    }

    if manifest.theme.is_none() {
        report.push(Diagnostic::warning(
            "theme-missing",
            "no theme is configured".to_owned(),
            None,
        ));
    }

    report
}

fn check_page_path(
    path: &str,
    options: &ValidationOptions,
    location: Option<String>,
    report: &mut Report,
) {
    if path.is_empty() {
        report.push(Diagnostic::error(
            "nav-empty-path",
            "page path is empty".to_owned(),
            location,
        ));
        return;
    }
    if escapes_docs_dir(path) {
        report.push(Diagnostic::error(
            "nav-absolute-path",
            format!("page path {path:?} must stay inside the docs directory"),
            location.clone(),
        ));
    }
    if !has_document_extension(path, &options.extensions) {
        report.push(Diagnostic::error(
            "nav-extension",
            format!(
                "page path {path:?} does not end in a document extension ({})",
                options.extensions.join(", ")
            ),
            location,
        ));
    }
}

fn check_sibling_labels(entries: &[NavEntry], parent: &str, report: &mut Report) {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for label in entries.iter().filter_map(|e| e.label.as_deref()) {
        let count = counts.entry(label).or_default();
        *count += 1;
        if *count == 2 {
            report.push(Diagnostic::warning(
                "nav-duplicate-label",
                format!("label {label:?} is used by more than one sibling"),
                Some(parent.to_owned()),
            ));
        }
    }
}
