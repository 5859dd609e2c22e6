//! Navigation tree.
//!
//! The nav is an ordered list of entries. Each entry is one of:
//! - `- Label: page.md` (labelled page or external link)
//! - `- Label: [entries]` (section)
//! - `- page.md` (bare page, label left to the site generator)
//!
//! Order is significant and preserved exactly as written.

use serde::Serialize;
use serde_yaml::{Mapping, Value};

use crate::error::ManifestError;

/// URL schemes treated as external links rather than document paths.
const LINK_PREFIXES: &[&str] = &["http://", "https://", "mailto:"];

/// Target of a navigation entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavTarget {
    /// Document path relative to the docs directory.
    Page(String),
    /// External URL.
    Link(String),
    /// Nested entries.
    Section(Vec<NavEntry>),
}

impl NavTarget {
    fn parse(s: &str) -> Self {
        if LINK_PREFIXES.iter().any(|p| s.starts_with(p)) {
            Self::Link(s.to_owned())
        } else {
            Self::Page(s.to_owned())
        }
    }
}

/// One entry of the navigation tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavEntry {
    /// Menu label. `None` for bare page entries.
    pub label: Option<String>,
    /// What the entry points at.
    pub target: NavTarget,
}

impl NavEntry {
    /// Labelled page entry.
    pub fn page(label: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            target: NavTarget::Page(path.into()),
        }
    }

    /// Labelled section entry.
    pub fn section(label: impl Into<String>, entries: Vec<NavEntry>) -> Self {
        Self {
            label: Some(label.into()),
            target: NavTarget::Section(entries),
        }
    }

    /// Display title: the label, or a title derived from the page path.
    pub fn title(&self) -> String {
        match (&self.label, &self.target) {
            (Some(label), _) => label.clone(),
            (None, NavTarget::Page(path) | NavTarget::Link(path)) => title_from_path(path),
            (None, NavTarget::Section(_)) => String::new(),
        }
    }

    fn from_value(value: &Value, location: &str) -> Result<Self, ManifestError> {
        match value {
            Value::String(s) => Ok(Self {
                label: None,
                target: NavTarget::parse(s),
            }),
            Value::Mapping(map) => {
                let mut iter = map.iter();
                let (Some((key, inner)), None) = (iter.next(), iter.next()) else {
                    return Err(ManifestError::shape(
                        location,
                        format!("nav entry must have exactly one key, found {}", map.len()),
                    ));
                };
                let Value::String(label) = key else {
                    return Err(ManifestError::shape(location, "nav label must be a string"));
                };
                let child_location = format!("{location} > {label}");
                let target = match inner {
                    Value::String(s) => NavTarget::parse(s),
                    Value::Sequence(items) => {
                        NavTarget::Section(entries_from_seq(items, &child_location)?)
                    }
                    _ => {
                        return Err(ManifestError::shape(
                            child_location,
                            "nav entry value must be a path or a list of entries",
                        ));
                    }
                };
                Ok(Self {
                    label: Some(label.clone()),
                    target,
                })
            }
            _ => Err(ManifestError::shape(
                location,
                "nav entry must be a path or a single-key mapping",
            )),
        }
    }

    fn to_value(&self) -> Value {
        let inner = match &self.target {
            NavTarget::Page(p) | NavTarget::Link(p) => Value::String(p.clone()),
            NavTarget::Section(entries) => entries_to_value(entries),
        };
        match &self.label {
            None => inner,
            Some(label) => {
                let mut map = Mapping::new();
                map.insert(Value::String(label.clone()), inner);
                Value::Mapping(map)
            }
        }
    }
}

/// Ordered navigation tree.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Nav {
    /// Top-level entries, in menu order.
    pub entries: Vec<NavEntry>,
}

/// A nav entry visited during traversal, with its position in the tree.
#[derive(Clone, Debug)]
pub struct NavNode<'a> {
    /// The entry itself.
    pub entry: &'a NavEntry,
    /// Nesting level; top-level entries are at depth 1.
    pub depth: usize,
    /// Human-readable position (e.g., "Modules > GPT-2").
    pub location: String,
}

/// A page referenced by the nav.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageRef<'a> {
    /// Document path as written in the manifest.
    pub path: &'a str,
    /// Labels of the enclosing sections and the entry itself.
    pub trail: Vec<&'a str>,
}

/// Navigation item with children for UI tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavItem {
    /// Display title.
    pub title: String,
    /// Link target path. `None` for sections.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Child navigation items.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavItem>,
}

impl Nav {
    /// Create a nav from entries.
    #[must_use]
    pub fn new(entries: Vec<NavEntry>) -> Self {
        Self { entries }
    }

    /// Parse the `nav` value of a manifest.
    pub(crate) fn from_value(value: &Value) -> Result<Self, ManifestError> {
        let Value::Sequence(items) = value else {
            return Err(ManifestError::shape("nav", "nav must be a list"));
        };
        Ok(Self {
            entries: entries_from_seq(items, "nav")?,
        })
    }

    pub(crate) fn to_value(&self) -> Value {
        entries_to_value(&self.entries)
    }

    /// All entries in pre-order, i.e. the order a reader sees them in the menu.
    pub fn walk(&self) -> Vec<NavNode<'_>> {
        fn visit<'a>(
            entries: &'a [NavEntry],
            depth: usize,
            parent: Option<&str>,
            out: &mut Vec<NavNode<'a>>,
        ) {
            for (idx, entry) in entries.iter().enumerate() {
                let segment = match &entry.label {
                    Some(label) => label.clone(),
                    None => format!("[{idx}]"),
                };
                let location = match parent {
                    Some(p) => format!("{p} > {segment}"),
                    None => segment,
                };
                out.push(NavNode {
                    entry,
                    depth,
                    location: location.clone(),
                });
                if let NavTarget::Section(children) = &entry.target {
                    visit(children, depth + 1, Some(location.as_str()), out);
                }
            }
        }

        let mut out = Vec::new();
        visit(&self.entries, 1, None, &mut out);
        out
    }

    /// Deepest nesting level (0 for an empty nav).
    pub fn depth(&self) -> usize {
        self.walk().iter().map(|n| n.depth).max().unwrap_or(0)
    }

    /// Every page reference in menu order. External links are skipped.
    pub fn pages(&self) -> Vec<PageRef<'_>> {
        fn visit<'a>(entries: &'a [NavEntry], trail: &[&'a str], out: &mut Vec<PageRef<'a>>) {
            for entry in entries {
                let mut trail = trail.to_vec();
                if let Some(label) = &entry.label {
                    trail.push(label);
                }
                match &entry.target {
                    NavTarget::Page(path) => out.push(PageRef {
                        path: path.as_str(),
                        trail,
                    }),
                    NavTarget::Link(_) => {}
                    NavTarget::Section(children) => visit(children, &trail, out),
                }
            }
        }

        let mut out = Vec::new();
        visit(&self.entries, &[], &mut out);
        out
    }

    /// Labels of the top-level entries, in order.
    pub fn top_level_labels(&self) -> Vec<String> {
        self.entries.iter().map(NavEntry::title).collect()
    }

    /// Build the serializable UI tree.
    pub fn items(&self) -> Vec<NavItem> {
        fn build(entries: &[NavEntry]) -> Vec<NavItem> {
            entries
                .iter()
                .map(|entry| match &entry.target {
                    NavTarget::Page(p) | NavTarget::Link(p) => NavItem {
                        title: entry.title(),
                        path: Some(p.clone()),
                        children: Vec::new(),
                    },
                    NavTarget::Section(children) => NavItem {
                        title: entry.title(),
                        path: None,
                        children: build(children),
                    },
                })
                .collect()
        }
        build(&self.entries)
    }
}

fn entries_from_seq(items: &[Value], location: &str) -> Result<Vec<NavEntry>, ManifestError> {
    items
        .iter()
        .enumerate()
        .map(|(idx, item)| NavEntry::from_value(item, &format!("{location}[{idx}]")))
        .collect()
}

fn entries_to_value(entries: &[NavEntry]) -> Value {
    Value::Sequence(entries.iter().map(NavEntry::to_value).collect())
}

/// Derive a title from a page path the way site generators do for
/// unlabelled entries: file stem, separators to spaces, first letter upper.
fn title_from_path(path: &str) -> String {
    let name = path.trim_end_matches('/').rsplit('/').next().unwrap_or(path);
    let stem = name.rsplit_once('.').map_or(name, |(stem, _)| stem);
    let words = stem.replace(['-', '_'], " ");
    let mut chars = words.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
