//! Documentation-site manifest model, loader and validator.
//!
//! This crate provides:
//! - [`Manifest`]: typed, order-preserving model of an `mkdocs.yml`-style
//!   manifest with order-preserving YAML emission
//! - [`Nav`]: the navigation tree with traversal helpers
//! - [`validate`]: structural checks producing a [`Report`]
//! - [`check_docs`]: cross-check of nav targets against a docs directory
//! - [`find_yaml_tag`]: detect source tags that emission cannot preserve
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::Path;
//! use docman_manifest::{Manifest, ValidationOptions, validate};
//!
//! let manifest = Manifest::load(Path::new("mkdocs.yml"))?;
//! let report = validate(&manifest, &ValidationOptions::default());
//! for diagnostic in report.diagnostics() {
//!     eprintln!("{diagnostic}");
//! }
//! # Ok(())
//! # }
//! ```

mod docs;
mod error;
mod extensions;
mod manifest;
mod nav;
mod source;
mod theme;
mod validate;

pub use docs::{DocsCheckOptions, check_docs};
pub use error::ManifestError;
pub use extensions::{Extension, Extensions, ListStyle};
pub use manifest::{DEFAULT_DOCS_DIR, Manifest, SiteMeta};
pub use nav::{Nav, NavEntry, NavItem, NavNode, NavTarget, PageRef};
pub use source::{YamlTag, find_yaml_tag};
pub use theme::Theme;
pub use validate::{Diagnostic, Report, Severity, ValidationOptions, validate};
