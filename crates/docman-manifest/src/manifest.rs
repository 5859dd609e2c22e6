//! Manifest loading and emission.
//!
//! The manifest is read once into a [`serde_yaml::Value`] and then lifted
//! into typed fields. Going through `Value` first means duplicate mapping
//! keys are rejected by the YAML layer, and that keys this crate does not
//! model survive a round trip untouched.

use std::path::Path;

use serde_yaml::{Mapping, Value};

use crate::error::ManifestError;
use crate::extensions::Extensions;
use crate::nav::{Nav, PageRef};
use crate::theme::Theme;

/// Docs directory used when the manifest does not set `docs_dir`.
pub const DEFAULT_DOCS_DIR: &str = "docs";

/// Site metadata keys, in the order they are emitted when no source order
/// is known.
const SITE_KEYS: &[&str] = &[
    "site_name",
    "site_description",
    "site_author",
    "site_url",
    "copyright",
    "repo_name",
    "repo_url",
    "edit_uri",
    "docs_dir",
];

/// Site metadata.
///
/// Optional keys hold plain string values only. An empty value or a tagged
/// one such as `site_url: !ENV [SITE_URL, ...]` leaves the field `None` and
/// is kept in [`Manifest::extra`] so it survives emission.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SiteMeta {
    /// Site title (required).
    pub site_name: String,
    /// Short description.
    pub site_description: Option<String>,
    /// Author name.
    pub site_author: Option<String>,
    /// Canonical site URL.
    pub site_url: Option<String>,
    /// Copyright line shown in the footer.
    pub copyright: Option<String>,
    /// Repository display name.
    pub repo_name: Option<String>,
    /// Source repository URL.
    pub repo_url: Option<String>,
    /// Edit link path relative to `repo_url`.
    pub edit_uri: Option<String>,
    /// Docs directory relative to the manifest.
    pub docs_dir: Option<String>,
}

impl SiteMeta {
    /// Site metadata with only a name.
    pub fn named(site_name: impl Into<String>) -> Self {
        Self {
            site_name: site_name.into(),
            ..Self::default()
        }
    }

    fn field(&self, key: &str) -> Option<&String> {
        match key {
            "site_name" => Some(&self.site_name),
            "site_description" => self.site_description.as_ref(),
            "site_author" => self.site_author.as_ref(),
            "site_url" => self.site_url.as_ref(),
            "copyright" => self.copyright.as_ref(),
            "repo_name" => self.repo_name.as_ref(),
            "repo_url" => self.repo_url.as_ref(),
            "edit_uri" => self.edit_uri.as_ref(),
            "docs_dir" => self.docs_dir.as_ref(),
            _ => None,
        }
    }

    fn field_mut(&mut self, key: &str) -> Option<&mut Option<String>> {
        match key {
            "site_description" => Some(&mut self.site_description),
            "site_author" => Some(&mut self.site_author),
            "site_url" => Some(&mut self.site_url),
            "copyright" => Some(&mut self.copyright),
            "repo_name" => Some(&mut self.repo_name),
            "repo_url" => Some(&mut self.repo_url),
            "edit_uri" => Some(&mut self.edit_uri),
            "docs_dir" => Some(&mut self.docs_dir),
            _ => None,
        }
    }
}

/// Documentation-site manifest.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Manifest {
    /// Site metadata.
    pub site: SiteMeta,
    /// Navigation tree, if the manifest declares one.
    pub nav: Option<Nav>,
    /// Theme selection.
    pub theme: Option<Theme>,
    /// Enabled plugins.
    pub plugins: Option<Extensions>,
    /// Enabled markdown extensions.
    pub markdown_extensions: Option<Extensions>,
    /// Top-level keys not modelled above, in written order.
    pub extra: Mapping,
    /// Top-level key order as written; empty for manifests built in code.
    key_order: Vec<String>,
}

impl Manifest {
    /// Manifest with site metadata and nothing else.
    #[must_use]
    pub fn new(site: SiteMeta) -> Self {
        Self {
            site,
            ..Self::default()
        }
    }

    /// Load a manifest from a file.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        if !path.exists() {
            return Err(ManifestError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        let manifest = Self::from_yaml_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            pages = manifest.pages().len(),
            "Loaded manifest"
        );
        Ok(manifest)
    }

    /// Parse a manifest from YAML text.
    pub fn from_yaml_str(content: &str) -> Result<Self, ManifestError> {
        let value: Value = serde_yaml::from_str(content)?;
        Self::from_value(&value)
    }

    /// Lift a parsed YAML document into a manifest.
    pub fn from_value(value: &Value) -> Result<Self, ManifestError> {
        let Value::Mapping(root) = value else {
            return Err(ManifestError::shape("<root>", "manifest must be a mapping"));
        };

        let mut manifest = Self::default();
        let mut site_name = None;

        for (key, val) in root {
            let Some(key) = key.as_str() else {
                return Err(ManifestError::shape(
                    "<root>",
                    format!("top-level keys must be strings, found {key:?}"),
                ));
            };
            manifest.key_order.push(key.to_owned());

            match key {
                "site_name" => site_name = Some(require_string(val, key)?),
                "nav" => manifest.nav = Some(Nav::from_value(val)?),
                "theme" => manifest.theme = Some(Theme::from_value(val)?),
                "plugins" => manifest.plugins = Some(Extensions::from_value(val, key)?),
                "markdown_extensions" => {
                    manifest.markdown_extensions = Some(Extensions::from_value(val, key)?);
                }
                _ if SITE_KEYS.contains(&key) => match val {
                    Value::String(text) => {
                        if let Some(slot) = manifest.site.field_mut(key) {
                            *slot = Some(text.clone());
                        }
                    }
                    // Empty and tagged (`!ENV`) values are kept verbatim.
                    Value::Null | Value::Tagged(_) => {
                        manifest
                            .extra
                            .insert(Value::String(key.to_owned()), val.clone());
                    }
                    _ => return Err(ManifestError::shape(key, "expected a string")),
                },
                _ => {
                    manifest
                        .extra
                        .insert(Value::String(key.to_owned()), val.clone());
                }
            }
        }

        manifest.site.site_name = site_name
            .ok_or_else(|| ManifestError::shape("site_name", "required key is missing"))?;

        if manifest.nav.is_none() {
            tracing::warn!("Manifest has no nav; pages will be ordered by the site generator");
        }

        Ok(manifest)
    }

    /// Emit the manifest as a YAML value.
    ///
    /// Top-level keys come out in the order they were read. Manifests built
    /// in code use site keys first, then `theme`, `nav`, `plugins`,
    /// `markdown_extensions`, then extra keys.
    pub fn to_value(&self) -> Value {
        let mut fields: Vec<(String, Value)> = Vec::new();
        for key in SITE_KEYS {
            if let Some(val) = self.site.field(key) {
                fields.push(((*key).to_owned(), Value::String(val.clone())));
            }
        }
        if let Some(theme) = &self.theme {
            fields.push(("theme".to_owned(), theme.to_value()));
        }
        if let Some(nav) = &self.nav {
            fields.push(("nav".to_owned(), nav.to_value()));
        }
        if let Some(plugins) = &self.plugins {
            fields.push(("plugins".to_owned(), plugins.to_value()));
        }
        if let Some(exts) = &self.markdown_extensions {
            fields.push(("markdown_extensions".to_owned(), exts.to_value()));
        }
        for (key, val) in &self.extra {
            if let Some(key) = key.as_str() {
                fields.push((key.to_owned(), val.clone()));
            }
        }

        let mut out = Mapping::new();
        for key in &self.key_order {
            if let Some(pos) = fields.iter().position(|(k, _)| k == key) {
                let (k, v) = fields.remove(pos);
                out.insert(Value::String(k), v);
            }
        }
        for (k, v) in fields {
            out.insert(Value::String(k), v);
        }
        Value::Mapping(out)
    }

    /// Emit the manifest as YAML text.
    pub fn to_yaml_string(&self) -> Result<String, ManifestError> {
        Ok(serde_yaml::to_string(&self.to_value())?)
    }

    /// Docs directory as written, or the default.
    pub fn docs_dir(&self) -> &str {
        self.site.docs_dir.as_deref().unwrap_or(DEFAULT_DOCS_DIR)
    }

    /// Every page referenced by the nav, in menu order.
    pub fn pages(&self) -> Vec<PageRef<'_>> {
        self.nav.as_ref().map(Nav::pages).unwrap_or_default()
    }

    /// Labels of the top-level nav entries, in order.
    pub fn top_level_labels(&self) -> Vec<String> {
        self.nav
            .as_ref()
            .map(Nav::top_level_labels)
            .unwrap_or_default()
    }

    /// Docstring style configured for the API-reference plugin, if any.
    pub fn docstring_style(&self) -> Option<&str> {
        self.plugins
            .as_ref()?
            .items
            .iter()
            .find_map(|p| p.find_key("docstring_style").and_then(Value::as_str))
    }
}

fn require_string(value: &Value, key: &str) -> Result<String, ManifestError> {
    value
        .as_str()
        .map(str::to_owned)
        .ok_or_else(|| ManifestError::shape(key, "expected a string"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extensions::Extension;
    use crate::nav::NavEntry;
    use pretty_assertions::assert_eq;

    const MINIMAL: &str = r"
site_name: EasyDel
repo_url: https://github.com/erfanzar/EasyDeL
nav:
  - Home: index.md
theme:
  name: readthedocs
  highlightjs: true
plugins:
  - search
";

    #[test]
    fn test_parse_site_meta() {
        let manifest = Manifest::from_yaml_str(MINIMAL).unwrap();
        assert_eq!(manifest.site.site_name, "EasyDel");
        assert_eq!(
            manifest.site.repo_url.as_deref(),
            Some("https://github.com/erfanzar/EasyDeL")
        );
        assert_eq!(manifest.docs_dir(), "docs");
        assert_eq!(manifest.theme.as_ref().unwrap().highlightjs(), Some(true));
    }

    #[test]
    fn test_missing_site_name() {
        let err = Manifest::from_yaml_str("nav: []").unwrap_err();
        assert!(
            matches!(err, ManifestError::Shape { ref location, .. } if location == "site_name"),
            "{err:?}"
        );
    }

    #[test]
    fn test_non_string_site_key() {
        let err = Manifest::from_yaml_str("site_name: x\ncopyright: [a]").unwrap_err();
        assert!(err.to_string().contains("copyright"), "{err}");
    }

    #[test]
    fn test_empty_optional_site_key() {
        let yaml = "site_name: x\ncopyright:\n";
        let manifest = Manifest::from_yaml_str(yaml).unwrap();
        assert_eq!(manifest.site.copyright, None);

        let value: Value = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(manifest.to_value(), value);
    }

    #[test]
    fn test_env_tagged_site_key() {
        let yaml = "site_name: x\nsite_url: !ENV [SITE_URL, 'http://x']\nrepo_url: https://r\n";
        let manifest = Manifest::from_yaml_str(yaml).unwrap();
        assert_eq!(manifest.site.site_url, None);
        assert_eq!(manifest.site.repo_url.as_deref(), Some("https://r"));
        assert!(matches!(manifest.extra.get("site_url"), Some(Value::Tagged(_))));

        let value: Value = serde_yaml::from_str(yaml).unwrap();
        let emitted = manifest.to_value();
        assert_eq!(emitted, value);
        let keys: Vec<_> = emitted
            .as_mapping()
            .unwrap()
            .keys()
            .filter_map(Value::as_str)
            .collect();
        assert_eq!(keys, vec!["site_name", "site_url", "repo_url"]);
        assert_eq!(
            Manifest::from_yaml_str(&manifest.to_yaml_string().unwrap()).unwrap(),
            manifest
        );
    }

    #[test]
    fn test_duplicate_top_level_key_rejected() {
        let yaml = "site_name: x\ntheme: readthedocs\ntheme: material\n";
        let err = Manifest::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, ManifestError::Yaml(_)), "{err:?}");
        assert!(err.to_string().contains("duplicate"), "{err}");
    }

    #[test]
    fn test_root_must_be_mapping() {
        assert!(Manifest::from_yaml_str("- a\n- b\n").is_err());
    }

    #[test]
    fn test_extra_keys_preserved_in_order() {
        let yaml = r"
site_name: x
extra_css:
  - css/extra.css
extra:
  version: 0.0.40
";
        let manifest = Manifest::from_yaml_str(yaml).unwrap();
        let keys: Vec<_> = manifest.extra.keys().filter_map(Value::as_str).collect();
        assert_eq!(keys, vec!["extra_css", "extra"]);
    }

    #[test]
    fn test_roundtrip_value_and_model() {
        let value: Value = serde_yaml::from_str(MINIMAL).unwrap();
        let manifest = Manifest::from_value(&value).unwrap();

        let emitted = manifest.to_value();
        assert_eq!(emitted, value);

        let text = manifest.to_yaml_string().unwrap();
        assert_eq!(Manifest::from_yaml_str(&text).unwrap(), manifest);
    }

    #[test]
    fn test_emit_built_manifest_canonical_order() {
        let mut manifest = Manifest::new(SiteMeta {
            copyright: Some("Erfan Zare Chavoshi".to_owned()),
            ..SiteMeta::named("EasyDel")
        });
        manifest.plugins = Some(Extensions::new(vec![Extension::bare("search")]));
        manifest.nav = Some(Nav::new(vec![NavEntry::page("Home", "index.md")]));
        manifest.theme = Some(Theme::named("readthedocs"));

        let value = manifest.to_value();
        let keys: Vec<_> = value
            .as_mapping()
            .unwrap()
            .keys()
            .filter_map(Value::as_str)
            .collect();
        assert_eq!(keys, vec!["site_name", "copyright", "theme", "nav", "plugins"]);
    }

    #[test]
    fn test_docstring_style() {
        let yaml = r"
site_name: x
plugins:
  - search
  - mkdocstrings:
      handlers:
        python:
          options:
            docstring_style: sphinx
";
        let manifest = Manifest::from_yaml_str(yaml).unwrap();
        assert_eq!(manifest.docstring_style(), Some("sphinx"));
        assert_eq!(Manifest::from_yaml_str(MINIMAL).unwrap().docstring_style(), None);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Manifest::load(Path::new("/nonexistent/mkdocs.yml")).unwrap_err();
        assert!(matches!(err, ManifestError::NotFound(_)));
    }
}
