//! Configuration management for docman.
//!
//! Parses `docman.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `manifest.path`
//! - `docs.dir`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override manifest path.
    pub manifest_path: Option<PathBuf>,
    /// Override docs directory.
    pub docs_dir: Option<PathBuf>,
    /// Override orphan page reporting.
    pub orphans: Option<bool>,
    /// Override maximum nav depth.
    pub max_depth: Option<usize>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "docman.toml";

/// Manifest filename used when no config names one.
const DEFAULT_MANIFEST: &str = "mkdocs.yml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Manifest location (path is a relative string from TOML).
    manifest: ManifestConfigRaw,
    /// Docs directory override (path is a relative string from TOML).
    docs: DocsConfigRaw,
    /// Structural check settings.
    pub checks: ChecksConfig,

    /// Resolved manifest configuration (set after loading).
    #[serde(skip)]
    pub manifest_resolved: ManifestConfig,
    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ManifestConfigRaw {
    path: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    dir: Option<String>,
}

/// Resolved manifest configuration with an absolute path.
#[derive(Debug, Default)]
pub struct ManifestConfig {
    /// Path to the manifest file.
    pub path: PathBuf,
}

impl ManifestConfig {
    /// Directory containing the manifest; the manifest's `docs_dir` is
    /// relative to it.
    #[must_use]
    pub fn base_dir(&self) -> &Path {
        self.path.parent().unwrap_or(Path::new("."))
    }
}

/// Resolved docs directory configuration.
#[derive(Debug, Default)]
pub struct DocsConfig {
    /// Explicit docs directory. `None` means "use the manifest's `docs_dir`".
    pub dir: Option<PathBuf>,
}

/// Structural check settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ChecksConfig {
    /// Recognized document extensions, without the leading dot.
    pub extensions: Vec<String>,
    /// Maximum section nesting in the nav tree.
    pub max_depth: usize,
    /// Report documents that no nav entry references.
    pub orphans: bool,
    /// Glob patterns (relative to the docs dir) excluded from orphan checks.
    pub exclude: Vec<String>,
}

impl Default for ChecksConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["md".to_owned(), "markdown".to_owned()],
            max_depth: 3,
            orphans: false,
            exclude: Vec::new(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`docs.dir`").
        field: String,
        /// Error message (e.g., "${`DOCS_ROOT`} not set").
        message: String,
    },
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `docman.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(path) = &settings.manifest_path {
            self.manifest_resolved.path.clone_from(path);
        }
        if let Some(dir) = &settings.docs_dir {
            self.docs_resolved.dir = Some(dir.clone());
        }
        if let Some(orphans) = settings.orphans {
            self.checks.orphans = orphans;
        }
        if let Some(max_depth) = settings.max_depth {
            self.checks.max_depth = max_depth;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            manifest: ManifestConfigRaw::default(),
            docs: DocsConfigRaw::default(),
            checks: ChecksConfig::default(),
            manifest_resolved: ManifestConfig {
                path: base.join(DEFAULT_MANIFEST),
            },
            docs_resolved: DocsConfig::default(),
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.checks.max_depth == 0 {
            return Err(ConfigError::Validation(
                "checks.max_depth must be greater than 0".to_owned(),
            ));
        }
        if self.checks.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "checks.extensions cannot be empty".to_owned(),
            ));
        }
        for ext in &self.checks.extensions {
            if ext.is_empty() || ext.starts_with('.') {
                return Err(ConfigError::Validation(format!(
                    "checks.extensions entry {ext:?} must be a bare extension like \"md\""
                )));
            }
        }
        if self.manifest_resolved.path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "manifest.path cannot be empty".to_owned(),
            ));
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref path) = self.manifest.path {
            self.manifest.path = Some(expand::expand_env(path, "manifest.path")?);
        }
        if let Some(ref dir) = self.docs.dir {
            self.docs.dir = Some(expand::expand_env(dir, "docs.dir")?);
        }
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.manifest_resolved = ManifestConfig {
            path: config_dir.join(self.manifest.path.as_deref().unwrap_or(DEFAULT_MANIFEST)),
        };
        self.docs_resolved = DocsConfig {
            dir: self.docs.dir.as_deref().map(|d| config_dir.join(d)),
        };
    }
}
