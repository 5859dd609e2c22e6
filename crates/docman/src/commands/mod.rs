//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod fmt;
pub(crate) mod nav;
pub(crate) mod pages;

use std::path::PathBuf;

use clap::Args;
use docman_config::{CliSettings, Config};
use docman_manifest::Manifest;

use crate::error::CliError;

pub(crate) use check::CheckArgs;
pub(crate) use fmt::FmtArgs;
pub(crate) use nav::NavArgs;
pub(crate) use pages::PagesArgs;

/// Arguments shared by every command that reads a manifest.
#[derive(Args)]
pub(crate) struct ManifestArgs {
    /// Path to configuration file (default: auto-discover docman.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to the manifest (overrides config).
    #[arg(short, long, env = "DOCMAN_MANIFEST")]
    manifest: Option<PathBuf>,
}

impl ManifestArgs {
    /// Load config with `settings` applied, then the manifest it points at.
    pub(crate) fn load(&self, settings: CliSettings) -> Result<(Config, Manifest), CliError> {
        let settings = CliSettings {
            manifest_path: self.manifest.clone(),
            ..settings
        };
        let config = Config::load(self.config.as_deref(), Some(&settings))?;
        let manifest = Manifest::load(&config.manifest_resolved.path)?;
        Ok((config, manifest))
    }
}
