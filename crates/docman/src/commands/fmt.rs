//! `docman fmt` command implementation.

use std::path::Path;

use clap::Args;
use docman_config::CliSettings;
use docman_manifest::{Manifest, find_yaml_tag};

use super::ManifestArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the fmt command.
///
/// Output is regenerated from the parsed manifest: comments are not kept.
#[derive(Args)]
pub(crate) struct FmtArgs {
    #[command(flatten)]
    manifest: ManifestArgs,

    /// Overwrite the manifest instead of printing to stdout. Comments are
    /// not kept; manifests containing YAML tags (`!ENV`, `!!python/name:`)
    /// are refused.
    #[arg(short, long)]
    write: bool,
}

impl FmtArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let (config, manifest) = self.manifest.load(CliSettings::default())?;
        let path = &config.manifest_resolved.path;
        let source = std::fs::read_to_string(path)?;

        if self.write {
            let text = rewrite(path, &source, &manifest)?;
            std::fs::write(path, text)?;
            output.info(&format!("Rewrote {} (comments are not kept)", path.display()));
        } else {
            if let Some(tag) = find_yaml_tag(&source) {
                output.warning(&format!(
                    "{}:{}: YAML tag `{}` is not reproduced faithfully",
                    path.display(),
                    tag.line,
                    tag.tag
                ));
            }
            output.data(manifest.to_yaml_string()?.trim_end());
        }
        Ok(())
    }
}

/// Text that replaces the manifest at `path`, refused when emission would
/// lose a YAML tag from `source`.
fn rewrite(path: &Path, source: &str, manifest: &Manifest) -> Result<String, CliError> {
    if let Some(tag) = find_yaml_tag(source) {
        return Err(CliError::Validation(format!(
            "{}:{}: YAML tag `{}` would be lost; refusing to rewrite",
            path.display(),
            tag.line,
            tag.tag
        )));
    }
    Ok(manifest.to_yaml_string()?)
}
