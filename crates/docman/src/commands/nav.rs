//! `docman nav` command implementation.

use clap::Args;
use docman_config::CliSettings;
use docman_manifest::{Manifest, Nav};

use super::ManifestArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the nav command.
#[derive(Args)]
pub(crate) struct NavArgs {
    #[command(flatten)]
    manifest: ManifestArgs,

    /// Print the tree as JSON.
    #[arg(long)]
    json: bool,
}

impl NavArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let (_, manifest) = self.manifest.load(CliSettings::default())?;

        if self.json {
            output.data(&nav_json(&manifest)?);
            return Ok(());
        }

        let items = manifest.nav.as_ref().map(Nav::items).unwrap_or_default();
        if items.is_empty() {
            output.warning("Manifest has no nav");
        } else {
            output.nav_tree(&items, 0);
        }
        Ok(())
    }
}

/// Pretty-printed JSON navigation tree; `[]` when the manifest has no nav.
fn nav_json(manifest: &Manifest) -> Result<String, CliError> {
    let items = manifest.nav.as_ref().map(Nav::items).unwrap_or_default();
    Ok(serde_json::to_string_pretty(&items)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_nav_json_shape() {
        let manifest = Manifest::from_yaml_str(
            r"
site_name: EasyDel
nav:
  - Home: index.md
  - Serve:
      - TorchServe: serve/torch.md
  - getting_started.md
",
        )
        .unwrap();

        let json: serde_json::Value = serde_json::from_str(&nav_json(&manifest).unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {"title": "Home", "path": "index.md"},
                {"title": "Serve", "children": [
                    {"title": "TorchServe", "path": "serve/torch.md"}
                ]},
                {"title": "Getting started", "path": "getting_started.md"}
            ])
        );
    }

    #[test]
    fn test_nav_json_without_nav() {
        let manifest = Manifest::from_yaml_str("site_name: x\n").unwrap();
        assert_eq!(nav_json(&manifest).unwrap(), "[]");
    }
}
