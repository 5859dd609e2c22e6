//! `docman pages` command implementation.

use clap::Args;
use docman_config::CliSettings;
use docman_manifest::Manifest;

use super::ManifestArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the pages command.
#[derive(Args)]
pub(crate) struct PagesArgs {
    #[command(flatten)]
    manifest: ManifestArgs,

    /// Prefix each path with its label trail.
    #[arg(short, long)]
    labels: bool,
}

impl PagesArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let (_, manifest) = self.manifest.load(CliSettings::default())?;

        for line in page_lines(&manifest, self.labels) {
            output.data(&line);
        }
        Ok(())
    }
}

/// One line per nav page, in menu order.
fn page_lines(manifest: &Manifest, labels: bool) -> Vec<String> {
    manifest
        .pages()
        .into_iter()
        .map(|page| {
            if labels {
                format!("{}\t{}", page.trail.join(" > "), page.path)
            } else {
                page.path.to_owned()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const MANIFEST: &str = r"
site_name: EasyDel
nav:
  - Home: index.md
  - Install: Install.md
  - Modules:
      - GPT2: modules/gpt2.md
      - Docs: https://example.com
  - AvailableModels: AvailableModels.md
";

    #[test]
    fn test_pages_in_menu_order() {
        let manifest = Manifest::from_yaml_str(MANIFEST).unwrap();
        assert_eq!(
            page_lines(&manifest, false),
            vec!["index.md", "Install.md", "modules/gpt2.md", "AvailableModels.md"]
        );
    }

    #[test]
    fn test_pages_with_labels() {
        let manifest = Manifest::from_yaml_str(MANIFEST).unwrap();
        assert_eq!(page_lines(&manifest, true)[2], "Modules > GPT2\tmodules/gpt2.md");
    }

    #[test]
    fn test_execute_loads_through_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("docman.toml");
        std::fs::write(&config, "[manifest]\npath = \"site.yml\"\n").unwrap();
        std::fs::write(dir.path().join("site.yml"), MANIFEST).unwrap();

        let args = PagesArgs {
            manifest: ManifestArgs {
                config: Some(config),
                manifest: None,
            },
            labels: false,
        };
        args.execute().unwrap();
    }
}
