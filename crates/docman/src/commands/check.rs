//! `docman check` command implementation.

use std::path::PathBuf;

use clap::Args;
use docman_config::{CliSettings, Config};
use docman_manifest::{
    DocsCheckOptions, Manifest, Report, ValidationOptions, check_docs, validate,
};

use super::ManifestArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    manifest: ManifestArgs,

    /// Docs directory (overrides config and the manifest's docs_dir).
    #[arg(short, long)]
    docs_dir: Option<PathBuf>,

    /// Maximum nav nesting (overrides config).
    #[arg(long)]
    max_depth: Option<usize>,

    /// Report documents that no nav entry references.
    #[arg(long)]
    orphans: bool,

    /// Only run structural checks; do not look at the docs directory.
    #[arg(long)]
    no_docs: bool,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if loading fails or any error diagnostic is reported.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let settings = CliSettings {
            docs_dir: self.docs_dir,
            orphans: self.orphans.then_some(true),
            max_depth: self.max_depth,
            ..CliSettings::default()
        };
        let (config, manifest) = self.manifest.load(settings)?;

        output.highlight(&format!(
            "Checking {} ({})",
            manifest.site.site_name,
            config.manifest_resolved.path.display()
        ));

        let report = run_checks(&config, &manifest, !self.no_docs)?;

        for diagnostic in report.sorted() {
            output.diagnostic(diagnostic);
        }

        let errors = report.errors().count();
        let warnings = report.warnings().count();
        if errors > 0 {
            return Err(CliError::Validation(format!(
                "{errors} error(s), {warnings} warning(s)"
            )));
        }

        output.success(&format!(
            "{} pages OK, {warnings} warning(s)",
            manifest.pages().len()
        ));
        Ok(())
    }
}

/// Structural checks, then the docs-directory cross-check when enabled.
fn run_checks(config: &Config, manifest: &Manifest, with_docs: bool) -> Result<Report, CliError> {
    let mut report = validate(
        manifest,
        &ValidationOptions {
            extensions: config.checks.extensions.clone(),
            max_depth: config.checks.max_depth,
        },
    );

    if with_docs {
        let docs_dir = config.docs_resolved.dir.clone().unwrap_or_else(|| {
            config
                .manifest_resolved
                .base_dir()
                .join(manifest.docs_dir())
        });
        tracing::info!(docs_dir = %docs_dir.display(), "Cross-checking docs directory");
        report.extend(check_docs(
            manifest,
            &docs_dir,
            &DocsCheckOptions {
                extensions: config.checks.extensions.clone(),
                orphans: config.checks.orphans,
                exclude: config.checks.exclude.clone(),
            },
        )?);
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn project(manifest: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("mkdocs.yml"), manifest).unwrap();
        fs::create_dir_all(dir.path().join("docs")).unwrap();
        fs::write(dir.path().join("docs/index.md"), "# Home\n").unwrap();
        dir
    }

    fn load(dir: &std::path::Path) -> (Config, Manifest) {
        let settings = CliSettings {
            manifest_path: Some(dir.join("mkdocs.yml")),
            ..CliSettings::default()
        };
        let config_path = dir.join("docman.toml");
        fs::write(&config_path, "").unwrap();
        let config = Config::load(Some(&config_path), Some(&settings)).unwrap();
        let manifest = Manifest::load(&config.manifest_resolved.path).unwrap();
        (config, manifest)
    }

    #[test]
    fn test_docs_dir_defaults_to_manifest_relative() {
        let dir = project("site_name: x\ntheme: readthedocs\nnav:\n  - Home: index.md\n");
        let (config, manifest) = load(dir.path());

        let report = run_checks(&config, &manifest, true).unwrap();
        assert!(report.is_empty(), "{report:?}");
    }

    #[test]
    fn test_missing_page_is_error() {
        let dir = project(
            "site_name: x\ntheme: readthedocs\nnav:\n  - Home: index.md\n  - Eval: Eval.md\n",
        );
        let (config, manifest) = load(dir.path());

        let report = run_checks(&config, &manifest, true).unwrap();
        assert_eq!(report.codes(), vec!["docs-missing-page"]);

        let structural = run_checks(&config, &manifest, false).unwrap();
        assert!(structural.is_empty());
    }

    #[test]
    fn test_custom_docs_dir_from_manifest() {
        let dir = project(
            "site_name: x\ntheme: readthedocs\ndocs_dir: content\nnav:\n  - Home: index.md\n",
        );
        let (config, manifest) = load(dir.path());

        let err = run_checks(&config, &manifest, true).unwrap_err();
        assert!(err.to_string().contains("content"), "{err}");
    }

    fn args(dir: &std::path::Path, manifest: std::path::PathBuf, orphans: bool) -> CheckArgs {
        let config = dir.join("docman.toml");
        fs::write(&config, "").unwrap();
        CheckArgs {
            manifest: ManifestArgs {
                config: Some(config),
                manifest: Some(manifest),
            },
            docs_dir: None,
            max_depth: None,
            orphans,
            no_docs: false,
        }
    }

    #[test]
    fn test_execute_fails_on_error_diagnostics() {
        let dir = project("site_name: x\ntheme: readthedocs\nnav:\n  - Eval: Eval.md\n");
        let err = args(dir.path(), dir.path().join("mkdocs.yml"), false)
            .execute()
            .unwrap_err();
        assert!(
            matches!(&err, CliError::Validation(msg) if msg.starts_with("1 error(s)")),
            "{err}"
        );
    }

    #[test]
    fn test_execute_passes_with_warnings_only() {
        let dir = project("site_name: x\ntheme: readthedocs\nnav:\n  - Home: index.md\n");
        fs::write(dir.path().join("docs/orphan.md"), "# Orphan\n").unwrap();

        args(dir.path(), dir.path().join("mkdocs.yml"), true)
            .execute()
            .unwrap();
    }

    #[test]
    fn test_cur_dir_relative_manifest_finds_orphans() {
        // Relative to the package root, which is the test working directory.
        let dir = tempfile::Builder::new()
            .prefix("check-cmd")
            .tempdir_in(".")
            .unwrap();
        let root = std::path::Path::new(".").join(dir.path().file_name().unwrap());
        fs::write(
            root.join("mkdocs.yml"),
            "site_name: x\ntheme: readthedocs\nnav:\n  - Home: index.md\n",
        )
        .unwrap();
        fs::create_dir_all(root.join("docs")).unwrap();
        fs::write(root.join("docs/index.md"), "# Home\n").unwrap();
        fs::write(root.join("docs/orphan.md"), "# Orphan\n").unwrap();

        let (config, manifest) = args(&root, root.join("mkdocs.yml"), true)
            .manifest
            .load(CliSettings {
                orphans: Some(true),
                ..CliSettings::default()
            })
            .unwrap();
        assert!(config.manifest_resolved.path.starts_with("."));

        let report = run_checks(&config, &manifest, true).unwrap();
        assert_eq!(report.codes(), vec!["docs-orphan-page"]);
        assert!(report.diagnostics()[0].message.contains("orphan.md"));
    }
}
