//! `wsalias discover` command

use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::{DiscoverArgs, OutputFormat};
use wsalias::ops::{discover_workspace, DiscoverOptions};
use wsalias::util::diagnostic::{suggestions, Diagnostic};
use wsalias::util::fs::display_path;
use wsalias::util::shell::{Shell, Status};
use wsalias::{AliasConfig, Discovery};

pub fn execute(args: DiscoverArgs, root: &Path, shell: &Shell) -> Result<()> {
    let options = DiscoverOptions {
        root: root.to_path_buf(),
        overrides: args.discovery.to_config(),
    };

    shell.verbose(Status::Scanning, root.display());
    let discovery = discover_workspace(&options)?;

    match args.format {
        OutputFormat::Human => print_human(&discovery, root, shell),
        OutputFormat::Json => {
            let config = AliasConfig::from_discovery(&discovery);
            let json = config
                .to_json()
                .context("failed to serialize alias configuration")?;
            println!("{}", json);
        }
        OutputFormat::Names => {
            for name in discovery.package_names() {
                println!("{}", name);
            }
        }
    }

    Ok(())
}

fn print_human(discovery: &Discovery, root: &Path, shell: &Shell) {
    for (name, path) in discovery.aliases() {
        shell.status(
            Status::Found,
            format!("{} -> {}", name, display_path(root, path)),
        );
    }

    for skipped in discovery.skipped() {
        shell.verbose(
            Status::Skipped,
            format!("{} ({})", display_path(root, &skipped.dir), skipped.reason),
        );
    }

    if discovery.is_empty() {
        let mut diag = Diagnostic::warning(format!(
            "no packages found in {}",
            display_path(root, discovery.root())
        ));
        if !discovery.skipped().is_empty() {
            diag = diag.with_context(format!(
                "{} director(ies) had no manifest or no package name",
                discovery.skipped().len()
            ));
        }
        shell.diagnostic(&diag.with_suggestion(suggestions::NO_PACKAGES));
    } else {
        shell.status(
            Status::Finished,
            format!("{} package(s) discovered", discovery.len()),
        );
    }
}
