//! `wsalias check` command

use std::path::Path;

use anyhow::Result;

use crate::cli::CheckArgs;
use wsalias::ops::{check_workspace, discover_workspace, format_report, DiscoverOptions};
use wsalias::util::shell::{Shell, Status};

pub fn execute(args: CheckArgs, root: &Path, shell: &Shell) -> Result<()> {
    let options = DiscoverOptions {
        root: root.to_path_buf(),
        overrides: args.discovery.to_config(),
    };

    let discovery = discover_workspace(&options)?;
    let report = check_workspace(&discovery);

    if !shell.is_quiet() {
        print!("{}", format_report(&report, shell.is_verbose()));
    }

    // Exit with error code if any package is broken
    if !report.all_passed() {
        shell.status(
            Status::Failed,
            format!("{} package(s) missing sources", report.failed_count()),
        );
        std::process::exit(1);
    }

    shell.status(Status::Checked, format!("{} package(s)", report.passed_count()));
    Ok(())
}
