//! wsalias CLI - workspace package discovery for bundler aliasing

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use wsalias::util::Shell;
use wsalias::DiscoveryError;

mod cli;
mod commands;

use cli::{Cli, Commands, OutputFormat};

fn main() {
    let cli = Cli::parse();

    let json = matches!(
        &cli.command,
        Commands::Discover(args) if args.format == OutputFormat::Json
    );
    let shell = Shell::from_flags(cli.quiet, cli.verbose, cli.color, json);

    init_logging(&cli);

    if let Err(e) = run(cli, &shell) {
        match e.downcast_ref::<DiscoveryError>() {
            Some(err) => shell.diagnostic(&err.to_diagnostic()),
            _ => shell.error(format!("{:#}", e)),
        }
        std::process::exit(1);
    }
}

fn init_logging(cli: &Cli) {
    let default = if cli.verbose {
        "wsalias=debug"
    } else if cli.quiet {
        "wsalias=error"
    } else {
        "wsalias=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // stdout carries command output (alias JSON, names)
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn run(cli: Cli, shell: &Shell) -> Result<()> {
    let root = match cli.root {
        Some(root) => root,
        None => std::env::current_dir().context("failed to get current directory")?,
    };

    match cli.command {
        Commands::Discover(args) => commands::discover::execute(args, &root, shell),
        Commands::Check(args) => commands::check::execute(args, &root, shell),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
