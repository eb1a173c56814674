//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell as CompletionShell;

use wsalias::core::DuplicatePolicy;
use wsalias::util::shell::ColorChoice;
use wsalias::util::Config;

/// wsalias - map workspace packages to their source for bundler aliasing
#[derive(Parser)]
#[command(name = "wsalias")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Coloring: auto, always, never
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Workspace root (defaults to the current directory)
    #[arg(long, global = true, env = "WSALIAS_ROOT")]
    pub root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Discover workspace packages and print their aliases
    Discover(DiscoverArgs),

    /// Verify that every discovered package has a source directory
    Check(CheckArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Discovery settings shared by `discover` and `check`.
#[derive(Args, Debug, Default)]
pub struct DiscoveryArgs {
    /// Directory holding the packages, relative to the root [default: packages]
    #[arg(long)]
    pub packages_dir: Option<PathBuf>,

    /// Manifest file name inside each package [default: package.json]
    #[arg(long)]
    pub manifest: Option<String>,

    /// Source directory the alias points at [default: src]
    #[arg(long)]
    pub source_dir: Option<String>,

    /// Fail when two packages declare the same name
    #[arg(long)]
    pub strict_duplicates: bool,
}

impl DiscoveryArgs {
    /// Turn the flags into config overrides; unset flags leave the file alone.
    pub fn to_config(&self) -> Config {
        let mut config = Config::default();
        let d = &mut config.discovery;
        d.packages_dir = self.packages_dir.clone();
        d.manifest = self.manifest.clone();
        d.source_dir = self.source_dir.clone();
        if self.strict_duplicates {
            d.duplicates = Some(DuplicatePolicy::Error);
        }
        config
    }
}

/// Output format for `discover`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Status lines for people
    #[default]
    Human,
    /// Bundler alias configuration as JSON
    Json,
    /// Package names, one per line
    Names,
}

#[derive(Args)]
pub struct DiscoverArgs {
    #[command(flatten)]
    pub discovery: DiscoveryArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

#[derive(Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub discovery: DiscoveryArgs,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: CompletionShell,
}
