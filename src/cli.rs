use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Shared application context for global flags
#[derive(Clone, Debug, Default)]
pub struct AppContext {
    pub quiet: bool,    // global --quiet
    pub no_color: bool, // global --no-color
    pub dry_run: bool,  // global --dry-run
    pub verbose: bool,  // global --verbose
}

#[derive(Parser)]
#[command(name = "formatdoc")]
#[command(
    about = "Bootstrap file headers, folder indexes and an architecture summary for under-documented repositories"
)]
#[command(version, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Preview changes without writing files
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Print per-file actions and debug logs
    #[arg(long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create or refresh headers, INDEX.md files and ARCHITECTURE.md
    Bootstrap(BootstrapArgs),

    /// Initialize a formatdoc.toml config file
    Init(InitArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Documentation language selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Detect from existing architecture/index documents
    #[default]
    Auto,
    /// Simplified Chinese
    Zh,
    /// English
    En,
}

#[derive(Debug, Parser)]
pub struct BootstrapArgs {
    /// Repository root path
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Doc language mode [default: auto]
    #[arg(long, value_enum)]
    pub language: Option<Language>,

    /// Folder index file name [default: INDEX.md]
    #[arg(long)]
    pub index_file: Option<String>,

    /// Architecture file name [default: ARCHITECTURE.md]
    #[arg(long)]
    pub architecture_file: Option<String>,

    /// Lines to scan from file start for existing header tags [default: 80]
    #[arg(long)]
    pub max_header_lines: Option<usize>,

    /// Tokens shown per @input/@output line before eliding [default: 5]
    #[arg(long)]
    pub max_items: Option<usize>,

    /// Additional source extension like .rb or .php (repeatable)
    #[arg(long = "ext", value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Additional directory name to ignore (repeatable)
    #[arg(long = "ignore-dir", value_name = "NAME")]
    pub ignore_dirs: Vec<String>,

    /// Do not overwrite existing index files
    #[arg(long)]
    pub preserve_existing_index: bool,

    /// Do not overwrite an existing architecture file
    #[arg(long)]
    pub preserve_existing_architecture: bool,

    /// Skip file header bootstrap
    #[arg(long)]
    pub skip_headers: bool,

    /// Skip index file bootstrap
    #[arg(long)]
    pub skip_index: bool,

    /// Skip architecture file bootstrap
    #[arg(long)]
    pub skip_architecture: bool,

    /// Honor .gitignore/.ignore rules while walking
    #[arg(long)]
    pub respect_gitignore: bool,

    /// Emit the run summary as JSON (single line)
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser)]
pub struct InitArgs {
    /// Directory to initialize config in
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite existing config file
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[derive(Parser)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,

    /// Output directory; if omitted and --stdout not set, prints error
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Print completion script to stdout instead of a file
    #[arg(long)]
    pub stdout: bool,
}
