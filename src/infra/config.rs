use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::cli::{AppContext, InitArgs, Language};

/// Source extensions scanned out of the box (lower-case, dot-prefixed)
pub const DEFAULT_EXTENSIONS: &[&str] =
    &[".js", ".jsx", ".mjs", ".cjs", ".ts", ".tsx", ".py", ".go", ".java"];

/// Directory names never descended into
pub const DEFAULT_IGNORED_DIRS: &[&str] = &[
    ".git",
    ".idea",
    ".vscode",
    "node_modules",
    "dist",
    "build",
    "target",
    "coverage",
    "vendor",
    ".next",
    "out",
    "__pycache__",
    ".mvn",
    ".gradle",
];

pub const DEFAULT_INDEX_FILE: &str = "INDEX.md";
pub const DEFAULT_ARCHITECTURE_FILE: &str = "ARCHITECTURE.md";
pub const DEFAULT_MAX_HEADER_LINES: usize = 80;
pub const DEFAULT_MAX_ITEMS: usize = 5;

/// Config file names looked up in the scan root, first hit wins
const CONFIG_FILES: &[&str] = &["formatdoc.toml", ".formatdoc.toml"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config
{
    /// Additional source extensions (merged with the built-in list)
    pub extensions: Vec<String>,

    /// Additional directory names to ignore (merged with the built-in list)
    pub ignore_dirs: Vec<String>,

    /// Per-folder index file name
    pub index_file: String,

    /// Root architecture file name
    pub architecture_file: String,

    /// Lines scanned from file start when looking for an existing header
    pub max_header_lines: usize,

    /// Tokens shown per @input/@output line before eliding
    pub max_items: usize,

    /// Documentation language
    pub language: Language,

    /// Honor .gitignore/.ignore rules while walking
    pub respect_gitignore: bool,
}

impl Default for Config
{
    fn default() -> Self
    {
        Self {
            extensions: Vec::new(),
            ignore_dirs: Vec::new(),
            index_file: DEFAULT_INDEX_FILE.to_string(),
            architecture_file: DEFAULT_ARCHITECTURE_FILE.to_string(),
            max_header_lines: DEFAULT_MAX_HEADER_LINES,
            max_items: DEFAULT_MAX_ITEMS,
            language: Language::Auto,
            respect_gitignore: false,
        }
    }
}

/// Load layered configuration for a scan root: config file, then
/// `FORMATDOC_*` environment variables. Missing sources fall back to defaults.
pub fn load_config(root: &Path) -> Result<Config>
{
    let mut builder = config::Config::builder();

    for name in CONFIG_FILES
    {
        let path = root.join(name);
        if path.is_file()
        {
            builder = builder.add_source(config::File::from(path.as_path()));
            break;
        }
    }

    // Lists are comma-separated, e.g. FORMATDOC_EXTENSIONS=".rb,.php"
    builder = builder.add_source(
        config::Environment::with_prefix("FORMATDOC")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("extensions")
            .with_list_parse_key("ignore_dirs"),
    );

    let cfg = builder
        .build()
        .context("Failed to load configuration")?;
    let parsed: Config = cfg
        .try_deserialize()
        .context("Failed to parse configuration")?;

    Ok(parsed)
}

/// Merge the built-in extension list with user additions.
/// Entries are trimmed, lower-cased and dot-prefixed; blanks are dropped.
pub fn normalize_extensions<'a, I>(extra: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut out: BTreeSet<String> = DEFAULT_EXTENSIONS
        .iter()
        .map(|e| e.to_string())
        .collect();

    for ext in extra
    {
        let item = ext
            .trim()
            .to_lowercase();
        if item.is_empty()
        {
            continue;
        }
        if item.starts_with('.')
        {
            out.insert(item);
        }
        else
        {
            out.insert(format!(".{item}"));
        }
    }

    out
}

/// Merge the built-in ignored directory names with user additions.
pub fn normalize_ignored_dirs<'a, I>(extra: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut out: BTreeSet<String> = DEFAULT_IGNORED_DIRS
        .iter()
        .map(|d| d.to_string())
        .collect();

    out.extend(
        extra
            .into_iter()
            .map(|d| d.trim())
            .filter(|d| !d.is_empty())
            .map(str::to_string),
    );

    out
}

pub fn init(
    args: InitArgs,
    ctx: &AppContext,
) -> Result<()>
{
    let config_path = args
        .path
        .join(CONFIG_FILES[0]);

    if config_path.exists() && !args.force
    {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    let config = Config::default();
    let toml_string =
        toml::to_string_pretty(&config).context("Failed to serialize default config")?;

    if ctx.dry_run
    {
        if !ctx.quiet
        {
            println!("DRY-RUN create: {}", config_path.display());
        }
        return Ok(());
    }

    std::fs::write(&config_path, toml_string).context("Failed to write config file")?;

    if !ctx.quiet
    {
        println!("Created config file at {}", config_path.display());
    }
    Ok(())
}
