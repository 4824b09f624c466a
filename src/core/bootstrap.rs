//! Bootstrap pipeline: walk → headers → indexes → architecture.
//!
//! Every artifact goes through `write_if_changed`, so repeated runs on an
//! unchanged tree write nothing. Only an invalid root aborts the run;
//! per-file failures are logged and counted.

use anyhow::Result;
use owo_colors::OwoColorize;
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tabled::{Table, Tabled};
use tracing::{debug, info, instrument, warn};

use crate::cli::{AppContext, BootstrapArgs};
use crate::core::extract::extract;
use crate::core::locale::Locale;
use crate::core::render::header::HeaderContext;
use crate::core::render::{
    has_complete_header, insert_header, render_architecture, render_header, render_index,
};
use crate::infra::config::{load_config, normalize_extensions, normalize_ignored_dirs};
use crate::infra::io::{WriteAction, decode_lossy, read_bytes, write_if_changed};
use crate::infra::walk::{FileWalker, FolderGroup, SourceFile, group_by_folder};

#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("Invalid root path: {}", .0.display())]
    InvalidRoot(PathBuf),
}

/// Counters accumulated over one run.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct RunStatistics {
    pub files_scanned: usize,
    pub folders_scanned: usize,
    pub headers_added: usize,
    pub index_created: usize,
    pub index_updated: usize,
    pub skipped_existing_index: usize,
    pub architecture_created: usize,
    pub architecture_updated: usize,
    pub skipped_existing_architecture: usize,
    pub read_failures: usize,
}

impl RunStatistics {
    /// Total files written (or, in preview mode, that would be written).
    pub fn writes(&self) -> usize {
        self.headers_added
            + self.index_created
            + self.index_updated
            + self.architecture_created
            + self.architecture_updated
    }
}

/// Fully resolved settings: defaults, then config file/env, then CLI.
#[derive(Debug, Clone)]
pub struct BootstrapSettings {
    pub root: PathBuf,
    pub locale: Locale,
    pub index_file: String,
    pub architecture_file: String,
    pub max_header_lines: usize,
    pub max_items: usize,
    pub extensions: BTreeSet<String>,
    pub ignored_dirs: BTreeSet<String>,
    pub respect_gitignore: bool,
    pub preserve_existing_index: bool,
    pub preserve_existing_architecture: bool,
    pub skip_headers: bool,
    pub skip_index: bool,
    pub skip_architecture: bool,
    pub dry_run: bool,
    /// Print per-file actions for real writes too, not only previews
    pub verbose: bool,
    /// Allow plain-text progress lines on stdout
    pub echo_actions: bool,
}

impl BootstrapSettings {
    pub fn resolve(args: &BootstrapArgs, ctx: &AppContext) -> Result<Self> {
        if !args.root.is_dir() {
            return Err(BootstrapError::InvalidRoot(args.root.clone()).into());
        }
        let root = dunce::canonicalize(&args.root)
            .map_err(|_| BootstrapError::InvalidRoot(args.root.clone()))?;

        let config = load_config(&root)?;

        let index_file = args.index_file.clone().unwrap_or(config.index_file);
        let architecture_file = args
            .architecture_file
            .clone()
            .unwrap_or(config.architecture_file);
        let language = args.language.unwrap_or(config.language);
        let locale = Locale::resolve(language, &root, &architecture_file, &index_file);

        let extensions =
            normalize_extensions(config.extensions.iter().chain(args.extensions.iter()));
        let ignored_dirs =
            normalize_ignored_dirs(config.ignore_dirs.iter().chain(args.ignore_dirs.iter()));

        Ok(Self {
            root,
            locale,
            index_file,
            architecture_file,
            max_header_lines: args.max_header_lines.unwrap_or(config.max_header_lines),
            max_items: args.max_items.unwrap_or(config.max_items),
            extensions,
            ignored_dirs,
            respect_gitignore: args.respect_gitignore || config.respect_gitignore,
            preserve_existing_index: args.preserve_existing_index,
            preserve_existing_architecture: args.preserve_existing_architecture,
            skip_headers: args.skip_headers,
            skip_index: args.skip_index,
            skip_architecture: args.skip_architecture,
            dry_run: ctx.dry_run,
            verbose: ctx.verbose,
            echo_actions: !ctx.quiet && !args.json,
        })
    }
}

/// CLI entry point: resolve settings, run the pipeline, print the summary.
pub fn run(args: BootstrapArgs, ctx: &AppContext) -> Result<RunStatistics> {
    let settings = BootstrapSettings::resolve(&args, ctx)?;
    let stats = execute(&settings)?;

    if args.json {
        println!("{}", serde_json::to_string(&stats)?);
    } else if !ctx.quiet {
        print_summary(&stats, ctx);
    }

    Ok(stats)
}

/// Run all enabled phases in their fixed order.
#[instrument(skip_all, fields(root = %settings.root.display()))]
pub fn execute(settings: &BootstrapSettings) -> Result<RunStatistics> {
    let walker = FileWalker::new(settings.extensions.clone(), settings.ignored_dirs.clone())
        .with_respect_gitignore(settings.respect_gitignore);
    let files = walker.source_files(&settings.root);
    let groups = group_by_folder(&files);

    let mut stats = RunStatistics {
        files_scanned: files.len(),
        folders_scanned: groups.len(),
        ..RunStatistics::default()
    };

    info!(
        locale = %settings.locale,
        files = stats.files_scanned,
        folders = stats.folders_scanned,
        "bootstrap start"
    );
    if settings.echo_actions {
        println!(
            "Bootstrap start: root={}, language={}, files={}, folders={}",
            settings.root.display(),
            settings.locale,
            stats.files_scanned,
            stats.folders_scanned
        );
    }

    if !settings.skip_headers {
        bootstrap_headers(&files, settings, &mut stats);
    }

    let index_paths = if settings.skip_index {
        groups
            .iter()
            .map(|g| g.folder.join(&settings.index_file))
            .collect()
    } else {
        bootstrap_indexes(&groups, settings, &mut stats)
    };

    if !settings.skip_architecture {
        bootstrap_architecture(&index_paths, settings, &mut stats);
    }

    Ok(stats)
}

#[instrument(skip_all, fields(files = files.len()))]
fn bootstrap_headers(files: &[SourceFile], settings: &BootstrapSettings, stats: &mut RunStatistics) {
    let ctx = HeaderContext {
        root: &settings.root,
        locale: settings.locale,
        index_file: &settings.index_file,
        max_items: settings.max_items,
    };

    for file in files {
        let raw = match read_bytes(&file.path) {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!("failed to read {}: {err:#}", file.path.display());
                stats.read_failures += 1;
                continue;
            }
        };

        // Decoded text feeds detection and extraction; the write keeps `raw`
        let content = decode_lossy(&raw);

        if has_complete_header(&content, settings.max_header_lines) {
            debug!(path = %file.path.display(), "header already complete");
            continue;
        }

        let symbols = extract(file.family, &content, &file.stem());
        debug!(
            path = %file.path.display(),
            family = %file.family,
            inputs = symbols.inputs.len(),
            outputs = symbols.outputs.len(),
            "adding header"
        );
        let header = render_header(&file.path, file.family, &symbols, &ctx);
        let updated = insert_header(file.family, &raw, &header);

        if write_artifact(&file.path, &updated, settings).is_some_and(WriteAction::is_write) {
            stats.headers_added += 1;
        }
    }
}

/// Returns every folder's index path, including preserved ones.
#[instrument(skip_all, fields(folders = groups.len()))]
fn bootstrap_indexes(
    groups: &[FolderGroup],
    settings: &BootstrapSettings,
    stats: &mut RunStatistics,
) -> Vec<PathBuf> {
    let mut index_paths = Vec::with_capacity(groups.len());

    for group in groups {
        let index_path = group.folder.join(&settings.index_file);
        index_paths.push(index_path.clone());

        if settings.preserve_existing_index && index_path.exists() {
            debug!(path = %index_path.display(), "preserving existing index");
            stats.skipped_existing_index += 1;
            continue;
        }

        let content = render_index(group, &settings.root, settings.locale);
        match write_artifact(&index_path, content.as_bytes(), settings) {
            Some(WriteAction::Create) => stats.index_created += 1,
            Some(WriteAction::Update) => stats.index_updated += 1,
            Some(WriteAction::Unchanged) | None => {}
        }
    }

    index_paths
}

#[instrument(skip_all, fields(indexes = index_paths.len()))]
fn bootstrap_architecture(
    index_paths: &[PathBuf],
    settings: &BootstrapSettings,
    stats: &mut RunStatistics,
) {
    let path = settings.root.join(&settings.architecture_file);

    if settings.preserve_existing_architecture && path.exists() {
        debug!(path = %path.display(), "preserving existing architecture file");
        stats.skipped_existing_architecture += 1;
        return;
    }

    let content =
        render_architecture(index_paths, &settings.root, settings.locale, &settings.index_file);
    match write_artifact(&path, content.as_bytes(), settings) {
        Some(WriteAction::Create) => stats.architecture_created += 1,
        Some(WriteAction::Update) => stats.architecture_updated += 1,
        Some(WriteAction::Unchanged) | None => {}
    }
}

/// Write through the idempotent writer; failures become warnings.
fn write_artifact(path: &Path, content: &[u8], settings: &BootstrapSettings) -> Option<WriteAction> {
    let action = match write_if_changed(path, content, settings.dry_run) {
        Ok(action) => action,
        Err(err) => {
            warn!("failed to write {}: {err:#}", path.display());
            return None;
        }
    };

    if action.is_write() {
        info!(path = %path.display(), %action, dry_run = settings.dry_run, "artifact");
        if settings.echo_actions && settings.dry_run {
            println!("DRY-RUN {action}: {}", path.display());
        } else if settings.echo_actions && settings.verbose {
            let done = if action == WriteAction::Create { "created" } else { "updated" };
            println!("{done}: {}", path.display());
        }
    }

    Some(action)
}

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Counter")]
    counter: &'static str,
    #[tabled(rename = "Value")]
    value: usize,
}

fn print_summary(stats: &RunStatistics, ctx: &AppContext) {
    let mut rows = vec![
        SummaryRow { counter: "headers_added", value: stats.headers_added },
        SummaryRow { counter: "index_created", value: stats.index_created },
        SummaryRow { counter: "index_updated", value: stats.index_updated },
        SummaryRow { counter: "architecture_created", value: stats.architecture_created },
        SummaryRow { counter: "architecture_updated", value: stats.architecture_updated },
    ];
    if stats.skipped_existing_index > 0 {
        rows.push(SummaryRow {
            counter: "skipped_existing_index",
            value: stats.skipped_existing_index,
        });
    }
    if stats.skipped_existing_architecture > 0 {
        rows.push(SummaryRow {
            counter: "skipped_existing_architecture",
            value: stats.skipped_existing_architecture,
        });
    }
    if stats.read_failures > 0 {
        rows.push(SummaryRow { counter: "read_failures", value: stats.read_failures });
    }

    if ctx.no_color {
        println!("Bootstrap summary:");
    } else {
        println!("{}", "Bootstrap summary:".green());
    }
    println!("{}", Table::new(rows));
}
