//! Filepath: src/infra/walk.rs
//! Source tree walker with extension allow-list and directory pruning.
//! - Ignored directory names and dot-directories are pruned before descent
//! - Extension matching is case-insensitive
//! - Optional .gitignore/.ignore support (off by default)
//! - Deterministic ordering for stable output and tests
//!
//! Backed by ripgrep's `ignore` crate. Unreadable entries are dropped
//! silently (logged at debug level).

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use ignore::{DirEntry, WalkBuilder};
use tracing::debug;

use crate::core::lang::LanguageFamily;
use crate::core::role::file_stem;

/// A discovered source file. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile
{
    /// Absolute path
    pub path: PathBuf,

    /// Family derived from the extension
    pub family: LanguageFamily,
}

impl SourceFile
{
    pub fn new(path: PathBuf) -> Self
    {
        let family = LanguageFamily::from_path(&path);
        Self { path, family }
    }

    /// Directory directly containing the file
    pub fn folder(&self) -> &Path
    {
        self.path
            .parent()
            .unwrap_or(&self.path)
    }

    pub fn file_name(&self) -> String
    {
        self.path
            .file_name()
            .map(|n| {
                n.to_string_lossy()
                    .into_owned()
            })
            .unwrap_or_default()
    }

    /// File name without the final extension
    pub fn stem(&self) -> String
    {
        file_stem(&self.path)
    }
}

/// A folder and the source files it directly contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderGroup
{
    pub folder: PathBuf,

    /// Sorted by file name, case-insensitively
    pub files: Vec<SourceFile>,
}

/// Walker restricted to an extension allow-list that prunes ignored and
/// hidden directories during traversal.
pub struct FileWalker
{
    /// Allowed extensions, lower-case with leading dot
    extensions: BTreeSet<String>,

    /// Directory names never descended into
    ignored_dirs: BTreeSet<String>,

    /// Honor .gitignore/.ignore files; default false
    respect_gitignore: bool,
}

impl FileWalker
{
    pub fn new(
        extensions: BTreeSet<String>,
        ignored_dirs: BTreeSet<String>,
    ) -> Self
    {
        Self { extensions, ignored_dirs, respect_gitignore: false }
    }

    /// (Optional) Apply .gitignore, .git/info/exclude and .ignore rules.
    pub fn with_respect_gitignore(
        mut self,
        respect: bool,
    ) -> Self
    {
        self.respect_gitignore = respect;
        self
    }

    /// Internal: construct a configured WalkBuilder for `root`.
    fn build_walk(
        &self,
        root: &Path,
    ) -> WalkBuilder
    {
        let mut b = WalkBuilder::new(root);

        // Dot-directories are pruned below; dotfiles themselves stay eligible
        b.hidden(false);

        b.ignore(self.respect_gitignore);
        b.parents(self.respect_gitignore);
        b.git_ignore(self.respect_gitignore);
        b.git_global(self.respect_gitignore);
        b.git_exclude(self.respect_gitignore);
        b.require_git(false);

        // Symlinked directories are not followed, so cycles cannot occur
        b.follow_links(false);

        // Early directory pruning (never descend into ignored dirs)
        let ignored = self
            .ignored_dirs
            .clone();
        b.filter_entry(move |ent: &DirEntry| {
            if ent.depth() == 0
            {
                return true;
            }

            let is_dir = ent
                .file_type()
                .map(|ft| ft.is_dir())
                .unwrap_or(false);
            if !is_dir
            {
                return true;
            }

            let name = ent
                .file_name()
                .to_string_lossy();
            !(name.starts_with('.') || ignored.contains(&*name))
        });

        b
    }

    /// True when the path's extension is on the allow-list.
    pub fn matches_extension(
        &self,
        path: &Path,
    ) -> bool
    {
        lower_extension(path).is_some_and(|ext| {
            self.extensions
                .contains(&ext)
        })
    }

    /// Traverse files under `root` whose extension is allowed.
    /// Returns a **sorted** list of paths for determinism.
    pub fn walk_files<P: AsRef<Path>>(
        &self,
        root: P,
    ) -> Vec<PathBuf>
    {
        let root_path = root.as_ref();
        let walker = self
            .build_walk(root_path)
            .build();

        let mut out: Vec<PathBuf> = walker
            .filter_map(|res| match res
            {
                Ok(entry) => Some(entry),
                Err(err) =>
                {
                    debug!(%err, "skipping unreadable entry");
                    None
                }
            })
            .filter(|entry| {
                entry
                    .file_type()
                    .is_some_and(|ft| ft.is_file())
            })
            .map(|entry| entry.into_path())
            .filter(|path| self.matches_extension(path))
            .collect();

        // Deterministic order (stable CLI & tests)
        out.sort();

        out
    }

    /// Walk and wrap every hit as a `SourceFile`.
    pub fn source_files<P: AsRef<Path>>(
        &self,
        root: P,
    ) -> Vec<SourceFile>
    {
        self.walk_files(root)
            .into_iter()
            .map(SourceFile::new)
            .collect()
    }
}

/// Partition files by immediate parent; groups come back in folder order
/// and files within a group are sorted by name, case-insensitively.
pub fn group_by_folder(files: &[SourceFile]) -> Vec<FolderGroup>
{
    let mut mapping: BTreeMap<PathBuf, Vec<SourceFile>> = BTreeMap::new();

    for file in files
    {
        mapping
            .entry(
                file.folder()
                    .to_path_buf(),
            )
            .or_default()
            .push(file.clone());
    }

    mapping
        .into_iter()
        .map(|(folder, mut files)| {
            files.sort_by_key(|f| {
                f.file_name()
                    .to_lowercase()
            });
            FolderGroup { folder, files }
        })
        .collect()
}

fn lower_extension(path: &Path) -> Option<String>
{
    path.extension()
        .map(|e| {
            format!(
                ".{}",
                e.to_string_lossy()
                    .to_lowercase()
            )
        })
}
