//! **formatdoc** - Bootstrap three-tier documentation for lightly documented repositories
//!
//! Walks a source tree and writes per-file `@input/@output/@position/@doc-sync` headers,
//! per-folder `INDEX.md` tables and a root `ARCHITECTURE.md`, using regex heuristics only.
//! Every write is content-checked, so re-running on an unchanged tree is a no-op.

/// Command-line interface with clap integration
pub mod cli;

/// Shell completion generation
pub mod completion;

/// Core pipeline - extraction, classification, rendering and orchestration
pub mod core {
    /// Orchestrator: settings resolution, phases and run statistics
    pub mod bootstrap;
    pub use bootstrap::{BootstrapError, BootstrapSettings, RunStatistics, run as bootstrap_run};

    /// Regex-based import/export extraction per language family
    pub mod extract;
    pub use extract::{ExtractedSymbols, extract};

    /// Extension → language family and comment syntax
    pub mod lang;
    pub use lang::{CommentStyle, LanguageFamily};

    /// Documentation locale, text catalog and auto-detection
    pub mod locale;
    pub use locale::Locale;

    /// Header, index and architecture renderers
    pub mod render;

    /// Filename keyword → architectural role
    pub mod role;
    pub use role::Role;
}

/// Infrastructure - configuration, I/O and tree walking
pub mod infra {
    /// Layered configuration (formatdoc.toml + FORMATDOC_* env) and built-in defaults
    pub mod config;
    pub use config::{Config, init as config_init, load_config};

    /// Lossy text reads and the idempotent writer
    pub mod io;
    pub use io::{WriteAction, decode_lossy, read_bytes, read_text_lossy, write_if_changed};

    /// Extension-filtered directory walking with early pruning
    pub mod walk;
    pub use walk::{FileWalker, FolderGroup, SourceFile, group_by_folder};
}

// Strategic re-exports for clean CLI interface
pub use crate::cli::{AppContext, Cli, Commands};
pub use crate::core::{BootstrapError, RunStatistics, bootstrap_run};
pub use crate::infra::{Config, FileWalker, load_config};
