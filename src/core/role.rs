//! Filename-based architectural role inference.

use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Controller,
    Service,
    Repository,
    Handler,
    Model,
    Schema,
    Config,
    Utility,
    Api,
    Ui,
    Module,
}

/// Ordered (keyword, role) table; the first substring hit wins.
pub const ROLE_KEYWORDS: &[(&str, Role)] = &[
    ("controller", Role::Controller),
    ("service", Role::Service),
    ("repository", Role::Repository),
    ("repo", Role::Repository),
    ("dao", Role::Repository),
    ("handler", Role::Handler),
    ("model", Role::Model),
    ("entity", Role::Model),
    ("dto", Role::Model),
    ("vo", Role::Model),
    ("schema", Role::Schema),
    ("config", Role::Config),
    ("util", Role::Utility),
    ("helper", Role::Utility),
    ("api", Role::Api),
    ("view", Role::Ui),
    ("component", Role::Ui),
];

impl Role {
    pub fn label(self) -> &'static str {
        match self {
            Role::Controller => "Controller",
            Role::Service => "Service",
            Role::Repository => "Repository",
            Role::Handler => "Handler",
            Role::Model => "Model",
            Role::Schema => "Schema",
            Role::Config => "Config",
            Role::Utility => "Utility",
            Role::Api => "API",
            Role::Ui => "UI",
            Role::Module => "Module",
        }
    }

    /// Classify a file stem (name without extension).
    pub fn from_stem(stem: &str) -> Self {
        let lowered = stem.to_lowercase();
        ROLE_KEYWORDS
            .iter()
            .find(|(keyword, _)| lowered.contains(keyword))
            .map(|&(_, role)| role)
            .unwrap_or(Role::Module)
    }

    pub fn from_path(path: &Path) -> Self {
        Self::from_stem(&file_stem(path))
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// File name without its final extension, lossily decoded.
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
