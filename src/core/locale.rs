//! Documentation locale: the text catalog and auto-detection.

use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::cli::Language;
use crate::core::role::Role;
use crate::infra::io::read_text_lossy;

/// Upper bound on documents inspected during detection.
const DETECT_CANDIDATES: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locale {
    Zh,
    En,
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Locale::Zh => write!(f, "zh"),
            Locale::En => write!(f, "en"),
        }
    }
}

impl Locale {
    /// Resolve a CLI/config choice, scanning existing docs for `auto`.
    pub fn resolve(
        choice: Language,
        root: &Path,
        architecture_file: &str,
        index_file: &str,
    ) -> Self {
        match choice {
            Language::Zh => Locale::Zh,
            Language::En => Locale::En,
            Language::Auto => detect_locale(root, architecture_file, index_file),
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Locale::Zh => "待补充（请根据实际代码更新）",
            Locale::En => "To be completed (update from code as needed).",
        }
    }

    pub fn position(self, folder: &str, role: Role) -> String {
        match self {
            Locale::Zh => format!("位于 {folder}，作为 {role} 层组件。"),
            Locale::En => format!("Located in {folder}, serving as a {role} layer component."),
        }
    }

    pub fn sync_note(self, index_file: &str) -> String {
        match self {
            Locale::Zh => format!("文件变更时同步更新本文件头与目录 {index_file}。"),
            Locale::En => {
                format!("Update this header and folder {index_file} when this file changes.")
            }
        }
    }

    pub fn folder_summary(self, file_count: usize, folder: &str) -> String {
        match self {
            Locale::Zh => format!("该目录包含 {file_count} 个源码文件，负责 {folder} 相关实现。"),
            Locale::En => format!(
                "This folder contains {file_count} source files for {folder} related implementation."
            ),
        }
    }

    pub fn responsibility(self, role: Role, stem: &str) -> String {
        match self {
            Locale::Zh => format!("{role} 组件，处理 {stem} 相关逻辑。"),
            Locale::En => format!("{role} component for {stem} related logic."),
        }
    }

    pub fn overview(self, module_count: usize, index_file: &str) -> Vec<String> {
        match self {
            Locale::Zh => vec![
                "本项目采用模块化目录结构，文档作为代码派生结果持续维护。".to_string(),
                format!(
                    "当前识别到 {module_count} 个代码目录，每个目录由 {index_file} 描述文件职责。"
                ),
                "跨目录依赖关系请结合源码导入与文件头 @input/@output 字段理解。".to_string(),
            ],
            Locale::En => vec![
                "This project uses a modular folder structure with docs maintained as code-derived artifacts."
                    .to_string(),
                format!(
                    "Detected {module_count} code folders, each documented by an {index_file} file."
                ),
                "Cross-folder dependency flow should be read from imports and @input/@output headers."
                    .to_string(),
            ],
        }
    }

    pub fn module_desc(self, folder: &str) -> String {
        match self {
            Locale::Zh => format!("{folder} 目录职责。"),
            Locale::En => format!("Responsibilities for {folder}."),
        }
    }

    pub fn no_modules(self) -> &'static str {
        match self {
            Locale::Zh => "- (暂无模块目录)",
            Locale::En => "- (no module folders found)",
        }
    }
}

/// True when the text holds any CJK unified ideograph.
pub fn contains_cjk(text: &str) -> bool {
    text.chars()
        .any(|c| ('\u{4e00}'..='\u{9fff}').contains(&c))
}

/// Pick `Zh` when the existing architecture file or one of the first index
/// files contains CJK text, `En` otherwise.
pub fn detect_locale(root: &Path, architecture_file: &str, index_file: &str) -> Locale {
    let mut candidates: Vec<PathBuf> = vec![root.join(architecture_file)];

    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .build();
    for entry in walker.filter_map(|res| res.ok()) {
        if candidates.len() >= DETECT_CANDIDATES {
            break;
        }
        let is_file = entry.file_type().is_some_and(|ft| ft.is_file());
        if is_file && entry.file_name() == index_file {
            candidates.push(entry.into_path());
        }
    }

    for path in &candidates {
        if !path.is_file() {
            continue;
        }
        let Ok(text) = read_text_lossy(path) else {
            continue;
        };
        if contains_cjk(&text) {
            debug!(path = %path.display(), "CJK text found, using zh");
            return Locale::Zh;
        }
    }

    Locale::En
}
