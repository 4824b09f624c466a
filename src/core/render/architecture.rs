//! Root architecture summary.

use std::path::{Path, PathBuf};

use crate::core::locale::Locale;
use crate::core::render::{ROOT_LABEL, relative_posix};

pub const ARCHITECTURE_MARKER: &str =
    "<!-- FORMAT-DOC: Update when project structure or architecture changes -->";

/// Overview lines are capped so the document keeps a fixed shape.
const MAX_OVERVIEW_LINES: usize = 10;

/// Render the architecture document linking every folder index.
pub fn render_architecture(
    index_paths: &[PathBuf],
    root: &Path,
    locale: Locale,
    index_file: &str,
) -> String {
    let mut lines = vec![
        ARCHITECTURE_MARKER.to_string(),
        String::new(),
        "# Architecture".to_string(),
        String::new(),
    ];
    lines.extend(
        locale
            .overview(index_paths.len(), index_file)
            .into_iter()
            .take(MAX_OVERVIEW_LINES),
    );
    lines.extend([String::new(), "## Modules".to_string(), String::new()]);

    if index_paths.is_empty() {
        lines.push(locale.no_modules().to_string());
    } else {
        let mut entries: Vec<(String, String)> = index_paths
            .iter()
            .map(|p| {
                let link = relative_posix(root, p);
                let folder = p
                    .parent()
                    .map(|f| relative_posix(root, f))
                    .unwrap_or_default();
                (link, folder)
            })
            .collect();
        entries.sort();

        for (link, folder) in entries {
            let name = if folder.is_empty() { ROOT_LABEL.to_string() } else { folder };
            let desc = locale.module_desc(&name);
            lines.push(format!("- [{name}]({link}) - {desc}"));
        }
    }

    lines.push(String::new());
    lines.join("\n")
}
