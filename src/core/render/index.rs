//! Per-folder index documents.

use std::path::Path;

use crate::core::locale::Locale;
use crate::core::render::folder_label;
use crate::core::role::Role;
use crate::infra::walk::FolderGroup;

pub const INDEX_MARKER: &str = "<!-- FORMAT-DOC: Update when files in this folder change -->";

/// Render the index document for one folder group.
pub fn render_index(group: &FolderGroup, root: &Path, locale: Locale) -> String {
    let title = if group.folder == root {
        "Root".to_string()
    } else {
        group
            .folder
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| folder_label(root, &group.folder))
    };

    let summary = locale.folder_summary(group.files.len(), &folder_label(root, &group.folder));

    let mut lines = vec![
        INDEX_MARKER.to_string(),
        String::new(),
        format!("# {title}"),
        String::new(),
        summary,
        String::new(),
        "## Files".to_string(),
        String::new(),
        "| File | Role | Responsibilities |".to_string(),
        "|---|---|---|".to_string(),
    ];

    for file in &group.files {
        let role = Role::from_path(&file.path);
        let responsibility = locale.responsibility(role, &file.stem());
        lines.push(format!(
            "| {} | {} | {} |",
            escape_cell(&file.file_name()),
            role,
            escape_cell(&responsibility)
        ));
    }

    lines.push(String::new());
    lines.join("\n")
}

/// Keep a literal `|` from splitting a table cell.
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}
