//! Text rendering for the three documentation tiers.

pub mod architecture;
pub mod header;
pub mod index;

pub use architecture::render_architecture;
pub use header::{has_complete_header, insert_header, render_header};
pub use index::render_index;

use std::path::{Component, Path};

use crate::core::extract::dedup_tokens;
use crate::core::locale::Locale;

/// Marker used wherever a path relative to the root would be empty.
pub const ROOT_LABEL: &str = "root";

/// Join tokens for display: placeholder when empty, first `max_items`
/// followed by `...` when longer.
pub fn summarize_items(items: &[String], locale: Locale, max_items: usize) -> String {
    let unique = dedup_tokens(items);

    if unique.is_empty() {
        return locale.placeholder().to_string();
    }

    let cap = max_items.max(1);
    if unique.len() > cap {
        format!("{}, ...", unique[..cap].join(", "))
    } else {
        unique.join(", ")
    }
}

/// `path` relative to `root` with `/` separators; empty when they are equal.
pub fn relative_posix(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Relative folder label, `root` for the scan root itself.
pub fn folder_label(root: &Path, folder: &Path) -> String {
    let rel = relative_posix(root, folder);
    if rel.is_empty() {
        ROOT_LABEL.to_string()
    } else {
        rel
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn owned(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_summary_placeholder_and_cap() {
        assert_eq!(
            summarize_items(&[], Locale::En, 5),
            "To be completed (update from code as needed)."
        );
        assert_eq!(summarize_items(&owned(&[" ", ""]), Locale::Zh, 5), "待补充（请根据实际代码更新）");
        assert_eq!(summarize_items(&owned(&["a", "b", "a"]), Locale::En, 5), "a, b");
        assert_eq!(
            summarize_items(&owned(&["a", "b", "c", "d", "e", "f", "g"]), Locale::En, 5),
            "a, b, c, d, e, ..."
        );
        assert_eq!(summarize_items(&owned(&["a", "b", "c", "d", "e"]), Locale::En, 5), "a, b, c, d, e");
    }

    #[test]
    fn test_folder_label() {
        let root = Path::new("/repo");
        assert_eq!(folder_label(root, Path::new("/repo")), "root");
        assert_eq!(folder_label(root, Path::new("/repo/src/api")), "src/api");
        assert_eq!(relative_posix(root, Path::new("/repo/src/INDEX.md")), "src/INDEX.md");
    }

    proptest! {
        #[test]
        fn prop_truncation_keeps_first_items_in_order(
            items in proptest::collection::vec("[a-z]{1,6}", 0..20),
            cap in 1usize..8,
        ) {
            let unique = dedup_tokens(&items);
            let rendered = summarize_items(&items, Locale::En, cap);

            if unique.is_empty() {
                prop_assert_eq!(rendered, Locale::En.placeholder());
            } else if unique.len() > cap {
                let expected = format!("{}, ...", unique[..cap].join(", "));
                prop_assert_eq!(rendered.matches("...").count(), 1);
                prop_assert_eq!(rendered, expected);
            } else {
                prop_assert_eq!(rendered, unique.join(", "));
            }
        }
    }
}
