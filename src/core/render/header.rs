//! File header blocks: rendering, completeness check and insertion.

use memchr::memchr_iter;
use regex::bytes::Regex;
use std::path::Path;
use std::sync::LazyLock;

use crate::core::extract::ExtractedSymbols;
use crate::core::lang::{CommentStyle, LanguageFamily};
use crate::core::locale::Locale;
use crate::core::render::{folder_label, summarize_items};
use crate::core::role::Role;

/// Tags that must all be present for a header to count as complete.
pub const REQUIRED_HEADER_TAGS: [&str; 3] = ["@input", "@output", "@position"];

/// At least one of these must be present as well.
pub const SYNC_TAGS: [&str; 2] = ["@doc-sync", "@auto-doc"];

static PY_ENCODING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#.*coding[:=]\s*[-\w.]+").unwrap());

/// Inputs to a rendered header beyond the file text itself.
#[derive(Debug, Clone, Copy)]
pub struct HeaderContext<'a> {
    pub root: &'a Path,
    pub locale: Locale,
    pub index_file: &'a str,
    pub max_items: usize,
}

/// First `max_lines` lines of `content` (without the trailing newline).
fn head_lines(content: &str, max_lines: usize) -> &str {
    if max_lines == 0 {
        return "";
    }
    match memchr_iter(b'\n', content.as_bytes()).nth(max_lines - 1) {
        Some(end) => &content[..end],
        None => content,
    }
}

/// True when the first `max_lines` lines hold every required tag and at
/// least one sync tag, compared case-insensitively.
pub fn has_complete_header(content: &str, max_lines: usize) -> bool {
    let snippet = head_lines(content, max_lines).to_lowercase();

    REQUIRED_HEADER_TAGS
        .iter()
        .all(|tag| snippet.contains(tag))
        && SYNC_TAGS
            .iter()
            .any(|tag| snippet.contains(tag))
}

/// Render the header block for one source file.
pub fn render_header(
    path: &Path,
    family: LanguageFamily,
    symbols: &ExtractedSymbols,
    ctx: &HeaderContext<'_>,
) -> String {
    let inputs = summarize_items(&symbols.inputs, ctx.locale, ctx.max_items);
    let outputs = summarize_items(&symbols.outputs, ctx.locale, ctx.max_items);

    let folder = path
        .parent()
        .map(|p| folder_label(ctx.root, p))
        .unwrap_or_else(|| folder_label(ctx.root, ctx.root));
    let position = ctx.locale.position(&folder, Role::from_path(path));
    let sync_note = ctx.locale.sync_note(ctx.index_file);

    let lines = [
        format!("@input {inputs}"),
        format!("@output {outputs}"),
        format!("@position {position}"),
        format!("@doc-sync {sync_note}"),
    ];

    match family.comment_style() {
        CommentStyle::DocString => format!("\"\"\"\n{}\n\"\"\"", lines.join("\n")),
        CommentStyle::Line => lines
            .iter()
            .map(|l| format!("// {l}"))
            .collect::<Vec<_>>()
            .join("\n"),
        CommentStyle::Block => {
            // A stray terminator would end the comment before the last tag
            let body: Vec<String> = lines
                .iter()
                .map(|l| format!(" * {}", l.replace("*/", "*\\/")))
                .collect();
            format!("/**\n{}\n */", body.join("\n"))
        }
    }
}

/// Prefix `header` to the raw file bytes. Python keeps a leading shebang
/// and/or encoding declaration above the header. Everything after the
/// header is the original content, byte for byte.
pub fn insert_header(family: LanguageFamily, content: &[u8], header: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(content.len() + header.len() + 3);

    let keep = if family == LanguageFamily::Python {
        python_preamble_len(content)
    } else {
        0
    };
    let (prefix, suffix) = content.split_at(keep);

    out.extend_from_slice(prefix);
    if !prefix.is_empty() && !prefix.ends_with(b"\n") {
        out.push(b'\n');
    }
    out.extend_from_slice(header.as_bytes());
    out.extend_from_slice(b"\n\n");
    out.extend_from_slice(suffix);
    out
}

/// Byte length of a leading shebang line plus an optional encoding line.
fn python_preamble_len(content: &[u8]) -> usize {
    let mut lines = content.split_inclusive(|&b| b == b'\n');
    let mut keep = 0;
    let mut next = lines.next();

    if let Some(line) = next.filter(|l| l.starts_with(b"#!")) {
        keep += line.len();
        next = lines.next();
    }
    if let Some(line) = next.filter(|l| PY_ENCODING.is_match(l)) {
        keep += line.len();
    }

    keep
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(root: &Path) -> HeaderContext<'_> {
        HeaderContext { root, locale: Locale::En, index_file: "INDEX.md", max_items: 5 }
    }

    fn insert(family: LanguageFamily, content: &str, header: &str) -> String {
        String::from_utf8(insert_header(family, content.as_bytes(), header)).expect("utf-8")
    }

    fn symbols(inputs: &[&str], outputs: &[&str]) -> ExtractedSymbols {
        ExtractedSymbols {
            inputs: inputs.iter().map(|s| s.to_string()).collect(),
            outputs: outputs.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_python_header_layout() {
        let root = Path::new("/repo");
        let header = render_header(
            Path::new("/repo/src/a.py"),
            LanguageFamily::Python,
            &symbols(&["os"], &["foo"]),
            &ctx(root),
        );
        assert_eq!(
            header,
            "\"\"\"\n@input os\n@output foo\n@position Located in src, serving as a Module layer component.\n@doc-sync Update this header and folder INDEX.md when this file changes.\n\"\"\""
        );
        assert!(has_complete_header(&header, 80));
    }

    #[test]
    fn test_go_and_block_styles() {
        let root = Path::new("/repo");
        let go = render_header(
            Path::new("/repo/main.go"),
            LanguageFamily::Go,
            &symbols(&[], &["Run"]),
            &ctx(root),
        );
        assert!(go.lines().all(|l| l.starts_with("// @")));
        assert!(go.contains("@input To be completed (update from code as needed)."));
        assert!(go.contains("Located in root, serving as a Module layer component."));

        let ts = render_header(
            Path::new("/repo/web/user-service.ts"),
            LanguageFamily::Curly,
            &symbols(&["react"], &["UserService"]),
            &ctx(root),
        );
        assert!(ts.starts_with("/**\n * @input react\n"));
        assert!(ts.ends_with("\n */"));
        assert!(ts.contains("serving as a Service layer component"));
    }

    #[test]
    fn test_completeness_requires_all_three_tags() {
        let partial = "/**\n * @input a\n * @output b\n * @doc-sync x\n */\ncode";
        assert!(!has_complete_header(partial, 80));

        let no_sync = "// @input a\n// @output b\n// @position c\n";
        assert!(!has_complete_header(no_sync, 80));

        let upper = "// @INPUT a\n// @Output b\n// @Position c\n// @AUTO-DOC d\n";
        assert!(has_complete_header(upper, 80));
    }

    #[test]
    fn test_completeness_respects_scan_depth() {
        let mut content = "x\n".repeat(10);
        content.push_str("// @input a\n// @output b\n// @position c\n// @doc-sync d\n");

        assert!(!has_complete_header(&content, 10));
        assert!(!has_complete_header(&content, 13));
        assert!(has_complete_header(&content, 14));
        assert!(!has_complete_header(&content, 0));
    }

    #[test]
    fn test_insert_keeps_shebang_and_encoding() {
        let content = "#!/usr/bin/env python\n# -*- coding: utf-8 -*-\nimport os\n";
        let out = insert(LanguageFamily::Python, content, "\"\"\"H\"\"\"");
        assert_eq!(
            out,
            "#!/usr/bin/env python\n# -*- coding: utf-8 -*-\n\"\"\"H\"\"\"\n\nimport os\n"
        );

        let encoding_only = "# coding=latin-1\nx = 1\n";
        let out = insert(LanguageFamily::Python, encoding_only, "H");
        assert_eq!(out, "# coding=latin-1\nH\n\nx = 1\n");
    }

    #[test]
    fn test_insert_adds_newline_after_bare_shebang() {
        let out = insert(LanguageFamily::Python, "#!/usr/bin/python", "H");
        assert_eq!(out, "#!/usr/bin/python\nH\n\n");
    }

    #[test]
    fn test_insert_keeps_non_utf8_body_bytes() {
        let content: &[u8] = b"# -*- coding: latin-1 -*-\n# caf\xe9\ndef foo(): pass\n";
        let out = insert_header(LanguageFamily::Python, content, "H");
        assert_eq!(out, b"# -*- coding: latin-1 -*-\nH\n\n# caf\xe9\ndef foo(): pass\n");
    }

    #[test]
    fn test_block_header_cannot_close_early() {
        let root = Path::new("/repo");
        let header = render_header(
            Path::new("/repo/web/legacy.js"),
            LanguageFamily::Curly,
            &symbols(&["a*/b"], &["x"]),
            &ctx(root),
        );
        assert_eq!(header.matches("*/").count(), 1);
        assert!(header.ends_with("\n */"));
        assert!(header.contains("@doc-sync"));
    }

    #[test]
    fn test_insert_plain_prefix_for_other_families() {
        let out = insert(LanguageFamily::Curly, "#!/usr/bin/env node\nrun();\n", "/** H */");
        assert_eq!(out, "/** H */\n\n#!/usr/bin/env node\nrun();\n");
    }
}
