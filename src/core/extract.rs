//! Heuristic import/export extraction.
//!
//! Each language family has a small set of line-anchored regexes: imports
//! become "inputs" (module paths) and exports become "outputs" (symbol names).
//! No parsing happens here; results are best-effort and never validated.
//!
//! Both lists are deduplicated in first-seen order with blank tokens dropped.
//! When no export is recognized the file stem stands in as the only output.

use indexmap::IndexSet;
use regex::Regex;
use std::sync::LazyLock;

use crate::core::lang::LanguageFamily;

// --- curly-brace family (JS/TS) ---

static JS_IMPORT_FROM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^\s*import\s+.*?\s+from\s+['"]([^'"]+)['"]"#).unwrap()
});

static JS_REQUIRE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"require\(\s*['"]([^'"]+)['"]\s*\)"#).unwrap());

static JS_EXPORT_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^\s*export\s+(?:async\s+)?(?:function|class|const|let|var|interface|type|enum)\s+([A-Za-z_][A-Za-z0-9_]*)",
    )
    .unwrap()
});

static JS_EXPORT_DEFAULT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*export\s+default\b").unwrap());

static JS_EXPORT_LIST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*export\s*\{([^}]*)\}").unwrap());

static JS_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/|//[^\n]*").unwrap());

static JS_IDENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*").unwrap());

// --- python ---

static PY_FROM_IMPORT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^from\s+([A-Za-z0-9_.]+)\s+import\s+").unwrap());

static PY_ALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)__all__\s*=\s*[\[(](.*?)[\])]").unwrap());

static PY_ALL_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"['"]([A-Za-z0-9_]+)['"]"#).unwrap());

static PY_DEF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^(?:async\s+)?def\s+([A-Za-z_][A-Za-z0-9_]*)\s*\(").unwrap()
});

static PY_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^class\s+([A-Za-z_][A-Za-z0-9_]*)\b").unwrap());

// --- go ---

static GO_QUOTED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#""([^"]+)""#).unwrap());

static GO_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*(?:type|var|const)\s+([A-Z][A-Za-z0-9_]*)\b").unwrap()
});

static GO_FUNC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*func\s+([A-Z][A-Za-z0-9_]*)\s*[\[(]").unwrap());

static GO_METHOD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*func\s+\([^)]*\)\s+([A-Z][A-Za-z0-9_]*)\s*[\[(]").unwrap()
});

// --- java ---

static JAVA_IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*import\s+(?:static\s+)?([A-Za-z0-9_.*]+)\s*;").unwrap()
});

static JAVA_PUBLIC_TYPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^\s*public\s+(?:(?:final|abstract|sealed|static)\s+)*(?:class|interface|enum|record)\s+([A-Za-z_][A-Za-z0-9_]*)\b",
    )
    .unwrap()
});

/// Token emitted for `export default ...`.
pub const DEFAULT_EXPORT_TOKEN: &str = "default export";

/// Inputs (imported modules) and outputs (exported names) of one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedSymbols {
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
}

/// Extract inputs/outputs from `content`. `stem` is the fallback output.
pub fn extract(family: LanguageFamily, content: &str, stem: &str) -> ExtractedSymbols {
    let inputs = match family {
        LanguageFamily::Curly => curly_inputs(content),
        LanguageFamily::Python => python_inputs(content),
        LanguageFamily::Go => go_inputs(content),
        LanguageFamily::Java => captures(&JAVA_IMPORT, content),
        LanguageFamily::Other => Vec::new(),
    };

    let mut outputs = match family {
        LanguageFamily::Curly => curly_outputs(content),
        LanguageFamily::Python => python_outputs(content),
        LanguageFamily::Go => go_outputs(content),
        LanguageFamily::Java => captures(&JAVA_PUBLIC_TYPE, content),
        LanguageFamily::Other => Vec::new(),
    };

    outputs = dedup_tokens(outputs);
    if outputs.is_empty() && !stem.trim().is_empty() {
        outputs.push(stem.trim().to_string());
    }

    ExtractedSymbols { inputs: dedup_tokens(inputs), outputs }
}

/// Trim, drop blanks and keep the first occurrence of each token.
pub fn dedup_tokens<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let set: IndexSet<String> = items
        .into_iter()
        .filter_map(|s| {
            let token = s.as_ref().trim();
            (!token.is_empty()).then(|| token.to_string())
        })
        .collect();
    set.into_iter().collect()
}

/// First capture group of every match, in source order.
fn captures(re: &Regex, content: &str) -> Vec<String> {
    re.captures_iter(content)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Names in `a, b as c` lists, aliases dropped.
fn split_name_list(clause: &str) -> impl Iterator<Item = String> + '_ {
    clause.split(',').filter_map(|token| {
        let name = token.split(" as ").next().unwrap_or("").trim();
        (!name.is_empty()).then(|| name.to_string())
    })
}

fn curly_inputs(content: &str) -> Vec<String> {
    let mut items = captures(&JS_IMPORT_FROM, content);
    items.extend(captures(&JS_REQUIRE, content));
    items
}

fn curly_outputs(content: &str) -> Vec<String> {
    let mut items = captures(&JS_EXPORT_DECL, content);

    if JS_EXPORT_DEFAULT.is_match(content) {
        items.push(DEFAULT_EXPORT_TOKEN.to_string());
    }

    for clause in captures(&JS_EXPORT_LIST, content) {
        let clause = JS_COMMENT.replace_all(&clause, " ");
        items.extend(split_name_list(&clause).filter_map(|token| {
            let token = token.strip_prefix("type ").unwrap_or(token.as_str()).trim_start();
            JS_IDENT.find(token).map(|m| m.as_str().to_string())
        }));
    }

    items
}

fn python_inputs(content: &str) -> Vec<String> {
    let mut items = Vec::new();

    for line in content.lines() {
        let stripped = line.trim();

        if let Some(clause) = stripped.strip_prefix("import ") {
            // Trailing comments are not module names
            let clause = clause.split('#').next().unwrap_or("");
            items.extend(split_name_list(clause));
        } else if stripped.starts_with("from ") {
            if let Some(c) = PY_FROM_IMPORT.captures(stripped) {
                items.push(c[1].to_string());
            }
        }
    }

    items
}

fn python_outputs(content: &str) -> Vec<String> {
    if let Some(all) = PY_ALL.captures(content) {
        let names = captures(&PY_ALL_NAME, &all[1]);
        if !names.is_empty() {
            return names;
        }
    }

    let mut items = captures(&PY_DEF, content);
    items.extend(captures(&PY_CLASS, content));
    items
}

fn go_inputs(content: &str) -> Vec<String> {
    let mut items = Vec::new();
    let mut in_block = false;

    for line in content.lines() {
        let stripped = line.trim();

        if stripped.starts_with("import (") {
            in_block = true;
            continue;
        }

        if in_block {
            if stripped.starts_with(')') {
                in_block = false;
                continue;
            }
            if let Some(c) = GO_QUOTED.captures(stripped) {
                items.push(c[1].to_string());
            }
        } else if stripped.starts_with("import ") {
            if let Some(c) = GO_QUOTED.captures(stripped) {
                items.push(c[1].to_string());
            }
        }
    }

    items
}

fn go_outputs(content: &str) -> Vec<String> {
    let mut items = captures(&GO_DECL, content);
    items.extend(captures(&GO_FUNC, content));
    items.extend(captures(&GO_METHOD, content));
    items
}
