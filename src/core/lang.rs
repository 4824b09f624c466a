//! Extension-derived language families and their comment syntax.

use std::path::Path;

/// Group of extensions sharing extraction patterns and comment syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LanguageFamily {
    /// JavaScript/TypeScript and friends
    Curly,
    Python,
    Go,
    Java,
    /// User-added extension with no extraction patterns
    Other,
}

/// How a header block is wrapped for a family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentStyle {
    /// `"""` ... `"""`
    DocString,
    /// `// ` on every line
    Line,
    /// `/**` ... ` */`
    Block,
}

impl LanguageFamily {
    /// Map an extension (with or without the leading dot, any case).
    pub fn from_extension(ext: &str) -> Self {
        let ext = ext.trim_start_matches('.').to_ascii_lowercase();
        match ext.as_str() {
            "js" | "jsx" | "mjs" | "cjs" | "ts" | "tsx" => LanguageFamily::Curly,
            "py" => LanguageFamily::Python,
            "go" => LanguageFamily::Go,
            "java" => LanguageFamily::Java,
            _ => LanguageFamily::Other,
        }
    }

    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|e| e.to_str())
            .map(Self::from_extension)
            .unwrap_or(LanguageFamily::Other)
    }

    pub fn comment_style(self) -> CommentStyle {
        match self {
            LanguageFamily::Python => CommentStyle::DocString,
            LanguageFamily::Go => CommentStyle::Line,
            LanguageFamily::Curly | LanguageFamily::Java | LanguageFamily::Other => {
                CommentStyle::Block
            }
        }
    }
}

impl std::fmt::Display for LanguageFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LanguageFamily::Curly => write!(f, "curly"),
            LanguageFamily::Python => write!(f, "python"),
            LanguageFamily::Go => write!(f, "go"),
            LanguageFamily::Java => write!(f, "java"),
            LanguageFamily::Other => write!(f, "other"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_from_extension() {
        assert_eq!(LanguageFamily::from_extension(".TSX"), LanguageFamily::Curly);
        assert_eq!(LanguageFamily::from_extension("mjs"), LanguageFamily::Curly);
        assert_eq!(LanguageFamily::from_extension(".py"), LanguageFamily::Python);
        assert_eq!(LanguageFamily::from_extension(".go"), LanguageFamily::Go);
        assert_eq!(LanguageFamily::from_extension(".Java"), LanguageFamily::Java);
        assert_eq!(LanguageFamily::from_extension(".rb"), LanguageFamily::Other);
    }

    #[test]
    fn test_comment_styles() {
        assert_eq!(LanguageFamily::from_path(Path::new("a/b.py")).comment_style(), CommentStyle::DocString);
        assert_eq!(LanguageFamily::from_path(Path::new("main.go")).comment_style(), CommentStyle::Line);
        assert_eq!(LanguageFamily::from_path(Path::new("App.java")).comment_style(), CommentStyle::Block);
        assert_eq!(LanguageFamily::from_path(Path::new("Makefile")).comment_style(), CommentStyle::Block);
    }
}
