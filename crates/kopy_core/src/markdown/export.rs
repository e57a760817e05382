//! Standalone export projections for notes.
//!
//! # Responsibility
//! - Wrap rendered HTML fragments in a fixed-styling document shell.
//! - Derive stable download file names from note titles.
//!
//! # Invariants
//! - Export builds strings only; file/clipboard delivery belongs to callers.
//! - File names contain only lowercase ASCII alphanumerics and underscores.

use once_cell::sync::Lazy;
use regex::Regex;

static FILE_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9]").expect("valid file name regex"));

const FILE_NAME_FALLBACK: &str = "note";

/// Export target for one note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Raw markdown source, passed through unchanged.
    Markdown,
    /// Rendered HTML wrapped in a standalone document shell.
    Html,
}

impl ExportFormat {
    /// File extension without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::Html => "html",
        }
    }

    /// Media type used when handing the artifact to the platform.
    pub fn media_type(self) -> &'static str {
        match self {
            Self::Markdown => "text/markdown;charset=utf-8",
            Self::Html => "text/html;charset=utf-8",
        }
    }
}

/// Derives a download file name from a note title.
///
/// Every character outside `[a-zA-Z0-9]` becomes `_`, the result is
/// lowercased, and an empty title falls back to `note`.
pub fn export_file_name(title: &str, format: ExportFormat) -> String {
    let sanitized = FILE_NAME_RE.replace_all(title, "_").to_lowercase();
    let stem = if sanitized.is_empty() {
        FILE_NAME_FALLBACK
    } else {
        sanitized.as_str()
    };
    format!("{stem}.{}", format.extension())
}

/// Wraps a rendered HTML fragment in a minimal standalone document.
///
/// The shell carries fixed monospace styling so the exported file reads the
/// same everywhere; it does not escape `title` or `body_html` (renderer
/// output is embedded verbatim by design).
pub fn html_document(title: &str, body_html: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <title>{title}</title>
  <link rel="preconnect" href="https://fonts.googleapis.com" />
  <link rel="preconnect" href="https://fonts.gstatic.com" crossorigin="anonymous" />
  <link href="https://fonts.googleapis.com/css2?family=Fira+Code:wght@700&family=JetBrains+Mono:wght@400;700&display=swap" rel="stylesheet" />
  <style>
    body {{ font-family: 'JetBrains Mono', monospace; padding: 2rem; max-width: 800px; margin: 0 auto; }}
    .prose h1, .prose h2, .prose h3, .prose h4, .prose h5, .prose h6 {{ font-family: 'Fira Code', monospace; }}
    .prose h1 {{ font-size: 2.25rem; font-weight: 700; margin: 1rem 0; }}
    .prose img {{ max-width: 100%; height: auto; border-radius: 0.5rem; margin: 1.5rem 0; }}
    .prose blockquote {{ border-left: 3px solid #ccc; padding-left: 1rem; color: #555; }}
    .prose a {{ color: #2E7D32; }}
  </style>
</head>
<body>
  <article class="prose">
    {body_html}
  </article>
</body>
</html>
"#
    )
}
