//! Markdown-to-HTML renderer.
//!
//! # Responsibility
//! - Map one markdown string to one HTML string in a single pass.
//!
//! # Invariants
//! - Total over all string inputs; unmatched syntax stays literal text.
//! - Rules apply in a fixed order; later rules consume earlier output.
//! - No state is retained between calls.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^(#{1,6}) (.*)$").expect("valid heading regex"));
static BLOCKQUOTE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^> (.*)$").expect("valid blockquote regex"));
static BOLD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("valid bold regex"));
static ITALIC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*(.*?)\*").expect("valid italic regex"));
static IMAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[(.*?)\]\((.*?)\)").expect("valid image regex"));
static LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[(.*?)\]\((.*?)\)").expect("valid link regex"));
static CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"`([^`]+)`").expect("valid code regex"));
static UL_ITEM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\* (.*)$").expect("valid ul item regex"));
static OL_ITEM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[0-9]+\.(.*)$").expect("valid ol item regex"));
static UL_BOUNDARY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"</ul>\s*<ul>").expect("valid ul boundary regex"));
static OL_BOUNDARY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"</ol>\s*<ol>").expect("valid ol boundary regex"));

/// Prefixes that mark a line as already block-level after the block rules ran.
const BLOCK_LEVEL_PREFIXES: &[&str] = &["<h", "<ul", "<ol", "<blockquote"];

/// Renders a markdown string to an HTML fragment.
///
/// Applies a fixed sequence of substitutions: headings, blockquotes, bold,
/// italic, images, links, inline code, list items (with adjacent-boundary
/// merging), then paragraph wrapping for the remaining non-empty lines.
/// The order matters: bold must run before italic so `**` pairs are not
/// re-matched as `*` pairs, and images must run before links because the
/// image syntax contains the link syntax.
///
/// # Contract
/// - Total over all inputs; never fails.
/// - Empty or whitespace-only input renders to an empty string.
/// - A heading needs 1–6 `#` characters; 7+ fall through to a paragraph.
/// - Output is not sanitized against hostile input.
/// - Single-pass only: re-rendering produced HTML is unsupported.
pub fn render_markdown(source: &str) -> String {
    let html = HEADING_RE.replace_all(source, |caps: &Captures<'_>| {
        let level = caps[1].len();
        format!("<h{level}>{}</h{level}>", &caps[2])
    });
    let html = BLOCKQUOTE_RE.replace_all(&html, "<blockquote>$1</blockquote>");
    let html = BOLD_RE.replace_all(&html, "<strong>$1</strong>");
    let html = ITALIC_RE.replace_all(&html, "<em>$1</em>");
    let html = IMAGE_RE.replace_all(&html, r#"<img alt="$1" src="$2" />"#);
    let html = LINK_RE.replace_all(&html, r#"<a href="$2">$1</a>"#);
    let html = CODE_RE.replace_all(&html, "<code>$1</code>");
    let html = UL_ITEM_RE.replace_all(&html, |caps: &Captures<'_>| {
        format!("<ul><li>{}</li></ul>", caps[1].trim())
    });
    let html = OL_ITEM_RE.replace_all(&html, |caps: &Captures<'_>| {
        format!("<ol><li>{}</li></ol>", caps[1].trim())
    });
    // Consecutive single-item lists fuse into one list. Only whitespace may
    // sit between the boundaries; any other content keeps the lists apart.
    let html = UL_BOUNDARY_RE.replace_all(&html, "");
    let html = OL_BOUNDARY_RE.replace_all(&html, "");

    let mut blocks: Vec<String> = Vec::new();
    for line in html.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if is_block_level(trimmed) {
            blocks.push(line.to_string());
        } else {
            blocks.push(format!("<p>{line}</p>"));
        }
    }
    blocks.join("\n")
}

fn is_block_level(line: &str) -> bool {
    BLOCK_LEVEL_PREFIXES
        .iter()
        .any(|prefix| line.starts_with(prefix))
}
