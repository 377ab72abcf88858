//! Narrative flattening - analysis HTML → spreadsheet-cell plain text
//!
//! The analysis endpoint is prompted to answer with a small, fixed tag
//! vocabulary (`<p>`, `<ul>`, `<li>`, `<strong>`, headings). Flattening is an
//! ordered list of text-replacement rules over that vocabulary followed by a
//! catch-all tag strip, not a general HTML parser. The projection is lossy on
//! purpose; it only has to read well in a word-wrapped cell.

use regex::Regex;
use std::sync::LazyLock;

/// Approximate characters per rendered line in the narrative cell. A rough
/// stand-in for real text layout; tune against the target spreadsheet viewer
/// rather than trusting it.
const WRAP_COLUMN: usize = 100;

/// Worksheet row height per estimated visual line, in points.
const LINE_HEIGHT: f64 = 15.0;

/// Replacement rules, applied in order. The catch-all stripper must stay
/// last so the vocabulary rules see the original tags.
static TAG_RULES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"(?i)<h[1-6](\s[^>]*)?>", "\n\n"),
        (r"(?i)</h[1-6]\s*>", "\n"),
        (r"(?i)<p(\s[^>]*)?>", "\n"),
        (r"(?i)</p\s*>", "\n"),
        (r"(?i)<li(\s[^>]*)?>", "\u{2022} "),
        (r"(?i)</li\s*>", "\n"),
        (r"(?i)<br\s*/?\s*>", "\n"),
        (r"<[^>]+>", ""),
    ]
    .iter()
    .map(|(pattern, replacement)| (Regex::new(pattern).expect("tag rule pattern"), *replacement))
    .collect()
});

static BLANK_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n[ \t]*\n(?:[ \t]*\n)+").expect("blank run pattern"));

/// Flatten an HTML-flavored narrative into plain text for a single wrapped
/// cell. Unclosed or unknown tags degrade through the catch-all strip rather
/// than failing.
pub fn flatten_html(narrative: &str) -> String {
    let mut text = narrative.to_string();
    for (pattern, replacement) in TAG_RULES.iter() {
        text = pattern.replace_all(&text, *replacement).into_owned();
    }

    // The endpoint occasionally escapes these even inside plain text
    let text = text
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'");

    let text = BLANK_RUN.replace_all(&text, "\n\n");
    text.trim().to_string()
}

/// Estimate how many visual lines `text` occupies in a wrapped cell:
/// `ceil(chars / WRAP_COLUMN)` plus one per explicit line break.
pub fn estimate_line_count(text: &str) -> usize {
    let chars = text.chars().count();
    let breaks = text.matches('\n').count();
    (chars.div_ceil(WRAP_COLUMN) + breaks).max(1)
}

/// Row height for the narrative cell, proportional to the line estimate.
pub fn estimate_row_height(text: &str) -> f64 {
    estimate_line_count(text) as f64 * LINE_HEIGHT
}
