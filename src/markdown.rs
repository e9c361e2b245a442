//! Markdown-ish body text to HTML.
//!
//! [`to_html`] understands headings, bold, italics, inline links, blank-line
//! paragraphs and `- ` list items, applied as a fixed sequence of
//! substitutions over the whole text. It is not a markdown parser: anything
//! outside that subset passes through as literal text, and nothing is
//! HTML-escaped.

use std::sync::LazyLock;

use regex::Regex;

// `R`: treat `\r\n` as a line ending for `^`/`$`, and keep `.` off `\r`.
static H3_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?imR)^### (.*)$").unwrap());
static H2_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?imR)^## (.*)$").unwrap());
static H1_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?imR)^# (.*)$").unwrap());
static STRONG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?R)\*\*(.*?)\*\*").unwrap());
static EM_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?R)\*(.*?)\*").unwrap());
static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap());
static LIST_ITEM_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?imR)^- (.*)$").unwrap());

/// Converts a markdown body into an HTML fragment.
///
/// Rules run in order, each over the previous rule's output: headings
/// (longest marker first), `**strong**`, `*em*`, `[label](url)`, blank line
/// to `</p><p>`, `- item` to `<li>`, then the whole thing is wrapped in one
/// `<p>` and every empty `<p></p>` is dropped. List items directly after a
/// blank line are therefore left alone, since their `-` no longer starts a
/// line once the paragraph break is in place.
pub fn to_html(markdown: &str) -> String {
    let html = H3_RE.replace_all(markdown, "<h3>${1}</h3>");
    let html = H2_RE.replace_all(&html, "<h2>${1}</h2>");
    let html = H1_RE.replace_all(&html, "<h1>${1}</h1>");
    let html = STRONG_RE.replace_all(&html, "<strong>${1}</strong>");
    let html = EM_RE.replace_all(&html, "<em>${1}</em>");
    let html = LINK_RE.replace_all(&html, "<a href=\"${2}\">${1}</a>");
    let html = html.replace("\n\n", "</p><p>");
    let html = LIST_ITEM_RE.replace_all(&html, "<li>${1}</li>");

    format!("<p>{html}</p>").replace("<p></p>", "")
}

/// Wraps each blank-line separated chunk of plain text in `<p>`, dropping
/// chunks that are only whitespace.
pub fn paragraphs(content: &str) -> String {
    content
        .split("\n\n")
        .map(str::trim)
        .filter(|para| !para.is_empty())
        .map(|para| format!("<p>{para}</p>"))
        .collect()
}
