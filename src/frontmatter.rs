//! Splitting a document into its `---` delimited metadata block and body,
//! and decoding that block into a [`Metadata`] record.
//!
//! The block format is a small line-oriented subset of YAML: `key: value`
//! pairs, `true`/`false` booleans, and `- item` sequences under a key with an
//! empty value. Anything else in the block is skipped. Nothing in this module
//! fails; malformed input degrades to an empty record or ignored lines.

use std::sync::LazyLock;

use regex::Regex;

use crate::metadata::{MetaValue, Metadata};

static BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^---\s*\n(.*?)\n---\s*\n(.*)$").unwrap());

/// A document after its frontmatter has been split off and decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDocument {
    pub meta: Metadata,
    pub body: String,
}

/// Returns `(block, body)` when `content` opens with a frontmatter block.
///
/// The newline ending the closing `---` line belongs to neither part.
pub fn split(content: &str) -> Option<(&str, &str)> {
    let caps = BLOCK_RE.captures(content)?;
    let block = caps.get(1).map_or("", |m| m.as_str());
    let body = caps.get(2).map_or("", |m| m.as_str());
    Some((block, body))
}

/// Splits and decodes `content`. Without a frontmatter block the record is
/// empty and the body is `content` unchanged.
pub fn parse(content: &str) -> ParsedDocument {
    match split(content) {
        Some((block, body)) => ParsedDocument {
            meta: decode(block),
            body: body.to_string(),
        },
        None => ParsedDocument {
            meta: Metadata::new(),
            body: content.to_string(),
        },
    }
}

/// Decodes a frontmatter block, top to bottom.
///
/// A key whose value is empty opens a sequence that collects the `-` lines
/// after it. The sequence stays open until the next key line, so an empty
/// key followed directly by another key ends up as an empty list.
pub fn decode(block: &str) -> Metadata {
    let mut meta = Metadata::new();
    // key of the sequence currently collecting `-` items
    let mut open: Option<String> = None;

    for line in block.split('\n') {
        let trimmed = line.trim();

        if let (Some(item), Some(key)) = (trimmed.strip_prefix('-'), open.as_deref()) {
            if let Some(MetaValue::List(items)) = meta.get_mut(key) {
                items.push(strip_quotes(item.trim()).to_string());
            }
            continue;
        }

        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        let value = strip_quotes(value.trim());

        match value {
            "true" => {
                meta.insert(key, MetaValue::Bool(true));
                open = None;
            }
            "false" => {
                meta.insert(key, MetaValue::Bool(false));
                open = None;
            }
            "" => {
                meta.insert(key, MetaValue::List(vec![]));
                open = Some(key.to_string());
            }
            _ => {
                meta.insert(key, MetaValue::String(value.to_string()));
                open = None;
            }
        }
    }

    meta
}

/// Drops one leading and one trailing quote character, independently.
fn strip_quotes(s: &str) -> &str {
    let is_quote = |c: char| c == '"' || c == '\'';
    let s = s.strip_prefix(is_quote).unwrap_or(s);
    s.strip_suffix(is_quote).unwrap_or(s)
}
