use std::{fmt, str::FromStr};

use anyhow::bail;
use serde_json::{Map, Value};

use crate::{markdown, metadata::Metadata};

/// The three content collections of the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    Writings,
    Journal,
    Projects,
}

impl CollectionKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Writings => "writings",
            Self::Journal => "journal",
            Self::Projects => "projects",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Writings => "Writings",
            Self::Journal => "Journal",
            Self::Projects => "Projects",
        }
    }

    /// Directory holding the collection's markdown files, relative to the
    /// site root.
    pub fn dir(self) -> &'static str {
        match self {
            Self::Writings => "content/writings",
            Self::Journal => "content/journal",
            Self::Projects => "content/projects",
        }
    }

    /// Legacy JSON catalog file, relative to the site root.
    pub fn catalog_file(self) -> &'static str {
        match self {
            Self::Writings => "writings.json",
            Self::Journal => "journal.json",
            Self::Projects => "projects.json",
        }
    }

    /// Key of the record array inside the legacy catalog.
    pub fn catalog_key(self) -> &'static str {
        match self {
            Self::Writings => "writings",
            Self::Journal => "entries",
            Self::Projects => "projects",
        }
    }

    /// Projects keep their listing order; everything else is newest first.
    pub fn sorted_by_date(self) -> bool {
        !matches!(self, Self::Projects)
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CollectionKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "writings" => Ok(Self::Writings),
            "journal" => Ok(Self::Journal),
            "projects" => Ok(Self::Projects),
            _ => bail!("Unknown collection: {s}"),
        }
    }
}

/// How an entry's body turns into HTML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BodyFormat {
    /// Markdown body of a frontmatter document.
    #[default]
    Markdown,
    /// Plain text from a legacy catalog, split into paragraphs.
    Paragraphs,
}

/// One loaded content item.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub id: String,
    pub slug: String,
    pub meta: Metadata,
    pub body: String,
    pub format: BodyFormat,
}

impl Entry {
    pub fn title(&self) -> Option<&str> {
        self.meta.str("title")
    }

    pub fn body_html(&self) -> String {
        match self.format {
            BodyFormat::Markdown => markdown::to_html(&self.body),
            BodyFormat::Paragraphs => markdown::paragraphs(&self.body),
        }
    }

    /// Flat JSON record: metadata fields plus `body`, `id` and `slug`, the
    /// latter three winning over metadata keys of the same name.
    pub fn to_record(&self) -> Value {
        let mut record = Map::new();
        for (key, value) in self.meta.iter() {
            if let Ok(value) = serde_json::to_value(value) {
                record.insert(key.clone(), value);
            }
        }
        record.insert("body".to_string(), Value::String(self.body.clone()));
        record.insert("id".to_string(), Value::String(self.id.clone()));
        record.insert("slug".to_string(), Value::String(self.slug.clone()));
        Value::Object(record)
    }
}
