//! Turning listed documents into sorted [`Entry`] records.

use std::{fs::File, io::BufReader, path::Path};

use anyhow::{anyhow, Context};
use log::{debug, error, info, warn};
use serde_json::Value;

use crate::{
    frontmatter,
    metadata::{MetaValue, Metadata},
    source::ContentSource,
};

mod data;
mod utils;

pub use data::{BodyFormat, CollectionKind, Entry};
pub use utils::{document_id, filter_by_category, parse_date, sort_by_date_desc, sort_entry};

#[derive(Debug, Clone, Copy, Default)]
pub struct LoadOptions {
    /// Skip documents whose frontmatter has no `title`.
    pub require_title: bool,
}

/// Lists, fetches and parses every document of `kind`.
///
/// A listing failure gives an empty collection and a failed fetch drops that
/// document; both are logged rather than returned, so one bad file never
/// hides the rest of the collection.
pub fn load(source: &dyn ContentSource, kind: CollectionKind, options: &LoadOptions) -> Vec<Entry> {
    let docs = match source.list(kind) {
        Ok(docs) => docs,
        Err(e) => {
            error!("Error listing {kind}: {e:#}");
            return vec![];
        }
    };

    let mut entries = Vec::with_capacity(docs.len());
    for doc in docs.iter() {
        let content = match source.fetch(doc) {
            Ok(content) => content,
            Err(e) => {
                error!("Error fetching {}: {e:#}", doc.name);
                continue;
            }
        };

        let parsed = frontmatter::parse(&content);
        if options.require_title && !parsed.meta.contains_key("title") {
            warn!("{} has no title. ignoring...", doc.name);
            continue;
        }

        let id = document_id(&doc.name);
        entries.push(Entry {
            slug: id.clone(),
            id,
            meta: parsed.meta,
            body: parsed.body,
            format: BodyFormat::Markdown,
        });
    }
    info!("Loaded {} of {} {kind} documents", entries.len(), docs.len());

    if kind.sorted_by_date() {
        sort_by_date_desc(&mut entries);
    }
    entries
}

/// Loads a legacy JSON catalog, whose records carry their metadata as JSON
/// fields and their body as plain-text `content`.
pub fn load_json_catalog(catalog_path: &Path, kind: CollectionKind) -> anyhow::Result<Vec<Entry>> {
    let fd = File::open(catalog_path).with_context(|| format!("while opening {catalog_path:?}"))?;
    let reader = BufReader::new(fd);
    let mut catalog: Value = serde_json::from_reader(reader)
        .with_context(|| format!("while reading {catalog_path:?}"))?;

    let records = match catalog.get_mut(kind.catalog_key()).map(Value::take) {
        Some(Value::Array(records)) => records,
        _ => {
            return Err(anyhow!(
                "{catalog_path:?} has no `{}` array",
                kind.catalog_key()
            ))
        }
    };

    Ok(records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match record {
            Value::Object(fields) => Some(catalog_entry(index, fields)),
            other => {
                warn!("Skipping non-object record #{index} in {catalog_path:?}: {other}");
                None
            }
        })
        .collect())
}

fn catalog_entry(index: usize, fields: serde_json::Map<String, Value>) -> Entry {
    let mut meta = Metadata::new();
    let mut id = index.to_string();
    let mut body = String::new();

    for (key, value) in fields {
        match (key.as_str(), value) {
            ("id", Value::String(s)) => id = s,
            ("id", Value::Number(n)) => id = n.to_string(),
            ("content", Value::String(s)) => body = s,
            // {"links": {"live": ..}} reads as `liveUrl` and friends
            ("links", Value::Object(links)) => {
                for (name, href) in links {
                    if let Value::String(href) = href {
                        meta.insert(format!("{name}Url"), MetaValue::String(href));
                    }
                }
            }
            (_, value) => match catalog_value(value) {
                Some(value) => meta.insert(key.as_str(), value),
                None => debug!("Dropping field `{key}` of record #{index}"),
            },
        }
    }

    Entry {
        slug: id.clone(),
        id,
        meta,
        body,
        format: BodyFormat::Paragraphs,
    }
}

fn catalog_value(value: Value) -> Option<MetaValue> {
    match value {
        Value::String(s) => Some(MetaValue::String(s)),
        Value::Bool(b) => Some(MetaValue::Bool(b)),
        Value::Number(n) => Some(MetaValue::String(n.to_string())),
        Value::Array(items) => Some(MetaValue::List(
            items
                .into_iter()
                .map(|item| match item {
                    Value::String(s) => s,
                    other => other.to_string(),
                })
                .collect(),
        )),
        Value::Null | Value::Object(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use anyhow::bail;

    use super::*;
    use crate::source::{DocumentRef, Location};

    /// Documents held in memory, listed in insertion order.
    struct MemorySource {
        order: Vec<&'static str>,
        files: HashMap<&'static str, &'static str>,
        fail_listing: bool,
    }

    impl MemorySource {
        fn new(files: &[(&'static str, &'static str)]) -> Self {
            Self {
                order: files.iter().map(|(name, _)| *name).collect(),
                files: files.iter().copied().collect(),
                fail_listing: false,
            }
        }
    }

    impl ContentSource for MemorySource {
        fn list(&self, _kind: CollectionKind) -> anyhow::Result<Vec<DocumentRef>> {
            if self.fail_listing {
                bail!("listing unavailable");
            }
            Ok(self
                .order
                .iter()
                .map(|name| DocumentRef {
                    name: name.to_string(),
                    location: Location::Url(format!("mem://{name}")),
                })
                .collect())
        }

        fn fetch(&self, doc: &DocumentRef) -> anyhow::Result<String> {
            match self.files.get(doc.name.as_str()) {
                Some(text) if !text.is_empty() => Ok(text.to_string()),
                _ => bail!("no such document: {}", doc.name),
            }
        }
    }

    fn ids(entries: &[Entry]) -> Vec<&str> {
        entries.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn writings_sorted_newest_first_and_failed_fetch_skipped() {
        let source = MemorySource::new(&[
            ("old.md", "---\ntitle: Old\ndate: 2024-01-01\n---\nold body"),
            ("gone.md", ""),
            ("new.md", "---\ntitle: New\ndate: 2024-06-01\ntags:\n  - rust\n---\nnew body"),
        ]);
        let entries = load(&source, CollectionKind::Writings, &LoadOptions::default());

        assert_eq!(ids(&entries), ["new", "old"]);
        assert_eq!(entries[0].slug, "new");
        assert_eq!(entries[0].body, "new body");
        assert_eq!(entries[0].meta.list("tags"), ["rust"]);
        assert_eq!(entries[0].format, BodyFormat::Markdown);
    }

    #[test]
    fn projects_keep_listing_order() {
        let source = MemorySource::new(&[
            ("b.md", "---\ntitle: B\ndate: 2020-01-01\n---\n"),
            ("a.md", "---\ntitle: A\ndate: 2024-01-01\n---\n"),
        ]);
        let entries = load(&source, CollectionKind::Projects, &LoadOptions::default());
        assert_eq!(ids(&entries), ["b", "a"]);
    }

    #[test]
    fn untitled_documents() {
        let source = MemorySource::new(&[
            ("titled.md", "---\ntitle: Yes\n---\nbody"),
            ("plain.md", "no frontmatter at all"),
        ]);

        let all = load(&source, CollectionKind::Journal, &LoadOptions::default());
        assert_eq!(ids(&all), ["titled", "plain"]);
        assert!(all[1].meta.is_empty());
        assert_eq!(all[1].body, "no frontmatter at all");

        let titled = load(
            &source,
            CollectionKind::Journal,
            &LoadOptions {
                require_title: true,
            },
        );
        assert_eq!(ids(&titled), ["titled"]);
    }

    #[test]
    fn failed_listing_is_empty_collection() {
        let mut source = MemorySource::new(&[("a.md", "---\ntitle: A\n---\n")]);
        source.fail_listing = true;
        assert!(load(&source, CollectionKind::Writings, &LoadOptions::default()).is_empty());
    }

    #[test]
    fn record_fields_override_metadata() {
        let source = MemorySource::new(&[("post.md", "---\nid: spoofed\nbody: x\nfeatured: true\n---\ntext")]);
        let entries = load(&source, CollectionKind::Writings, &LoadOptions::default());
        assert_eq!(
            entries[0].to_record(),
            serde_json::json!({
                "id": "post",
                "slug": "post",
                "body": "text",
                "featured": true,
            })
        );
    }

    #[test]
    fn catalog_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("projects.json");
        std::fs::write(
            &path,
            r#"{"projects": [
                {"id": 7, "title": "Site", "featured": true, "technologies": ["Rust", 3],
                 "links": {"live": "https://site.example", "github": "https://github.com/x/y"},
                 "image": null, "content": "One.\n\nTwo."},
                "not a record",
                {"title": "Second"}
            ]}"#,
        )
        .unwrap();

        let entries = load_json_catalog(&path, CollectionKind::Projects).unwrap();
        assert_eq!(ids(&entries), ["7", "2"]);

        let site = &entries[0];
        assert_eq!(site.title(), Some("Site"));
        assert!(site.meta.flag("featured"));
        assert_eq!(site.meta.list("technologies"), ["Rust", "3"]);
        assert_eq!(site.meta.str("liveUrl"), Some("https://site.example"));
        assert_eq!(site.meta.str("githubUrl"), Some("https://github.com/x/y"));
        assert!(!site.meta.contains_key("image"));
        assert!(!site.meta.contains_key("content"));
        assert_eq!(site.body_html(), "<p>One.</p><p>Two.</p>");
    }

    #[test]
    fn catalog_without_expected_key_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("journal.json");
        std::fs::write(&path, r#"{"journal": []}"#).unwrap();
        assert!(load_json_catalog(&path, CollectionKind::Journal).is_err());
        assert!(load_json_catalog(&dir.path().join("missing.json"), CollectionKind::Journal).is_err());
    }
}
