use std::{borrow::Borrow, cmp::Ordering};

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::metadata::Metadata;

use super::data::Entry;

/// Parses a `date` value as either `YYYY-MM-DD` or an RFC 3339 timestamp.
pub fn parse_date(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.naive_utc())
}

pub(super) fn entry_date(meta: &Metadata) -> Option<NaiveDateTime> {
    meta.str("date").and_then(parse_date)
}

/// Newest first. Entries without a usable date go after dated ones and keep
/// their relative order.
pub fn sort_entry<T: Borrow<Entry>>(a: &T, b: &T) -> Ordering {
    match (entry_date(&a.borrow().meta), entry_date(&b.borrow().meta)) {
        (Some(ref a_date), Some(ref b_date)) => b_date.cmp(a_date),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

pub fn sort_by_date_desc(entries: &mut [Entry]) {
    entries.sort_by(sort_entry);
}

/// `"all"` keeps every entry; anything else keeps entries whose `category`
/// is exactly `filter`.
pub fn filter_by_category(entries: Vec<Entry>, filter: &str) -> Vec<Entry> {
    if filter == "all" {
        return entries;
    }
    entries
        .into_iter()
        .filter(|e| e.meta.str("category") == Some(filter))
        .collect()
}

/// Id of a document: its file name with the first `.md` removed.
pub fn document_id(file_name: &str) -> String {
    file_name.replacen(".md", "", 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{collection::BodyFormat, metadata::MetaValue};

    fn entry(id: &str, fields: &[(&str, &str)]) -> Entry {
        Entry {
            id: id.to_string(),
            slug: id.to_string(),
            meta: fields
                .iter()
                .map(|(k, v)| (*k, MetaValue::String(v.to_string())))
                .collect(),
            body: String::new(),
            format: BodyFormat::Markdown,
        }
    }

    fn ids(entries: &[Entry]) -> Vec<&str> {
        entries.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn newest_first() {
        let mut entries = vec![
            entry("january", &[("date", "2024-01-01")]),
            entry("june", &[("date", "2024-06-01")]),
            entry("march", &[("date", "2024-03-15T08:00:00Z")]),
        ];
        sort_by_date_desc(&mut entries);
        assert_eq!(ids(&entries), ["june", "march", "january"]);
    }

    #[test]
    fn undated_entries_trail_in_listing_order() {
        let mut entries = vec![
            entry("none-a", &[]),
            entry("old", &[("date", "2023-05-05")]),
            entry("garbled", &[("date", "last tuesday")]),
            entry("new", &[("date", "2025-01-01")]),
        ];
        sort_by_date_desc(&mut entries);
        assert_eq!(ids(&entries), ["new", "old", "none-a", "garbled"]);
    }

    #[test]
    fn category_filter() {
        let entries = vec![
            entry("a", &[("category", "essay")]),
            entry("b", &[("category", "poem")]),
            entry("c", &[]),
        ];
        assert_eq!(ids(&filter_by_category(entries.clone(), "all")), ["a", "b", "c"]);
        assert_eq!(ids(&filter_by_category(entries.clone(), "poem")), ["b"]);
        assert!(filter_by_category(entries, "Poem").is_empty());
    }

    #[test]
    fn ids_drop_first_md_only() {
        assert_eq!(document_id("hello-world.md"), "hello-world");
        assert_eq!(document_id("notes.md.md"), "notes.md");
        assert_eq!(document_id("README"), "README");
    }
}
