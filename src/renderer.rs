//! Card markup for the site's collection pages.
//!
//! Cards carry the ids, classes and `data-*` attributes the page scripts
//! hook into. Metadata values are escaped; the body is inserted as the HTML
//! produced by [`Entry::body_html`].

use std::path::Path;

use anyhow::Context;
use handlebars::{handlebars_helper, Handlebars};
use maud::{html, Markup, PreEscaped};
use serde::Serialize;

use crate::collection::{parse_date, CollectionKind, Entry};

const INVALID_DATE: &str = "Invalid Date";
const DEFAULT_READ_TIME: &str = "5 min read";
const PROJECT_LINKS: [(&str, &str); 3] = [
    ("liveUrl", "View Live →"),
    ("githubUrl", "GitHub →"),
    ("demoUrl", "Demo →"),
];

/// `2024-06-01` → `June 1, 2024`.
pub fn format_date(date: &str) -> String {
    match parse_date(date) {
        Some(dt) => dt.format("%B %-d, %Y").to_string(),
        None => INVALID_DATE.to_string(),
    }
}

fn non_empty<'a>(entry: &'a Entry, key: &str) -> Option<&'a str> {
    entry.meta.str(key).filter(|s| !s.is_empty())
}

pub fn writing_card(entry: &Entry) -> Markup {
    let meta = &entry.meta;
    let category = meta.str("category").unwrap_or_default();

    html! {
        article.writing-card.featured[meta.flag("featured")] data-category=(category) {
            div.writing-header {
                span.writing-category { (category) }
                span.writing-date { (format_date(meta.str("date").unwrap_or_default())) }
            }
            h3.writing-title { (entry.title().unwrap_or_default()) }
            p.writing-excerpt { (meta.str("excerpt").unwrap_or_default()) }
            div.writing-meta {
                span.read-time { (non_empty(entry, "readTime").unwrap_or(DEFAULT_READ_TIME)) }
                div.writing-tags {
                    @for tag in meta.list("tags") {
                        span.tag { (tag) }
                    }
                }
            }
            button.read-more onclick=(format!("expandWriting('{}')", entry.id)) { "Read More →" }
            div.writing-content id=(format!("content-{}", entry.id)) style="display: none;" {
                div.content-text { (PreEscaped(entry.body_html())) }
                button.read-less onclick=(format!("collapseWriting('{}')", entry.id)) { "Show Less ↑" }
            }
        }
    }
}

pub fn journal_entry(entry: &Entry) -> Markup {
    let tags = entry.meta.list("tags");

    html! {
        article.journal-entry {
            div.entry-header {
                h3.entry-title { (entry.title().unwrap_or_default()) }
                span.entry-date { (format_date(entry.meta.str("date").unwrap_or_default())) }
            }
            div.entry-content {
                (PreEscaped(entry.body_html()))
            }
            @if !tags.is_empty() {
                div.entry-tags {
                    @for tag in tags {
                        span.tag { "#" (tag) }
                    }
                }
            }
        }
    }
}

pub fn project_card(entry: &Entry) -> Markup {
    let meta = &entry.meta;
    let title = entry.title().unwrap_or_default();
    let category = meta.str("category").unwrap_or_default();
    let highlights = meta.list("highlights");

    html! {
        article.project-card.featured[meta.flag("featured")] data-category=(category) {
            div.project-image-wrapper {
                @if let Some(image) = non_empty(entry, "image") {
                    img.project-image src=(image) alt=(non_empty(entry, "imageAlt").unwrap_or(title));
                } @else {
                    div.project-placeholder {
                        span { (title) }
                    }
                }
                @match meta.str("status") {
                    Some("active") => { span.project-badge.active { "Active" } },
                    Some("completed") => { span.project-badge.completed { "Completed" } },
                    _ => {},
                }
            }
            div.project-content {
                div.project-header {
                    span.project-category { (category) }
                }
                h3.project-title { (title) }
                p.project-description { (meta.str("description").unwrap_or_default()) }
                @if !highlights.is_empty() {
                    ul.project-highlights {
                        @for highlight in highlights {
                            li { (highlight) }
                        }
                    }
                }
                div.project-tech {
                    @for tech in meta.list("technologies") {
                        span.tech-tag { (tech) }
                    }
                }
                div.project-tags {
                    @for tag in meta.list("tags") {
                        span.tag { (tag) }
                    }
                }
                div.project-links {
                    @for (key, label) in PROJECT_LINKS {
                        @if let Some(href) = non_empty(entry, key) {
                            a.project-link href=(href) target="_blank" { (label) }
                        }
                    }
                }
            }
        }
    }
}

/// Shown when a collection (or the current category of it) is empty.
pub fn empty_message(kind: CollectionKind) -> Markup {
    let message = match kind {
        CollectionKind::Writings => "No writings found in this category.",
        CollectionKind::Journal => "No journal entries yet. Check back soon!",
        CollectionKind::Projects => "No projects found in this category.",
    };
    html! { p.no-results { (message) } }
}

/// Shown in place of the cards when the collection could not be loaded.
pub fn error_message(kind: CollectionKind) -> Markup {
    html! {
        p.error { "Failed to load " (kind.title().to_lowercase()) ". Please try again later." }
    }
}

pub fn render_cards(kind: CollectionKind, entries: &[Entry]) -> String {
    if entries.is_empty() {
        return empty_message(kind).into_string();
    }

    let card = match kind {
        CollectionKind::Writings => writing_card,
        CollectionKind::Journal => journal_entry,
        CollectionKind::Projects => project_card,
    };
    entries.iter().map(|e| card(e).into_string()).collect()
}

handlebars_helper!(format_date_helper: |date: str| format_date(date));

#[derive(Serialize, Debug)]
struct PageData<'a> {
    title: &'static str,
    collection: &'static str,
    cards: &'a str,
}

/// Loads a page template. The template sees `title`, `collection` and the
/// rendered `cards` (use `{{{cards}}}`), plus a `format_date` helper.
pub fn generate_renderer(template_path: &Path) -> anyhow::Result<Handlebars<'static>> {
    let mut handlebars = Handlebars::new();
    handlebars.register_helper("format_date", Box::new(format_date_helper));
    handlebars
        .register_template_file("page", template_path)
        .with_context(|| format!("{template_path:?}"))?;

    Ok(handlebars)
}

pub fn render_page(
    handlebars: &Handlebars<'_>,
    kind: CollectionKind,
    cards: &str,
) -> anyhow::Result<String> {
    let data = PageData {
        title: kind.title(),
        collection: kind.name(),
        cards,
    };
    handlebars
        .render("page", &data)
        .with_context(|| format!("while rendering {kind} page"))
}
