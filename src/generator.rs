use anyhow::Context;
use log::{error, info};

use crate::{
    collection::{self, filter_by_category, CollectionKind, Entry},
    config::{Config, OutputFormat, SourceKind},
    renderer,
};

fn load_entries(config: &Config) -> anyhow::Result<Vec<Entry>> {
    let kind = config.collection;
    if config.source == SourceKind::Json {
        let catalog_path = config.root.join(kind.catalog_file());
        return collection::load_json_catalog(&catalog_path, kind);
    }

    let source = config
        .content_source()?
        .context("no document source configured")?;
    Ok(collection::load(&*source, kind, &config.load_options))
}

fn render_html(
    config: &Config,
    kind: CollectionKind,
    loaded: anyhow::Result<Vec<Entry>>,
) -> anyhow::Result<String> {
    let cards = match loaded {
        Ok(entries) => renderer::render_cards(kind, &entries),
        Err(e) => {
            // the page still renders, with the error notice in place of cards
            error!("Error loading {kind}: {e:#}");
            renderer::error_message(kind).into_string()
        }
    };

    match &config.template {
        Some(template_path) => {
            let handlebars = renderer::generate_renderer(template_path)?;
            renderer::render_page(&handlebars, kind, &cards)
        }
        None => Ok(cards),
    }
}

/// Loads the configured collection and renders it in the configured format.
pub fn generate(config: &Config) -> anyhow::Result<String> {
    let kind = config.collection;
    let loaded =
        load_entries(config).map(|entries| filter_by_category(entries, &config.category));

    match config.format {
        OutputFormat::Json => {
            let entries = loaded?;
            info!("Writing {} {kind} records", entries.len());
            let records: Vec<_> = entries.iter().map(Entry::to_record).collect();
            serde_json::to_string_pretty(&records).context("while serializing records")
        }
        OutputFormat::Html => render_html(config, kind, loaded),
    }
}
