//! Content pipeline for a portfolio site: markdown documents with a `---`
//! frontmatter block are listed and fetched from a [`source`], split and
//! decoded by [`frontmatter`], collected into sorted [`collection`] entries
//! and rendered to HTML cards by [`markdown`] and [`renderer`].

pub mod collection;
pub mod config;
pub mod frontmatter;
pub mod generator;
pub mod markdown;
pub mod metadata;
pub mod renderer;
pub mod source;

pub use collection::{CollectionKind, Entry};
pub use frontmatter::ParsedDocument;
pub use metadata::{MetaValue, Metadata};
