//! Where content documents come from.
//!
//! A [`ContentSource`] knows how to list the markdown documents of a
//! collection and how to fetch the raw text of one of them. Parsing is the
//! caller's job, so every source feeds the same frontmatter pipeline.

use std::path::PathBuf;

use crate::collection::CollectionKind;

mod github;
mod manifest;

pub use github::GithubSource;
pub use manifest::ManifestSource;

/// Where a listed document can be fetched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    Path(PathBuf),
    Url(String),
}

/// A document as listed by a source, before its text is fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRef {
    /// File name, e.g. `hello-world.md`.
    pub name: String,
    pub location: Location,
}

pub trait ContentSource {
    /// Lists the documents of `kind`, in the order the source reports them.
    fn list(&self, kind: CollectionKind) -> anyhow::Result<Vec<DocumentRef>>;

    /// Fetches the raw text of a document previously returned by [`list`].
    ///
    /// [`list`]: ContentSource::list
    fn fetch(&self, doc: &DocumentRef) -> anyhow::Result<String>;
}
