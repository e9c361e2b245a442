use anyhow::{bail, Context};
use log::{debug, warn};
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::collection::CollectionKind;

use super::{ContentSource, DocumentRef, Location};

const API_BASE: &str = "https://api.github.com";

/// One item of the GitHub "repository contents" listing.
#[derive(Deserialize, Debug)]
struct ContentsItem {
    name: String,
    download_url: Option<String>,
}

/// Discovers documents through the GitHub contents API, so collections need
/// no manifest: every `.md` file in the collection directory is listed.
#[derive(Debug, Clone)]
pub struct GithubSource {
    repo: String,
    branch: String,
    client: Client,
}

impl GithubSource {
    /// `repo` is `owner/name`.
    pub fn new(repo: impl Into<String>, branch: impl Into<String>) -> anyhow::Result<Self> {
        // GitHub rejects API requests without a user agent
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("while building http client")?;

        Ok(Self {
            repo: repo.into(),
            branch: branch.into(),
            client,
        })
    }

    fn contents_url(&self, kind: CollectionKind) -> String {
        format!(
            "{API_BASE}/repos/{}/contents/{}?ref={}",
            self.repo,
            kind.dir(),
            self.branch
        )
    }
}

fn markdown_documents(items: Vec<ContentsItem>) -> Vec<DocumentRef> {
    items
        .into_iter()
        .filter(|item| item.name.ends_with(".md"))
        .filter_map(|item| match item.download_url {
            Some(url) => Some(DocumentRef {
                name: item.name,
                location: Location::Url(url),
            }),
            None => {
                warn!("{} has no download url. ignoring...", item.name);
                None
            }
        })
        .collect()
}

impl ContentSource for GithubSource {
    fn list(&self, kind: CollectionKind) -> anyhow::Result<Vec<DocumentRef>> {
        let url = self.contents_url(kind);
        debug!("Listing {url}...");
        let items: Vec<ContentsItem> = self
            .client
            .get(&url)
            .send()
            .and_then(|res| res.error_for_status())
            .with_context(|| format!("GitHub API error for {url}"))?
            .json()
            .with_context(|| format!("while decoding listing from {url}"))?;

        Ok(markdown_documents(items))
    }

    fn fetch(&self, doc: &DocumentRef) -> anyhow::Result<String> {
        let url = match &doc.location {
            Location::Url(url) => url,
            Location::Path(path) => bail!("{path:?} is not a remote document"),
        };
        debug!("Fetching {url}...");
        self.client
            .get(url)
            .send()
            .and_then(|res| res.error_for_status())
            .and_then(|res| res.text())
            .with_context(|| format!("Failed to fetch {url}"))
    }
}
