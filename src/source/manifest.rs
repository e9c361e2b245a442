use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context};
use log::debug;
use serde::Deserialize;

use crate::collection::CollectionKind;

use super::{ContentSource, DocumentRef, Location};

#[derive(Deserialize, Debug)]
struct Manifest {
    files: Vec<String>,
}

/// Reads collections from a site directory, where each collection directory
/// carries a `manifest.json` naming its documents.
#[derive(Debug, Clone)]
pub struct ManifestSource {
    root: PathBuf,
}

impl ManifestSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn collection_dir(&self, kind: CollectionKind) -> PathBuf {
        self.root.join(kind.dir())
    }
}

fn load_manifest(manifest_path: &Path) -> anyhow::Result<Manifest> {
    let fd = File::open(manifest_path)
        .with_context(|| format!("while opening {manifest_path:?}"))?;
    let reader = BufReader::new(fd);
    serde_json::from_reader(reader).with_context(|| format!("while reading {manifest_path:?}"))
}

impl ContentSource for ManifestSource {
    fn list(&self, kind: CollectionKind) -> anyhow::Result<Vec<DocumentRef>> {
        let dir = self.collection_dir(kind);
        let manifest = load_manifest(&dir.join("manifest.json"))?;
        debug!("{} files listed in {dir:?}", manifest.files.len());

        Ok(manifest
            .files
            .into_iter()
            .map(|name| DocumentRef {
                location: Location::Path(dir.join(&name)),
                name,
            })
            .collect())
    }

    fn fetch(&self, doc: &DocumentRef) -> anyhow::Result<String> {
        match &doc.location {
            Location::Path(path) => std::fs::read_to_string(path)
                .with_context(|| format!("while reading {path:?}")),
            Location::Url(url) => bail!("{url} is not a local document"),
        }
    }
}
