use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{command, value_parser, Arg, ArgAction, ArgMatches, Command};

use crate::{
    collection::{CollectionKind, LoadOptions},
    source::{ContentSource, GithubSource, ManifestSource},
};

/// Environment variable consulted when `--repo` is not given.
pub const REPO_ENV: &str = "PORTFOLIO_REPO";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Local site directory with a `manifest.json` per collection.
    Manifest,
    /// GitHub contents API.
    Github,
    /// Legacy `<collection>.json` catalog in the site directory.
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Html,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub collection: CollectionKind,
    pub source: SourceKind,
    pub root: PathBuf,
    pub repo: Option<String>,
    pub branch: String,
    pub format: OutputFormat,
    pub category: String,
    pub load_options: LoadOptions,
    pub template: Option<PathBuf>,
    pub out: Option<PathBuf>,
}

pub fn cli() -> Command {
    command!().args(&[
        Arg::new("collection")
            .help("Collection to load")
            .required(true)
            .value_parser(["writings", "journal", "projects"]),
        Arg::new("source")
            .help("Where documents come from")
            .long("source")
            .value_parser(["manifest", "github", "json"])
            .default_value("manifest"),
        Arg::new("root")
            .help("Site directory (manifest and json sources)")
            .long("root")
            .value_parser(value_parser!(PathBuf))
            .default_value("."),
        Arg::new("repo")
            .help("GitHub repository as owner/name (github source). Falls back to PORTFOLIO_REPO.")
            .long("repo"),
        Arg::new("branch")
            .help("Branch to read from (github source)")
            .long("branch")
            .default_value("main"),
        Arg::new("format")
            .help("Output format")
            .long("format")
            .value_parser(["json", "html"])
            .default_value("json"),
        Arg::new("category")
            .help("Only keep entries of this category")
            .long("category")
            .default_value("all"),
        Arg::new("require_title")
            .help("Skip documents without a title")
            .long("require-title")
            .action(ArgAction::SetTrue),
        Arg::new("template")
            .help("Handlebars page template wrapping the html output")
            .long("template")
            .value_parser(value_parser!(PathBuf)),
        Arg::new("out")
            .help("Output file. Standard output when omitted.")
            .long("out")
            .short('o')
            .value_parser(value_parser!(PathBuf)),
    ])
}

impl Config {
    pub fn from_matches(matches: &ArgMatches) -> anyhow::Result<Self> {
        let collection: CollectionKind = matches
            .get_one::<String>("collection")
            .context("collection is required")?
            .parse()?;

        let source = match matches.get_one::<String>("source").map(String::as_str) {
            Some("github") => SourceKind::Github,
            Some("json") => SourceKind::Json,
            _ => SourceKind::Manifest,
        };
        let format = match matches.get_one::<String>("format").map(String::as_str) {
            Some("html") => OutputFormat::Html,
            _ => OutputFormat::Json,
        };

        let root: PathBuf = matches
            .get_one::<PathBuf>("root")
            .cloned()
            .unwrap_or_else(|| PathBuf::from("."));
        if source != SourceKind::Github && !root.is_dir() {
            bail!("root must be a directory.");
        }

        let repo = matches
            .get_one::<String>("repo")
            .cloned()
            .or_else(|| std::env::var(REPO_ENV).ok())
            .filter(|r| !r.is_empty());
        if source == SourceKind::Github && repo.is_none() {
            bail!("--repo (or {REPO_ENV}) is required for the github source.");
        }

        let template = matches.get_one::<PathBuf>("template").cloned();
        if let Some(template) = &template {
            if format != OutputFormat::Html {
                bail!("--template only applies to html output.");
            }
            if !template.is_file() {
                bail!("template must be a file.");
            }
        }

        Ok(Self {
            collection,
            source,
            root,
            repo,
            branch: matches
                .get_one::<String>("branch")
                .cloned()
                .unwrap_or_else(|| "main".to_string()),
            format,
            category: matches
                .get_one::<String>("category")
                .cloned()
                .unwrap_or_else(|| "all".to_string()),
            load_options: LoadOptions {
                require_title: matches.get_flag("require_title"),
            },
            template,
            out: matches.get_one::<PathBuf>("out").cloned(),
        })
    }

    /// The document source for markdown collections; `None` for the legacy
    /// JSON catalog, which is read directly.
    pub fn content_source(&self) -> anyhow::Result<Option<Box<dyn ContentSource>>> {
        let source: Box<dyn ContentSource> = match self.source {
            SourceKind::Manifest => Box::new(ManifestSource::new(&self.root)),
            SourceKind::Github => {
                let repo = self.repo.as_deref().context("repo is not set")?;
                Box::new(GithubSource::new(repo, &self.branch)?)
            }
            SourceKind::Json => return Ok(None),
        };
        Ok(Some(source))
    }
}
