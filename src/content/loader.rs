//! Content loader - resolves `page.md` modules under a directory
//!
//! Every content item lives in its own directory with a `page.md` file. The
//! directory path (relative to the collection root) is the item's slug; the
//! file's front-matter carries the collection's metadata block and the rest
//! is the renderable markdown body.

use chrono::{DateTime, Utc};
use futures::future::try_join_all;
use lazy_static::lazy_static;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Component, Path, PathBuf};

use super::{FrontMatter, MarkdownRenderer};
use crate::error::{Error, Result};
use crate::helpers::parse_content_date;

lazy_static! {
    static ref PAGE_FILE: Regex = Regex::new(r"(?:^|/)page\.md$").unwrap();
}

/// Pattern for collections with one directory level (`posts/<slug>`)
pub const TOP_LEVEL_PATTERN: &str = "*/page.md";

/// Pattern for nested collections (`updates/<a>/<b>`)
pub const NESTED_PATTERN: &str = "**/page.md";

/// Metadata exported by a content file for one collection kind
pub trait Metadata: DeserializeOwned + Send + 'static {
    /// Front-matter key holding the metadata block
    const EXPORT: &'static str;

    /// Raw ISO-8601 date as written in the source
    fn date(&self) -> &str;

    fn is_draft(&self) -> bool;
}

/// A loaded content item
#[derive(Debug, Clone, Serialize)]
pub struct ContentModule<M> {
    pub slug: String,
    #[serde(flatten)]
    pub meta: M,
    /// `meta.date()` parsed once at load time
    #[serde(skip)]
    pub published_at: DateTime<Utc>,
    /// Markdown body
    #[serde(skip)]
    pub body: String,
    #[serde(skip)]
    pub source: PathBuf,
}

impl<M: Metadata> ContentModule<M> {
    pub fn is_draft(&self) -> bool {
        self.meta.is_draft()
    }

    /// Render the body to HTML
    pub fn render(&self, renderer: &MarkdownRenderer) -> String {
        renderer.render(&self.body)
    }
}

/// Loads content modules from a content root
#[derive(Debug, Clone)]
pub struct ContentLoader {
    root: PathBuf,
}

impl ContentLoader {
    /// Create a new content loader
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load every module matching `pattern` under `dir` (relative to the root)
    ///
    /// All matches are loaded concurrently; the result is in path order and
    /// callers impose their own sort. A missing directory yields no modules.
    pub async fn load<M: Metadata>(
        &self,
        dir: impl AsRef<Path>,
        pattern: &str,
    ) -> Result<Vec<ContentModule<M>>> {
        let base = self.root.join(dir);
        let mut files = resolve(&base, pattern).await?;
        // A `page.md` directly under `base` is the collection's own index page
        files.retain(|relative| !slug_from_path(relative).is_empty());

        let modules = try_join_all(
            files
                .iter()
                .map(|relative| load_module::<M>(&base, relative)),
        )
        .await?;

        tracing::debug!(
            "Loaded {} `{}` modules from {:?}",
            modules.len(),
            M::EXPORT,
            base
        );

        Ok(modules)
    }
}

/// Resolve `pattern` under `base` to `/`-separated relative paths, sorted
pub async fn resolve(base: &Path, pattern: &str) -> Result<Vec<String>> {
    if !base.is_dir() {
        return Ok(Vec::new());
    }

    let full = format!(
        "{}/{}",
        glob::Pattern::escape(&base.to_string_lossy()),
        pattern
    );
    // Validate up front so a bad pattern is a PatternError, not a panic in the task
    glob::Pattern::new(&full)?;

    let base = base.to_path_buf();
    let mut files = tokio::task::spawn_blocking(move || -> Result<Vec<String>> {
        let mut files = Vec::new();
        for entry in glob::glob(&full)? {
            let entry = entry.map_err(|e| Error::Io(e.into_error()))?;
            if !entry.is_file() {
                continue;
            }
            if let Ok(relative) = entry.strip_prefix(&base) {
                files.push(to_slash_path(relative));
            }
        }
        Ok(files)
    })
    .await??;

    files.sort();
    Ok(files)
}

/// Derive a slug from a relative module path (`a/b/page.md` -> `a/b`)
pub fn slug_from_path(relative: &str) -> String {
    PAGE_FILE.replace(relative, "").into_owned()
}

/// Load a single module
async fn load_module<M: Metadata>(base: &Path, relative: &str) -> Result<ContentModule<M>> {
    let path = base.join(relative);
    let content = tokio::fs::read_to_string(&path).await?;
    let (fm, body) = FrontMatter::parse(&content, &path)?;
    let meta: M = fm.extract(M::EXPORT, &path)?;

    let published_at = parse_content_date(meta.date()).ok_or_else(|| Error::InvalidDate {
        path: path.clone(),
        value: meta.date().to_string(),
    })?;

    let slug = slug_from_path(relative);
    tracing::debug!("Loaded {} `{}` from {:?}", M::EXPORT, slug, path);

    Ok(ContentModule {
        slug,
        meta,
        published_at,
        body: body.to_string(),
        source: path,
    })
}

fn to_slash_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
