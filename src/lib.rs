//! folio-rs: content engine for a personal portfolio and blog
//!
//! Discovers posts, projects and project updates from a directory of
//! `page.md` files, exposes them as sorted collections, and builds the RSS
//! feed and sitemap from them. The same data is served over a small JSON
//! API for the site front-end.

pub mod collections;
pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod generator;
pub mod helpers;
pub mod server;

pub use error::{Error, Result};

use std::path::{Path, PathBuf};

use collections::{PostCollection, ProjectCollection};
use content::{ContentLoader, MarkdownRenderer};

/// A site rooted at a directory
#[derive(Debug, Clone)]
pub struct Site {
    /// Site configuration, with environment overrides applied
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Content root (`posts/`, `projects/`)
    pub content_dir: PathBuf,
    /// Output directory for generated artifacts
    pub public_dir: PathBuf,
}

impl Site {
    /// Open the site in `base_dir`, reading `_config.yml` when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> anyhow::Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let mut config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };
        config.apply_env();

        Ok(Self::from_config(base_dir, config))
    }

    /// Build a site from an already resolved configuration
    pub fn from_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let content_dir = base_dir.join(&config.content_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Self {
            config,
            base_dir,
            content_dir,
            public_dir,
        }
    }

    pub fn loader(&self) -> ContentLoader {
        ContentLoader::new(&self.content_dir)
    }

    pub fn posts(&self) -> PostCollection {
        PostCollection::new(self.loader())
    }

    pub fn projects(&self) -> ProjectCollection {
        ProjectCollection::new(self.loader())
    }

    /// Markdown renderer configured for this site
    pub fn renderer(&self) -> MarkdownRenderer {
        MarkdownRenderer::from_config(&self.config.highlight)
    }
}
