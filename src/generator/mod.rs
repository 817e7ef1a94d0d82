//! Static artifact generator
//!
//! Writes the RSS feed, the sitemap and JSON snapshots of the collections
//! into the public directory.

pub mod feed;
pub mod sitemap;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::collections::FilterOptions;
use crate::content::{MarkdownRenderer, PostEntry};
use crate::Site;

pub use feed::{build_feed, feed_items, render_rss, FeedChannel, FeedItem, FEED_CACHE_CONTROL};
pub use sitemap::{
    build_sitemap, render_sitemap_xml, sitemap_entries, ChangeFrequency, SitemapEntry,
};

/// Content type of both XML documents
pub const XML_CONTENT_TYPE: &str = "application/xml";

/// Posts listing as served by the API and written to `posts.json`
#[derive(Debug, Serialize)]
pub struct PostListing<'a> {
    pub posts: &'a [PostEntry],
    pub filters: FilterOptions,
}

impl<'a> PostListing<'a> {
    pub fn new(posts: &'a [PostEntry]) -> Self {
        Self {
            posts,
            filters: FilterOptions::from_posts(posts),
        }
    }
}

/// Files written by one generation run
#[derive(Debug, Default)]
pub struct GenerateReport {
    pub written: Vec<PathBuf>,
    pub posts: usize,
    pub projects: usize,
    pub updates: usize,
}

/// Artifact generator
pub struct Generator {
    site: Site,
    renderer: MarkdownRenderer,
}

impl Generator {
    pub fn new(site: &Site) -> Self {
        Self {
            site: site.clone(),
            renderer: site.renderer(),
        }
    }

    /// Generate every artifact with the current time as build time
    pub async fn generate(&self) -> Result<GenerateReport> {
        self.generate_at(Utc::now()).await
    }

    /// Generate every artifact
    pub async fn generate_at(&self, now: DateTime<Utc>) -> Result<GenerateReport> {
        let site_url = self.site.config.site_url()?;

        let posts = self.site.posts();
        let projects = self.site.projects();
        let (posts, project_list, updates) = tokio::try_join!(
            posts.all(false),
            projects.all(false),
            projects.all_updates(false)
        )?;
        tracing::info!(
            "Loaded {} posts, {} projects and {} updates",
            posts.len(),
            project_list.len(),
            updates.len()
        );

        tokio::fs::create_dir_all(&self.site.public_dir)
            .await
            .with_context(|| format!("Failed to create {:?}", self.site.public_dir))?;

        let mut report = GenerateReport {
            posts: posts.len(),
            projects: project_list.len(),
            updates: updates.len(),
            ..Default::default()
        };

        let channel = FeedChannel::from_config(&self.site.config, now)?;
        let items = feed_items(&posts, site_url, &self.renderer)?;
        report
            .written
            .push(self.write("feed.xml", render_rss(&channel, &items)).await?);

        let entries = sitemap_entries(site_url, now, &posts, &project_list, &updates);
        report
            .written
            .push(self.write("sitemap.xml", render_sitemap_xml(&entries)).await?);

        report.written.push(
            self.write_json("posts.json", &PostListing::new(&posts))
                .await?,
        );
        report
            .written
            .push(self.write_json("projects.json", &project_list).await?);
        report
            .written
            .push(self.write_json("updates.json", &updates).await?);

        Ok(report)
    }

    async fn write(&self, name: &str, content: String) -> Result<PathBuf> {
        let path = self.site.public_dir.join(name);
        tokio::fs::write(&path, content)
            .await
            .with_context(|| format!("Failed to write {:?}", path))?;
        tracing::info!("Generated {}", name);
        Ok(path)
    }

    async fn write_json<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> Result<PathBuf> {
        let json = serde_json::to_string_pretty(value)?;
        self.write(name, json).await
    }

    pub fn public_dir(&self) -> &Path {
        &self.site.public_dir
    }
}
