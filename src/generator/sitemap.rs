//! Sitemap entries and the `sitemap.xml` document

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::content::{PostEntry, ProjectEntry, ProjectUpdateEntry};
use crate::error::Result;
use crate::helpers::{
    date_w3c, escape_xml, full_url_for, post_path, project_path, project_update_path,
    project_updates_path,
};
use crate::Site;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFrequency {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Never => "never",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SitemapEntry {
    pub url: String,
    pub last_modified: DateTime<Utc>,
    pub change_frequency: ChangeFrequency,
    pub priority: f32,
}

/// Fixed site routes: path, change frequency, priority
const STATIC_ROUTES: &[(&str, ChangeFrequency, f32)] = &[
    ("", ChangeFrequency::Always, 1.0),
    ("/about", ChangeFrequency::Monthly, 0.9),
    ("/speaking", ChangeFrequency::Weekly, 0.8),
    ("/tech-stack", ChangeFrequency::Weekly, 0.8),
    ("/miami", ChangeFrequency::Monthly, 0.7),
    ("/posts", ChangeFrequency::Daily, 0.8),
    ("/projects", ChangeFrequency::Weekly, 0.8),
];

/// Build every sitemap entry
///
/// Order: fixed routes, posts, then each project followed by its updates
/// index and its updates. `updates` may hold updates of any project; only
/// those belonging to a listed project are emitted.
pub fn sitemap_entries(
    site_url: &str,
    now: DateTime<Utc>,
    posts: &[PostEntry],
    projects: &[ProjectEntry],
    updates: &[ProjectUpdateEntry],
) -> Vec<SitemapEntry> {
    let entry = |path: &str, last_modified, change_frequency, priority| SitemapEntry {
        url: full_url_for(site_url, path),
        last_modified,
        change_frequency,
        priority,
    };

    let mut entries: Vec<SitemapEntry> = STATIC_ROUTES
        .iter()
        .map(|&(path, freq, priority)| entry(path, now, freq, priority))
        .collect();

    entries.extend(posts.iter().map(|post| {
        entry(
            &post_path(&post.slug),
            post.published_at,
            ChangeFrequency::Monthly,
            0.65,
        )
    }));

    for project in projects {
        let own: Vec<&ProjectUpdateEntry> = updates
            .iter()
            .filter(|u| u.project_slug == project.slug)
            .collect();

        entries.push(entry(
            &project_path(&project.slug),
            project.published_at,
            ChangeFrequency::Monthly,
            0.7,
        ));

        let latest = own
            .iter()
            .map(|u| u.module.published_at)
            .max()
            .unwrap_or(project.published_at);
        entries.push(entry(
            &project_updates_path(&project.slug),
            latest,
            ChangeFrequency::Weekly,
            0.6,
        ));

        entries.extend(own.iter().map(|update| {
            entry(
                &project_update_path(&project.slug, update.slug()),
                update.module.published_at,
                ChangeFrequency::Monthly,
                0.5,
            )
        }));
    }

    entries
}

/// Serialize entries as a sitemaps.org `urlset`
pub fn render_sitemap_xml(entries: &[SitemapEntry]) -> String {
    let mut xml = String::new();
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n");
    for entry in entries {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.url)));
        xml.push_str(&format!(
            "    <lastmod>{}</lastmod>\n",
            date_w3c(&entry.last_modified)
        ));
        xml.push_str(&format!(
            "    <changefreq>{}</changefreq>\n",
            entry.change_frequency.as_str()
        ));
        xml.push_str(&format!("    <priority>{:.2}</priority>\n", entry.priority));
        xml.push_str("  </url>\n");
    }
    xml.push_str("</urlset>\n");
    xml
}

/// Load the published collections and build the sitemap entries
pub async fn build_sitemap(site: &Site, now: DateTime<Utc>) -> Result<Vec<SitemapEntry>> {
    let site_url = site.config.site_url()?;
    let posts = site.posts();
    let projects = site.projects();

    let (posts, project_list, updates) = tokio::try_join!(
        posts.all(false),
        projects.all(false),
        projects.all_updates(false)
    )?;

    Ok(sitemap_entries(site_url, now, &posts, &project_list, &updates))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::testing::{post, project, update};
    use crate::config::SiteConfig;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    async fn sitemap(dir: &TempDir) -> Vec<SitemapEntry> {
        let config = SiteConfig {
            url: Some("https://example.com/".to_string()),
            content_dir: ".".to_string(),
            ..Default::default()
        };
        build_sitemap(&Site::from_config(dir.path(), config), now())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_static_routes_only() {
        let dir = TempDir::new().unwrap();
        let entries = sitemap(&dir).await;

        let urls: Vec<_> = entries.iter().map(|e| e.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://example.com",
                "https://example.com/about",
                "https://example.com/speaking",
                "https://example.com/tech-stack",
                "https://example.com/miami",
                "https://example.com/posts",
                "https://example.com/projects",
            ]
        );
        assert!(entries.iter().all(|e| e.last_modified == now()));
        assert_eq!(entries[0].change_frequency, ChangeFrequency::Always);
        assert_eq!(entries[0].priority, 1.0);
    }

    #[tokio::test]
    async fn test_content_entries() {
        let dir = TempDir::new().unwrap();
        post(dir.path(), "hello", "2024-01-01", "");
        post(dir.path(), "draft", "2024-02-01", "  draft: true\n");
        project(dir.path(), "acme", "2023-05-01", "");
        project(dir.path(), "quiet", "2023-06-01", "");
        update(dir.path(), "acme", "launch", "2024-03-01", "");
        update(dir.path(), "acme", "beta", "2024-01-15", "");
        project(dir.path(), "stealth", "2024-04-01", "  draft: true\n");
        update(dir.path(), "stealth", "reveal", "2024-04-02", "");
        update(dir.path(), "acme", "wip", "2024-05-01", "  draft: true\n");

        let entries = sitemap(&dir).await;
        let dynamic: Vec<_> = entries[STATIC_ROUTES.len()..]
            .iter()
            .map(|e| (e.url.trim_start_matches("https://example.com"), e.priority))
            .collect();

        assert_eq!(
            dynamic,
            vec![
                ("/posts/hello", 0.65),
                ("/projects/quiet", 0.7),
                ("/projects/quiet/updates", 0.6),
                ("/projects/acme", 0.7),
                ("/projects/acme/updates", 0.6),
                ("/projects/acme/updates/launch", 0.5),
                ("/projects/acme/updates/beta", 0.5),
            ]
        );

        let find = |path: &str| {
            entries
                .iter()
                .find(|e| e.url == format!("https://example.com{}", path))
                .unwrap()
        };
        // Updates index follows the newest update, or the project itself
        assert_eq!(find("/projects/acme/updates").last_modified, day(2024, 3, 1));
        assert_eq!(find("/projects/quiet/updates").last_modified, day(2023, 6, 1));
        assert_eq!(find("/posts/hello").last_modified, day(2024, 1, 1));
        assert!(entries
            .iter()
            .all(|e| !e.url.contains("/posts/draft")
                && !e.url.contains("stealth")
                && !e.url.contains("wip")));

        let mut urls: Vec<_> = entries.iter().map(|e| e.url.as_str()).collect();
        urls.sort();
        urls.dedup();
        assert_eq!(urls.len(), entries.len());
    }

    #[tokio::test]
    async fn test_missing_site_url() {
        let dir = TempDir::new().unwrap();
        let site = Site::from_config(dir.path(), SiteConfig::default());
        let err = build_sitemap(&site, now()).await.unwrap_err();
        assert!(matches!(err, crate::Error::MissingConfig(_)));
    }

    #[test]
    fn test_render_xml() {
        let entries = vec![SitemapEntry {
            url: "https://example.com/posts/a&b".to_string(),
            last_modified: day(2024, 2, 1),
            change_frequency: ChangeFrequency::Monthly,
            priority: 0.65,
        }];
        let xml = render_sitemap_xml(&entries);
        assert!(xml.contains("<loc>https://example.com/posts/a&amp;b</loc>"));
        assert!(xml.contains("<lastmod>2024-02-01T00:00:00Z</lastmod>"));
        assert!(xml.contains("<changefreq>monthly</changefreq>"));
        assert!(xml.contains("<priority>0.65</priority>"));
    }

    #[test]
    fn test_entry_json_shape() {
        let entry = SitemapEntry {
            url: "https://example.com".to_string(),
            last_modified: day(2024, 2, 1),
            change_frequency: ChangeFrequency::Always,
            priority: 1.0,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["changeFrequency"], "always");
        assert!(json.get("lastModified").is_some());
    }
}
