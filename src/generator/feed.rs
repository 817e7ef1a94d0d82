//! RSS 2.0 feed
//!
//! Items are built from the post collection itself, rendering each body
//! with the same markdown renderer the pages use.

use chrono::{DateTime, Datelike, Utc};

use crate::config::SiteConfig;
use crate::content::{MarkdownRenderer, PostEntry};
use crate::error::{Error, Result};
use crate::helpers::{
    absolutize_urls, cdata, date_rfc2822, escape_xml, full_url_for, post_path,
    strip_invalid_xml_chars,
};
use crate::Site;

/// Cache policy of the feed response (one year at the edge)
pub const FEED_CACHE_CONTROL: &str = "s-maxage=31556952";

/// Channel-level metadata
#[derive(Debug, Clone)]
pub struct FeedChannel {
    pub title: String,
    pub description: String,
    pub author_name: String,
    pub author_email: String,
    /// Site URL without trailing slash; also the channel id
    pub link: String,
    pub image: String,
    pub favicon: String,
    pub copyright: String,
    pub feed_url: String,
    pub build_date: DateTime<Utc>,
}

impl FeedChannel {
    /// Channel for the configured site; fails without a site URL
    pub fn from_config(config: &SiteConfig, now: DateTime<Utc>) -> Result<Self> {
        let site_url = config.site_url()?;
        Ok(Self {
            title: config.author.name.clone(),
            description: config.description.clone(),
            author_name: config.author.name.clone(),
            author_email: config.author.email.clone(),
            link: site_url.to_string(),
            image: full_url_for(site_url, "favicon.ico"),
            favicon: full_url_for(site_url, "favicon.ico"),
            copyright: format!("All rights reserved {}", now.year()),
            feed_url: full_url_for(site_url, "feed.xml"),
            build_date: now,
        })
    }
}

/// One `<item>` of the feed
#[derive(Debug, Clone, PartialEq)]
pub struct FeedItem {
    pub title: String,
    pub link: String,
    pub date: DateTime<Utc>,
    pub description: String,
    pub author: String,
    pub content: String,
}

/// Build feed items for every non-draft post, in collection order
///
/// An item without a title or without rendered content fails the whole
/// feed rather than being skipped.
pub fn feed_items(
    posts: &[PostEntry],
    site_url: &str,
    renderer: &MarkdownRenderer,
) -> Result<Vec<FeedItem>> {
    posts
        .iter()
        .filter(|p| !p.is_draft())
        .map(|post| {
            let title = post.meta.title.trim();
            if title.is_empty() {
                return Err(Error::FeedContract {
                    slug: post.slug.clone(),
                    field: "title",
                });
            }

            let html = post.render(renderer);
            if html.trim().is_empty() {
                return Err(Error::FeedContract {
                    slug: post.slug.clone(),
                    field: "content",
                });
            }

            Ok(FeedItem {
                title: title.to_string(),
                link: full_url_for(site_url, &post_path(&post.slug)),
                date: post.published_at,
                description: post.meta.description.clone(),
                author: post.meta.author.clone(),
                content: strip_invalid_xml_chars(&absolutize_urls(&html, site_url)),
            })
        })
        .collect()
}

/// Serialize a complete RSS 2.0 document
pub fn render_rss(channel: &FeedChannel, items: &[FeedItem]) -> String {
    let mut feed = String::new();
    feed.push_str(r#"<?xml version="1.0" encoding="utf-8"?>"#);
    feed.push('\n');
    feed.push_str(
        r#"<rss version="2.0" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:content="http://purl.org/rss/1.0/modules/content/" xmlns:atom="http://www.w3.org/2005/Atom">"#,
    );
    feed.push('\n');
    feed.push_str("  <channel>\n");
    feed.push_str(&format!("    <title>{}</title>\n", escape_xml(&channel.title)));
    feed.push_str(&format!("    <link>{}</link>\n", escape_xml(&channel.link)));
    feed.push_str(&format!(
        "    <description>{}</description>\n",
        escape_xml(&channel.description)
    ));
    feed.push_str(&format!(
        "    <lastBuildDate>{}</lastBuildDate>\n",
        date_rfc2822(&channel.build_date)
    ));
    feed.push_str("    <docs>https://validator.w3.org/feed/docs/rss2.html</docs>\n");
    feed.push_str(&format!(
        "    <generator>folio-rs {}</generator>\n",
        env!("CARGO_PKG_VERSION")
    ));
    feed.push_str(&format!(
        "    <managingEditor>{} ({})</managingEditor>\n",
        escape_xml(&channel.author_email),
        escape_xml(&channel.author_name)
    ));
    feed.push_str("    <image>\n");
    feed.push_str(&format!("      <title>{}</title>\n", escape_xml(&channel.title)));
    feed.push_str(&format!("      <url>{}</url>\n", escape_xml(&channel.image)));
    feed.push_str(&format!("      <link>{}</link>\n", escape_xml(&channel.link)));
    feed.push_str("    </image>\n");
    feed.push_str(&format!(
        "    <copyright>{}</copyright>\n",
        escape_xml(&channel.copyright)
    ));
    feed.push_str(&format!(
        "    <atom:link href=\"{}\" rel=\"self\" type=\"application/rss+xml\"/>\n",
        escape_xml(&channel.feed_url)
    ));

    for item in items {
        feed.push_str("    <item>\n");
        feed.push_str(&format!("      <title>{}</title>\n", cdata(&item.title)));
        feed.push_str(&format!("      <link>{}</link>\n", escape_xml(&item.link)));
        feed.push_str(&format!(
            "      <guid isPermaLink=\"true\">{}</guid>\n",
            escape_xml(&item.link)
        ));
        feed.push_str(&format!(
            "      <pubDate>{}</pubDate>\n",
            date_rfc2822(&item.date)
        ));
        if !item.description.is_empty() {
            feed.push_str(&format!(
                "      <description>{}</description>\n",
                cdata(&item.description)
            ));
        }
        feed.push_str(&format!(
            "      <content:encoded>{}</content:encoded>\n",
            cdata(&item.content)
        ));
        feed.push_str(&format!("      <dc:creator>{}</dc:creator>\n", cdata(&item.author)));
        feed.push_str("    </item>\n");
    }

    feed.push_str("  </channel>\n");
    feed.push_str("</rss>\n");
    feed
}

/// Load the post collection and build the feed document
pub async fn build_feed(site: &Site, renderer: &MarkdownRenderer, now: DateTime<Utc>) -> Result<String> {
    // Fail on configuration before touching the file system
    let channel = FeedChannel::from_config(&site.config, now)?;
    let posts = site.posts().all(false).await?;
    let items = feed_items(&posts, &channel.link, renderer)?;
    Ok(render_rss(&channel, &items))
}
