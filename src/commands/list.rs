//! List site content

use anyhow::Result;
use indexmap::IndexMap;

use crate::content::is_guest_post;
use crate::helpers::format_date;
use crate::Site;

/// Print the collection named by `content_type`
pub async fn run(site: &Site, content_type: &str, include_drafts: bool) -> Result<()> {
    match content_type {
        "post" | "posts" => {
            let posts = site.posts().all(include_drafts).await?;
            println!("Posts ({}):", posts.len());
            for post in posts {
                let marker = if is_guest_post(&post.meta) {
                    " (guest)"
                } else if post.is_draft() {
                    " (draft)"
                } else {
                    ""
                };
                println!(
                    "  {} - {}{} [{}]",
                    post.published_at.format("%Y-%m-%d"),
                    post.meta.title,
                    marker,
                    post.slug
                );
            }
        }
        "guest" | "guests" => {
            let posts = site.posts().all(false).await?;
            let guests: Vec<_> = posts.iter().filter(|p| is_guest_post(&p.meta)).collect();
            println!("Guest posts ({}):", guests.len());
            for post in guests {
                let first = post
                    .meta
                    .guest
                    .as_ref()
                    .and_then(|g| g.first_appeared_on.as_deref())
                    .unwrap_or_default();
                println!(
                    "  {} - {} by {} (first on {})",
                    format_date(&post.meta.date),
                    post.meta.title,
                    post.meta.author,
                    first
                );
            }
        }
        "project" | "projects" => {
            let projects = site.projects().all(include_drafts).await?;
            println!("Projects ({}):", projects.len());
            for project in projects {
                let order = project
                    .meta
                    .order
                    .map(|o| format!("#{} ", o))
                    .unwrap_or_default();
                println!("  {}{} [{}]", order, project.meta.title, project.slug);
            }
        }
        "update" | "updates" => {
            let updates = site.projects().all_updates(include_drafts).await?;
            println!("Updates ({}):", updates.len());
            for update in updates {
                println!(
                    "  {} - {} [{}/{}]",
                    update.module.published_at.format("%Y-%m-%d"),
                    update.meta().title,
                    update.project_slug,
                    update.slug()
                );
            }
        }
        "tag" | "tags" => {
            let posts = site.posts().all(include_drafts).await?;
            let mut tags: IndexMap<&str, usize> = IndexMap::new();
            for post in &posts {
                for tag in post.meta.tags() {
                    *tags.entry(tag.as_str()).or_insert(0) += 1;
                }
            }
            println!("Tags ({}):", tags.len());
            tags.sort_by(|ka, a, kb, b| b.cmp(a).then_with(|| ka.cmp(kb)));
            for (tag, count) in tags {
                println!("  {} ({})", tag, count);
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, guest, project, update, tag",
                content_type
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::testing::{post, project};
    use crate::config::SiteConfig;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_list_types() {
        let dir = TempDir::new().unwrap();
        let site = Site::from_config(dir.path(), SiteConfig::default());
        post(&site.content_dir, "hello", "2024-01-01", "  tags: [rust]\n");
        project(&site.content_dir, "acme", "2024-01-01", "  order: 1\n");

        for kind in ["post", "guest", "projects", "updates", "tags"] {
            run(&site, kind, false).await.unwrap();
        }
        assert!(run(&site, "category", false).await.is_err());
    }
}
