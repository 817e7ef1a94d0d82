//! Post collection

use crate::content::loader::TOP_LEVEL_PATTERN;
use crate::content::{is_guest_post, is_own_post, ContentLoader, PostEntry};
use crate::error::{Error, Result};

use super::by_date_desc;

/// Default size of the "recent posts" list
pub const DEFAULT_RECENT_COUNT: usize = 5;

/// Default size of the "recent guest posts" list
pub const DEFAULT_GUEST_COUNT: usize = 2;

/// Posts under `<content>/posts/<slug>/page.md`
#[derive(Debug, Clone)]
pub struct PostCollection {
    loader: ContentLoader,
}

impl PostCollection {
    /// Directory of the collection, relative to the content root
    pub const DIR: &'static str = "posts";

    pub fn new(loader: ContentLoader) -> Self {
        Self { loader }
    }

    /// All posts, newest first, optionally including drafts
    pub async fn all(&self, include_drafts: bool) -> Result<Vec<PostEntry>> {
        let mut posts: Vec<PostEntry> = self.loader.load(Self::DIR, TOP_LEVEL_PATTERN).await?;

        if !include_drafts {
            posts.retain(|p| !p.is_draft());
        }
        posts.sort_by(by_date_desc);

        Ok(posts)
    }

    /// The most recent posts by the site owner
    pub async fn recent(&self, count: usize, include_drafts: bool) -> Result<Vec<PostEntry>> {
        check_count(count)?;

        let posts = self.all(include_drafts).await?;
        Ok(posts
            .into_iter()
            .filter(|p| is_own_post(&p.meta))
            .take(count)
            .collect())
    }

    /// The most recent guest posts; drafts are never included
    pub async fn recent_guest(&self, count: usize) -> Result<Vec<PostEntry>> {
        check_count(count)?;

        let posts = self.all(false).await?;
        Ok(posts
            .into_iter()
            .filter(|p| is_guest_post(&p.meta))
            .take(count)
            .collect())
    }

    /// A single post by slug
    pub async fn find(&self, slug: &str, include_drafts: bool) -> Result<PostEntry> {
        self.all(include_drafts)
            .await?
            .into_iter()
            .find(|p| p.slug == slug)
            .ok_or_else(|| Error::not_found("post", slug))
    }
}

fn check_count(count: usize) -> Result<()> {
    if count < 1 {
        return Err(Error::InvalidArgument(
            "count must be greater than 0".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::testing::{post, write};
    use tempfile::TempDir;

    const GUEST: &str = "  guest:\n    firstAppearedOn: Dev.to\n    url: https://dev.to/post\n";
    const DRAFT: &str = "  draft: true\n";

    fn collection(dir: &TempDir) -> PostCollection {
        PostCollection::new(ContentLoader::new(dir.path()))
    }

    fn titles(posts: &[PostEntry]) -> Vec<&str> {
        posts.iter().map(|p| p.meta.title.as_str()).collect()
    }

    #[tokio::test]
    async fn test_drafts_excluded_and_sorted_newest_first() {
        let dir = TempDir::new().unwrap();
        post(dir.path(), "2024-01-01", "2024-01-01", "");
        post(dir.path(), "2024-03-01", "2024-03-01", DRAFT);
        post(dir.path(), "2024-02-01", "2024-02-01", "");

        let posts = collection(&dir).all(false).await.unwrap();
        assert_eq!(titles(&posts), vec!["2024-02-01 item", "2024-01-01 item"]);

        let with_drafts = collection(&dir).all(true).await.unwrap();
        assert_eq!(
            titles(&with_drafts),
            vec!["2024-03-01 item", "2024-02-01 item", "2024-01-01 item"]
        );
    }

    #[tokio::test]
    async fn test_result_is_descending_by_date() {
        let dir = TempDir::new().unwrap();
        for (slug, date) in [
            ("a", "2023-06-15"),
            ("b", "2024-11-02T08:00:00Z"),
            ("c", "2021-01-01"),
            ("d", "2024-11-02"),
            ("e", "2022-09-30"),
        ] {
            post(dir.path(), slug, date, "");
        }

        let posts = collection(&dir).all(false).await.unwrap();
        assert_eq!(posts.len(), 5);
        for pair in posts.windows(2) {
            assert!(pair[0].published_at >= pair[1].published_at);
        }
        assert_eq!(posts[0].slug, "b");
    }

    #[tokio::test]
    async fn test_equal_dates_break_on_slug() {
        let dir = TempDir::new().unwrap();
        post(dir.path(), "zeta", "2024-01-01", "");
        post(dir.path(), "alpha", "2024-01-01", "");

        let posts = collection(&dir).all(false).await.unwrap();
        let slugs: Vec<_> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["alpha", "zeta"]);
    }

    #[tokio::test]
    async fn test_recent_splits_own_and_guest() {
        let dir = TempDir::new().unwrap();
        post(dir.path(), "own-1", "2024-01-01", "");
        post(dir.path(), "own-2", "2024-02-01", "");
        post(dir.path(), "own-3", "2024-03-01", "");
        post(dir.path(), "guest-1", "2024-04-01", GUEST);
        post(dir.path(), "guest-2", "2024-05-01", GUEST);
        post(
            dir.path(),
            "guest-draft",
            "2024-06-01",
            &format!("{}{}", GUEST, DRAFT),
        );
        // Half-filled attribution is not a guest post
        post(
            dir.path(),
            "own-4",
            "2024-07-01",
            "  guest:\n    firstAppearedOn: Somewhere\n",
        );

        let c = collection(&dir);

        let recent = c.recent(2, false).await.unwrap();
        let slugs: Vec<_> = recent.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["own-4", "own-3"]);

        let all_own = c.recent(DEFAULT_RECENT_COUNT, false).await.unwrap();
        assert_eq!(all_own.len(), 4);

        let guests = c.recent_guest(DEFAULT_GUEST_COUNT).await.unwrap();
        let slugs: Vec<_> = guests.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["guest-2", "guest-1"]);
    }

    #[tokio::test]
    async fn test_zero_count_rejected_before_io() {
        // A broken post would fail the load if the file system were touched
        let dir = TempDir::new().unwrap();
        write(dir.path(), "posts/broken/page.md", "no front-matter");

        let c = collection(&dir);
        assert!(matches!(
            c.recent(0, false).await,
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            c.recent_guest(0).await,
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            c.all(false).await,
            Err(Error::MissingMetadata { .. })
        ));
    }

    #[tokio::test]
    async fn test_find() {
        let dir = TempDir::new().unwrap();
        post(dir.path(), "hello", "2024-01-01", "");
        post(dir.path(), "secret", "2024-01-02", DRAFT);

        let c = collection(&dir);
        assert_eq!(c.find("hello", false).await.unwrap().slug, "hello");
        assert!(c.find("secret", false).await.unwrap_err().is_not_found());
        assert_eq!(c.find("secret", true).await.unwrap().slug, "secret");
        assert!(c.find("nope", true).await.unwrap_err().is_not_found());
    }
}
