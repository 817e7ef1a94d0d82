//! Posts listing filters (`?author=&tag=&year=&month=`)

use chrono::Datelike;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::content::PostEntry;
use crate::helpers::month_name;

/// Raw query string values as received by the posts listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostQueryParams {
    pub author: Option<String>,
    pub tag: Option<String>,
    pub year: Option<String>,
    pub month: Option<String>,
}

/// Parsed filters; `None` leaves a dimension unfiltered
///
/// A dimension given in the query stays active even when none of its
/// values parse, so `?month=13` matches no post.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostQuery {
    pub authors: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub years: Option<Vec<i32>>,
    pub months: Option<Vec<u32>>,
}

impl PostQuery {
    /// Parse comma-separated multi-value parameters
    ///
    /// Years and months that are not numbers are dropped; `3` and `03` are
    /// the same month.
    pub fn from_params(params: &PostQueryParams) -> Self {
        Self {
            authors: split_values(params.author.as_deref()),
            tags: split_values(params.tag.as_deref()),
            years: split_values(params.year.as_deref()).map(|values| {
                values.iter().filter_map(|y| y.parse().ok()).collect()
            }),
            months: split_values(params.month.as_deref()).map(|values| {
                values
                    .iter()
                    .filter_map(|m| m.parse().ok())
                    .filter(|m| (1..=12).contains(m))
                    .collect()
            }),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.authors.is_none() && self.tags.is_none() && self.years.is_none() && self.months.is_none()
    }

    /// A post matches when every active dimension has a matching value
    pub fn matches(&self, post: &PostEntry) -> bool {
        let date = post.published_at;
        dimension(&self.authors, |a| *a == post.meta.author)
            && dimension(&self.tags, |t| post.meta.tags().contains(t))
            && dimension(&self.years, |y| *y == date.year())
            && dimension(&self.months, |m| *m == date.month())
    }

    /// Keep the posts that match, preserving order
    pub fn apply(&self, posts: Vec<PostEntry>) -> Vec<PostEntry> {
        if self.is_empty() {
            return posts;
        }
        posts.into_iter().filter(|p| self.matches(p)).collect()
    }
}

/// Month choice for the filter UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthOption {
    pub label: String,
    pub value: String,
}

/// Values available to filter a list of posts by
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub authors: Vec<String>,
    pub tags: Vec<String>,
    pub years: Vec<String>,
    pub months: Vec<MonthOption>,
}

impl FilterOptions {
    /// Authors and tags sorted, years newest first, months in calendar order
    pub fn from_posts(posts: &[PostEntry]) -> Self {
        let mut authors: IndexSet<&str> = IndexSet::new();
        let mut tags: IndexSet<&str> = IndexSet::new();
        let mut years: IndexSet<i32> = IndexSet::new();
        let mut months: IndexSet<u32> = IndexSet::new();

        for post in posts {
            authors.insert(post.meta.author.as_str());
            for tag in post.meta.tags() {
                tags.insert(tag.as_str());
            }
            years.insert(post.published_at.year());
            months.insert(post.published_at.month());
        }

        authors.sort();
        tags.sort();
        years.sort_by(|a, b| b.cmp(a));
        months.sort();

        Self {
            authors: authors.into_iter().map(str::to_string).collect(),
            tags: tags.into_iter().map(str::to_string).collect(),
            years: years.into_iter().map(|y| y.to_string()).collect(),
            months: months
                .into_iter()
                .filter_map(|m| {
                    Some(MonthOption {
                        label: month_name(m)?.to_string(),
                        value: format!("{:02}", m),
                    })
                })
                .collect(),
        }
    }
}

fn dimension<T>(values: &Option<Vec<T>>, hit: impl Fn(&T) -> bool) -> bool {
    values.as_ref().map_or(true, |values| values.iter().any(hit))
}

/// `None` when the parameter is absent or holds only separators
fn split_values(raw: Option<&str>) -> Option<Vec<String>> {
    let values: Vec<String> = raw?
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect();
    (!values.is_empty()).then_some(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::testing::post;
    use crate::collections::PostCollection;
    use crate::content::ContentLoader;
    use tempfile::TempDir;

    fn params(author: &str, tag: &str, year: &str, month: &str) -> PostQueryParams {
        let opt = |s: &str| (!s.is_empty()).then(|| s.to_string());
        PostQueryParams {
            author: opt(author),
            tag: opt(tag),
            year: opt(year),
            month: opt(month),
        }
    }

    async fn fixture() -> (TempDir, Vec<PostEntry>) {
        let dir = TempDir::new().unwrap();
        post(dir.path(), "rust-2023", "2023-03-10", "  tags: [rust, systems]\n");
        post(dir.path(), "web-2024", "2024-03-05", "  tags: [web]\n");
        post(
            dir.path(),
            "guest-2024",
            "2024-07-01",
            "  tags: rust\n  author: Ada\n",
        );
        let posts = PostCollection::new(ContentLoader::new(dir.path()))
            .all(false)
            .await
            .unwrap();
        (dir, posts)
    }

    fn slugs(posts: &[PostEntry]) -> Vec<&str> {
        posts.iter().map(|p| p.slug.as_str()).collect()
    }

    #[test]
    fn test_parse_comma_separated() {
        let q = PostQuery::from_params(&params("Ada, Sergio Leon", "rust,,web", "2024,x", "3,03,13"));
        assert_eq!(q.authors.unwrap(), vec!["Ada", "Sergio Leon"]);
        assert_eq!(q.tags.unwrap(), vec!["rust", "web"]);
        assert_eq!(q.years.unwrap(), vec![2024]);
        assert_eq!(q.months.unwrap(), vec![3, 3]);
        assert!(PostQuery::from_params(&PostQueryParams::default()).is_empty());
        assert!(PostQuery::from_params(&params("", " , ", "", "")).is_empty());
    }

    #[tokio::test]
    async fn test_unparseable_values_match_nothing() {
        let (_dir, posts) = fixture().await;

        let q = PostQuery::from_params(&params("", "", "", "13"));
        assert_eq!(q.months, Some(vec![]));
        assert!(q.apply(posts.clone()).is_empty());

        let q = PostQuery::from_params(&params("", "", "abc", ""));
        assert!(q.apply(posts.clone()).is_empty());

        // One good value is enough to keep matching
        let q = PostQuery::from_params(&params("", "", "abc,2023", ""));
        assert_eq!(slugs(&q.apply(posts)), vec!["rust-2023"]);
    }

    #[tokio::test]
    async fn test_absent_params_do_not_filter() {
        let (_dir, posts) = fixture().await;
        let q = PostQuery::from_params(&params("", "", "", ""));
        assert_eq!(q.apply(posts).len(), 3);
    }

    #[tokio::test]
    async fn test_and_across_or_within() {
        let (_dir, posts) = fixture().await;

        let q = PostQuery::from_params(&params("", "rust", "", ""));
        assert_eq!(slugs(&q.apply(posts.clone())), vec!["guest-2024", "rust-2023"]);

        let q = PostQuery::from_params(&params("", "rust,web", "2024", ""));
        assert_eq!(slugs(&q.apply(posts.clone())), vec!["guest-2024", "web-2024"]);

        let q = PostQuery::from_params(&params("Sergio Leon", "", "", "03"));
        assert_eq!(slugs(&q.apply(posts.clone())), vec!["web-2024", "rust-2023"]);

        let q = PostQuery::from_params(&params("Ada", "web", "", ""));
        assert!(q.apply(posts).is_empty());
    }

    #[tokio::test]
    async fn test_filter_options() {
        let (_dir, posts) = fixture().await;
        let options = FilterOptions::from_posts(&posts);

        assert_eq!(options.authors, vec!["Ada", "Sergio Leon"]);
        assert_eq!(options.tags, vec!["rust", "systems", "web"]);
        assert_eq!(options.years, vec!["2024", "2023"]);
        assert_eq!(
            options.months,
            vec![
                MonthOption {
                    label: "March".to_string(),
                    value: "03".to_string()
                },
                MonthOption {
                    label: "July".to_string(),
                    value: "07".to_string()
                },
            ]
        );
    }
}
