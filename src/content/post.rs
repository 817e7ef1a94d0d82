//! Post model

use serde::{Deserialize, Serialize};

use super::frontmatter::string_or_vec;
use super::loader::{ContentModule, Metadata};

/// Where a guest post first appeared
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_appeared_on: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl GuestInfo {
    /// Both the source name and its URL are present
    pub fn is_well_formed(&self) -> bool {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        present(&self.first_appeared_on) && present(&self.url)
    }
}

/// Cover image with attribution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostCover {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit_url: Option<String>,
}

/// Metadata exported by a post's `page.md` under the `post` key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_avatar: Option<String>,
    pub date: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draft: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<PostCover>,
    #[serde(
        default,
        deserialize_with = "string_or_vec",
        skip_serializing_if = "Option::is_none"
    )]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest: Option<GuestInfo>,
}

impl Metadata for Post {
    const EXPORT: &'static str = "post";

    fn date(&self) -> &str {
        &self.date
    }

    fn is_draft(&self) -> bool {
        self.draft.unwrap_or(false)
    }
}

impl Post {
    pub fn tags(&self) -> &[String] {
        self.tags.as_deref().unwrap_or_default()
    }
}

/// A loaded post: slug plus metadata
pub type PostEntry = ContentModule<Post>;

/// A guest post carries a well-formed `guest` attribution
pub fn is_guest_post(post: &Post) -> bool {
    post.guest.as_ref().is_some_and(GuestInfo::is_well_formed)
}

/// Anything that is not a guest post is the site owner's own
pub fn is_own_post(post: &Post) -> bool {
    !is_guest_post(post)
}
