//! Project and project update models

use serde::{Deserialize, Serialize};

use super::frontmatter::string_or_vec;
use super::loader::{ContentModule, Metadata};

/// A labelled outbound link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectLink {
    pub href: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// Metadata exported by a project's `page.md` under the `project` key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(alias = "name")]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub logo: String,
    pub link: ProjectLink,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_link: Option<ProjectLink>,
    #[serde(
        default,
        deserialize_with = "string_or_vec",
        skip_serializing_if = "Option::is_none"
    )]
    pub tech: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draft: Option<bool>,
    /// Explicit position; wins over date ordering
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    /// Launch or latest-update date
    pub date: String,
}

impl Metadata for Project {
    const EXPORT: &'static str = "project";

    fn date(&self) -> &str {
        &self.date
    }

    fn is_draft(&self) -> bool {
        self.draft.unwrap_or(false)
    }
}

/// A loaded project: slug plus metadata
pub type ProjectEntry = ContentModule<Project>;

/// Metadata exported by an update's `page.md` under the `update` key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectUpdate {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draft: Option<bool>,
}

impl Metadata for ProjectUpdate {
    const EXPORT: &'static str = "update";

    fn date(&self) -> &str {
        &self.date
    }

    fn is_draft(&self) -> bool {
        self.draft.unwrap_or(false)
    }
}

/// A loaded update with a lookup key back to its project
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectUpdateEntry {
    pub project_slug: String,
    #[serde(flatten)]
    pub module: ContentModule<ProjectUpdate>,
}

impl ProjectUpdateEntry {
    pub fn slug(&self) -> &str {
        &self.module.slug
    }

    pub fn meta(&self) -> &ProjectUpdate {
        &self.module.meta
    }
}
