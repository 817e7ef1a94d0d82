//! Project and project-update collections

use futures::future::try_join_all;
use std::cmp::Ordering;

use crate::content::loader::{NESTED_PATTERN, TOP_LEVEL_PATTERN};
use crate::content::{ContentLoader, ContentModule, ProjectEntry, ProjectUpdate, ProjectUpdateEntry};
use crate::error::{Error, Result};

use super::by_date_desc;

/// Projects under `<content>/projects/<slug>/page.md`, each with its
/// updates under `<slug>/updates/**/page.md`
#[derive(Debug, Clone)]
pub struct ProjectCollection {
    loader: ContentLoader,
}

impl ProjectCollection {
    /// Directory of the collection, relative to the content root
    pub const DIR: &'static str = "projects";

    pub fn new(loader: ContentLoader) -> Self {
        Self { loader }
    }

    /// All projects: explicit `order` first (ascending), then newest first
    pub async fn all(&self, include_drafts: bool) -> Result<Vec<ProjectEntry>> {
        let mut projects: Vec<ProjectEntry> =
            self.loader.load(Self::DIR, TOP_LEVEL_PATTERN).await?;

        if !include_drafts {
            projects.retain(|p| !p.is_draft());
        }
        projects.sort_by(by_order_then_date);

        Ok(projects)
    }

    /// Updates of one project, newest first
    pub async fn updates(
        &self,
        project_slug: &str,
        include_drafts: bool,
    ) -> Result<Vec<ProjectUpdateEntry>> {
        let dir = format!("{}/{}/updates", Self::DIR, project_slug);
        let modules: Vec<ContentModule<ProjectUpdate>> =
            self.loader.load(&dir, NESTED_PATTERN).await?;

        let mut updates: Vec<ProjectUpdateEntry> = modules
            .into_iter()
            .filter(|m| include_drafts || !m.is_draft())
            .map(|module| ProjectUpdateEntry {
                project_slug: project_slug.to_string(),
                module,
            })
            .collect();
        updates.sort_by(update_by_date_desc);

        Ok(updates)
    }

    /// Updates of every project, merged newest first
    ///
    /// Fans out one load per project, all in flight at once.
    pub async fn all_updates(&self, include_drafts: bool) -> Result<Vec<ProjectUpdateEntry>> {
        let projects = self.all(include_drafts).await?;

        let per_project = try_join_all(
            projects
                .iter()
                .map(|p| self.updates(&p.slug, include_drafts)),
        )
        .await?;

        let mut updates: Vec<ProjectUpdateEntry> = per_project.into_iter().flatten().collect();
        updates.sort_by(update_by_date_desc);

        Ok(updates)
    }

    /// A single published project by slug
    pub async fn find(&self, slug: &str) -> Result<ProjectEntry> {
        self.all(false)
            .await?
            .into_iter()
            .find(|p| p.slug == slug)
            .ok_or_else(|| Error::not_found("project", slug))
    }

    /// A single published update of a published project
    pub async fn find_update(
        &self,
        project_slug: &str,
        update_slug: &str,
    ) -> Result<ProjectUpdateEntry> {
        let project = self.find(project_slug).await?;
        self.updates(&project.slug, false)
            .await?
            .into_iter()
            .find(|u| u.slug() == update_slug)
            .ok_or_else(|| Error::not_found("update", format!("{}/{}", project_slug, update_slug)))
    }
}

fn by_order_then_date(a: &ProjectEntry, b: &ProjectEntry) -> Ordering {
    let by_order = match (a.meta.order, b.meta.order) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_order.then_with(|| by_date_desc(a, b))
}

fn update_by_date_desc(a: &ProjectUpdateEntry, b: &ProjectUpdateEntry) -> Ordering {
    by_date_desc(&a.module, &b.module).then_with(|| a.project_slug.cmp(&b.project_slug))
}
