//! Scaffold a new post, project or project update

use anyhow::{Context, Result};
use serde_json::json;
use std::fs;
use std::path::PathBuf;

use crate::collections::{PostCollection, ProjectCollection};
use crate::Site;

/// Content kinds that can be scaffolded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Post,
    Project,
    Update,
}

impl std::str::FromStr for Kind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "post" => Ok(Kind::Post),
            "project" => Ok(Kind::Project),
            "update" => Ok(Kind::Update),
            _ => anyhow::bail!("Unknown kind: {}. Available: post, project, update", s),
        }
    }
}

/// Create `page.md` for a new draft and return its path
///
/// Updates need the slug of an existing project directory.
pub fn create(site: &Site, kind: Kind, title: &str, project: Option<&str>) -> Result<PathBuf> {
    let slug = slug::slugify(title);
    if slug.is_empty() {
        anyhow::bail!("Title {:?} does not produce a usable slug", title);
    }
    let today = chrono::Local::now().format("%Y-%m-%d").to_string();

    let (dir, front_matter) = match kind {
        Kind::Post => (
            site.content_dir.join(PostCollection::DIR).join(&slug),
            json!({
                "post": {
                    "title": title,
                    "description": "",
                    "author": site.config.author.name,
                    "date": today,
                    "draft": true,
                    "tags": [],
                }
            }),
        ),
        Kind::Project => (
            site.content_dir.join(ProjectCollection::DIR).join(&slug),
            json!({
                "project": {
                    "title": title,
                    "description": "",
                    "logo": "",
                    "link": { "href": "", "label": "" },
                    "date": today,
                    "draft": true,
                }
            }),
        ),
        Kind::Update => {
            let project =
                project.context("Updates need the project they belong to (--project)")?;
            let project_dir = site.content_dir.join(ProjectCollection::DIR).join(project);
            if !project_dir.join("page.md").exists() {
                anyhow::bail!("Project not found: {}", project);
            }
            (
                project_dir.join("updates").join(&slug),
                json!({
                    "update": {
                        "title": title,
                        "description": "",
                        "date": today,
                        "draft": true,
                    }
                }),
            )
        }
    };

    let file_path = dir.join("page.md");
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let content = format!("---\n{}---\n\n", serde_yaml::to_string(&front_matter)?);
    fs::create_dir_all(&dir)?;
    fs::write(&file_path, content)?;

    println!("Created: {:?}", file_path);
    Ok(file_path)
}
