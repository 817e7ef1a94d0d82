//! Route handlers

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

use super::AppState;
use crate::collections::{
    FilterOptions, PostQuery, PostQueryParams, DEFAULT_GUEST_COUNT, DEFAULT_RECENT_COUNT,
};
use crate::config::IntegrationStatus;
use crate::content::{PostEntry, ProjectEntry, ProjectUpdateEntry};
use crate::generator::{
    build_feed, build_sitemap, render_sitemap_xml, PostListing, FEED_CACHE_CONTROL,
    XML_CONTENT_TYPE,
};
use crate::helpers::{project_updates_path, NavigationHistory};
use crate::Error;

/// Library error rendered as an HTTP response
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::NotFound { .. } => StatusCode::NOT_FOUND,
            Error::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self.0);
        }
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub author: Option<String>,
    pub tag: Option<String>,
    pub year: Option<String>,
    pub month: Option<String>,
    #[serde(default)]
    pub drafts: bool,
}

#[derive(Debug, Deserialize)]
pub struct CountQuery {
    pub count: Option<usize>,
}

#[derive(Serialize)]
struct PostDetail<'a> {
    #[serde(flatten)]
    post: &'a PostEntry,
    html: String,
    back: String,
}

#[derive(Serialize)]
struct ProjectDetail<'a> {
    #[serde(flatten)]
    project: &'a ProjectEntry,
    html: String,
    updates: &'a [ProjectUpdateEntry],
    back: String,
}

#[derive(Serialize)]
struct UpdateDetail<'a> {
    #[serde(flatten)]
    update: &'a ProjectUpdateEntry,
    html: String,
    back: String,
}

fn back_link(state: &AppState, headers: &HeaderMap, fallback: &str) -> String {
    let referer = headers
        .get(header::REFERER)
        .and_then(|value| value.to_str().ok());
    NavigationHistory::from_referer(referer, state.site.config.site_url().ok()).back_href(fallback)
}

pub async fn feed(State(state): State<Arc<AppState>>) -> ApiResult<Response> {
    let xml = build_feed(&state.site, &state.renderer, Utc::now()).await?;
    Ok((
        [
            (header::CONTENT_TYPE, XML_CONTENT_TYPE),
            (header::CACHE_CONTROL, FEED_CACHE_CONTROL),
        ],
        xml,
    )
        .into_response())
}

pub async fn sitemap(State(state): State<Arc<AppState>>) -> ApiResult<Response> {
    let entries = build_sitemap(&state.site, Utc::now()).await?;
    Ok((
        [(header::CONTENT_TYPE, XML_CONTENT_TYPE)],
        render_sitemap_xml(&entries),
    )
        .into_response())
}

/// Posts listing with filter options computed over the unfiltered list
pub async fn list_posts(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Response> {
    let include_drafts = state.serve_drafts && query.drafts;
    let posts = state.site.posts().all(include_drafts).await?;
    let filters = FilterOptions::from_posts(&posts);

    let filter = PostQuery::from_params(&PostQueryParams {
        author: query.author,
        tag: query.tag,
        year: query.year,
        month: query.month,
    });
    let posts = filter.apply(posts);

    Ok(Json(PostListing {
        posts: &posts,
        filters,
    })
    .into_response())
}

pub async fn recent_posts(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CountQuery>,
) -> ApiResult<Json<Vec<PostEntry>>> {
    let count = query.count.unwrap_or(DEFAULT_RECENT_COUNT);
    Ok(Json(state.site.posts().recent(count, false).await?))
}

pub async fn guest_posts(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CountQuery>,
) -> ApiResult<Json<Vec<PostEntry>>> {
    let count = query.count.unwrap_or(DEFAULT_GUEST_COUNT);
    Ok(Json(state.site.posts().recent_guest(count).await?))
}

pub async fn show_post(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    headers: HeaderMap,
) -> ApiResult<Response> {
    let post = state.site.posts().find(&slug, false).await?;
    let detail = PostDetail {
        post: &post,
        html: post.render(&state.renderer),
        back: back_link(&state, &headers, "/posts"),
    };
    Ok(Json(detail).into_response())
}

pub async fn list_projects(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<ProjectEntry>>> {
    Ok(Json(state.site.projects().all(false).await?))
}

pub async fn show_project(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    headers: HeaderMap,
) -> ApiResult<Response> {
    let projects = state.site.projects();
    let project = projects.find(&slug).await?;
    let updates = projects.updates(&project.slug, false).await?;

    let detail = ProjectDetail {
        project: &project,
        html: project.render(&state.renderer),
        updates: &updates,
        back: back_link(&state, &headers, "/projects"),
    };
    Ok(Json(detail).into_response())
}

pub async fn project_updates(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> ApiResult<Json<Vec<ProjectUpdateEntry>>> {
    let projects = state.site.projects();
    let project = projects.find(&slug).await?;
    Ok(Json(projects.updates(&project.slug, false).await?))
}

pub async fn show_update(
    State(state): State<Arc<AppState>>,
    Path((slug, update)): Path<(String, String)>,
    headers: HeaderMap,
) -> ApiResult<Response> {
    let update = state.site.projects().find_update(&slug, &update).await?;
    let fallback = project_updates_path(&slug);

    let detail = UpdateDetail {
        update: &update,
        html: update.module.render(&state.renderer),
        back: back_link(&state, &headers, &fallback),
    };
    Ok(Json(detail).into_response())
}

pub async fn all_updates(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<ProjectUpdateEntry>>> {
    Ok(Json(state.site.projects().all_updates(false).await?))
}

/// Integration values, each `coming_soon` when unconfigured
pub async fn integrations(State(state): State<Arc<AppState>>) -> Json<IntegrationStatus> {
    Json(state.site.config.integrations.status())
}
