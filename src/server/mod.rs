//! HTTP server: JSON API, feed and sitemap over live content
//!
//! Every request reads the content tree again, so edits show up without a
//! restart. Anything that is not an API route is served from the public
//! directory.

mod api;

use anyhow::Result;
use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::content::MarkdownRenderer;
use crate::Site;

pub use api::ApiError;

/// Shared handler state
pub struct AppState {
    pub site: Site,
    pub renderer: MarkdownRenderer,
    /// Whether `?drafts=true` is honoured; off unless the operator opts in
    pub serve_drafts: bool,
}

impl AppState {
    pub fn new(site: Site, serve_drafts: bool) -> Self {
        let renderer = site.renderer();
        Self {
            site,
            renderer,
            serve_drafts,
        }
    }
}

/// Build the application router
pub fn router(site: Site, serve_drafts: bool) -> Router {
    let public_dir = site.public_dir.clone();
    let state = Arc::new(AppState::new(site, serve_drafts));

    Router::new()
        .route("/feed.xml", get(api::feed))
        .route("/sitemap.xml", get(api::sitemap))
        .route("/api/posts", get(api::list_posts))
        .route("/api/posts/recent", get(api::recent_posts))
        .route("/api/posts/guest", get(api::guest_posts))
        .route("/api/posts/:slug", get(api::show_post))
        .route("/api/projects", get(api::list_projects))
        .route("/api/projects/:slug", get(api::show_project))
        .route("/api/projects/:slug/updates", get(api::project_updates))
        .route("/api/projects/:slug/updates/*update", get(api::show_update))
        .route("/api/updates", get(api::all_updates))
        .route("/api/integrations", get(api::integrations))
        .fallback_service(ServeDir::new(public_dir).append_index_html_on_directories(true))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the server
pub async fn start(site: &Site, ip: &str, port: u16, watch: bool, drafts: bool) -> Result<()> {
    let app = router(site.clone(), drafts);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    if watch {
        println!("Watching for changes; artifacts are regenerated on save.");
    }
    if drafts {
        tracing::warn!("Drafts are visible through /api/posts?drafts=true");
    }
    println!("Press Ctrl+C to stop.");

    if watch {
        let site = site.clone();
        tokio::spawn(async move {
            if let Err(e) = crate::commands::generate::watch(&site).await {
                tracing::error!("File watcher error: {}", e);
            }
        });
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
