//! Generate feed, sitemap and collection snapshots

use anyhow::Result;
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode, DebounceEventResult};
use std::path::Path;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

use crate::generator::{GenerateReport, Generator};
use crate::Site;

/// Generate every artifact once
pub async fn run(site: &Site) -> Result<GenerateReport> {
    let start = Instant::now();

    let report = Generator::new(site).generate().await?;

    tracing::info!(
        "Generated {} files in {:.2}s",
        report.written.len(),
        start.elapsed().as_secs_f64()
    );
    Ok(report)
}

/// Watch the content tree and config file, regenerating on change
pub async fn watch(site: &Site) -> Result<()> {
    let (tx, mut rx) = mpsc::channel::<DebounceEventResult>(16);

    // Create debouncer to avoid multiple rapid rebuilds
    let mut debouncer = new_debouncer(Duration::from_millis(500), move |res| {
        let _ = tx.blocking_send(res);
    })?;

    if site.content_dir.exists() {
        debouncer
            .watcher()
            .watch(&site.content_dir, RecursiveMode::Recursive)?;
        tracing::debug!("Watching: {:?}", site.content_dir);
    }

    let config_path = site.base_dir.join("_config.yml");
    if config_path.exists() {
        debouncer
            .watcher()
            .watch(&config_path, RecursiveMode::NonRecursive)?;
        tracing::debug!("Watching: {:?}", config_path);
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    while let Some(result) = rx.recv().await {
        match result {
            Ok(events) => {
                let changed: Vec<_> = events.iter().filter(|e| is_relevant(&e.path)).collect();
                if changed.is_empty() {
                    continue;
                }

                for event in &changed {
                    tracing::info!("File changed: {}", event.path.display());
                }

                // Config edits need a fresh site
                let current = match Site::new(&site.base_dir) {
                    Ok(current) => current,
                    Err(e) => {
                        tracing::error!("Failed to reload config: {}", e);
                        continue;
                    }
                };
                if let Err(e) = run(&current).await {
                    tracing::error!("Generation failed: {}", e);
                }
            }
            Err(e) => {
                tracing::error!("Watch error: {:?}", e);
            }
        }
    }

    Ok(())
}

/// Ignore editor and VCS noise
fn is_relevant(path: &Path) -> bool {
    let path_str = path.to_string_lossy();
    !path_str.contains(".git")
        && !path_str.contains(".DS_Store")
        && !path_str.contains("node_modules")
        && !path_str.ends_with('~')
}
