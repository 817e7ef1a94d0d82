//! CLI entry point for folio

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio_rs::commands::new::Kind;
use folio_rs::Site;

#[derive(Parser)]
#[command(name = "folio")]
#[command(author = "Sergio Leon")]
#[command(version)]
#[command(about = "Content engine for a portfolio and blog: collections, RSS feed and sitemap", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scaffold a new post, project or project update
    New {
        /// Kind of content (post, project, update)
        kind: Kind,

        /// Title of the new item
        title: String,

        /// Project the update belongs to
        #[arg(short, long)]
        project: Option<String>,
    },

    /// Write feed.xml, sitemap.xml and JSON snapshots to the public folder
    #[command(alias = "g")]
    Generate {
        /// Watch for file changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Serve the JSON API, feed and sitemap
    #[command(alias = "s")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Regenerate artifacts when content changes
        #[arg(short, long)]
        watch: bool,

        /// Let `/api/posts?drafts=true` return drafts
        #[arg(long)]
        drafts: bool,
    },

    /// Clean the public folder
    Clean,

    /// List site content
    List {
        /// Type of content to list (post, guest, project, update, tag)
        #[arg(default_value = "post")]
        r#type: String,

        /// Include drafts
        #[arg(long)]
        drafts: bool,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "folio_rs=debug,info"
    } else {
        "folio_rs=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to read current directory")?,
    };

    match cli.command {
        Commands::New {
            kind,
            title,
            project,
        } => {
            let site = Site::new(&base_dir)?;
            tracing::info!("Creating new {:?} with title: {}", kind, title);
            folio_rs::commands::new::create(&site, kind, &title, project.as_deref())?;
        }

        Commands::Generate { watch } => {
            let site = Site::new(&base_dir)?;
            tracing::info!("Generating artifacts...");

            folio_rs::commands::generate::run(&site).await?;
            println!("Generated successfully!");

            if watch {
                folio_rs::commands::generate::watch(&site).await?;
            }
        }

        Commands::Serve {
            port,
            ip,
            watch,
            drafts,
        } => {
            let site = Site::new(&base_dir)?;

            if watch {
                // Serving works without artifacts; only warn when they cannot be built
                if let Err(e) = folio_rs::commands::generate::run(&site).await {
                    tracing::warn!("Initial generation failed: {}", e);
                }
            }

            tracing::info!("Starting server at http://{}:{}", ip, port);
            folio_rs::server::start(&site, &ip, port, watch, drafts).await?;
        }

        Commands::Clean => {
            let site = Site::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            folio_rs::commands::clean::run(&site)?;
            println!("Cleaned successfully!");
        }

        Commands::List { r#type, drafts } => {
            let site = Site::new(&base_dir)?;
            folio_rs::commands::list::run(&site, &r#type, drafts).await?;
        }

        Commands::Version => {
            println!("folio version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
