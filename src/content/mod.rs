//! Content module - content files, metadata models and rendering

mod frontmatter;
pub mod loader;
mod markdown;
mod post;
mod project;

pub use frontmatter::FrontMatter;
pub use loader::{ContentLoader, ContentModule, Metadata};
pub use markdown::MarkdownRenderer;
pub use post::{is_guest_post, is_own_post, GuestInfo, Post, PostCover, PostEntry};
pub use project::{Project, ProjectEntry, ProjectLink, ProjectUpdate, ProjectUpdateEntry};
