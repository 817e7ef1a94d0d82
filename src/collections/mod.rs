//! Collections - sorted, draft-filtered views over the content tree
//!
//! Nothing here is cached: every call rescans the content directory.

pub mod filters;
mod posts;
mod projects;

use std::cmp::Ordering;

use crate::content::ContentModule;

pub use filters::{FilterOptions, MonthOption, PostQuery, PostQueryParams};
pub use posts::{PostCollection, DEFAULT_GUEST_COUNT, DEFAULT_RECENT_COUNT};
pub use projects::ProjectCollection;

/// Newest first; equal dates fall back to slug so output is deterministic
pub(crate) fn by_date_desc<M>(a: &ContentModule<M>, b: &ContentModule<M>) -> Ordering {
    b.published_at
        .cmp(&a.published_at)
        .then_with(|| a.slug.cmp(&b.slug))
}
