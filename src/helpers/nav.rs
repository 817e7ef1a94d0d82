//! Navigation history for "back" links on detail views

use serde::Serialize;

/// The previous in-site location of the reader, when known
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NavigationHistory {
    previous: Option<String>,
}

impl NavigationHistory {
    pub fn new(previous: Option<String>) -> Self {
        Self { previous }
    }

    /// Build from a `Referer` value, keeping it only when it points into `site_url`
    ///
    /// Without a configured site URL only relative referers are trusted.
    pub fn from_referer(referer: Option<&str>, site_url: Option<&str>) -> Self {
        let previous = referer.and_then(|r| {
            let r = r.trim();
            if is_local_path(r) {
                return Some(r.to_string());
            }
            let base = site_url?.trim_end_matches('/');
            let rest = r.strip_prefix(base)?;
            match rest {
                "" => Some("/".to_string()),
                _ if is_local_path(rest) => Some(rest.to_string()),
                _ => None,
            }
        });
        Self { previous }
    }

    pub fn previous(&self) -> Option<&str> {
        self.previous.as_deref()
    }

    /// Where a back link should point: the previous page, or `fallback`
    pub fn back_href(&self, fallback: &str) -> String {
        self.previous
            .clone()
            .unwrap_or_else(|| fallback.to_string())
    }
}

/// A path on this host; browsers read `//x` and `/\\x` as another host
fn is_local_path(path: &str) -> bool {
    let mut chars = path.chars();
    chars.next() == Some('/') && !matches!(chars.next(), Some('/' | '\\'))
}
