//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// Characters escaped inside a single path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Join a site URL and a path without doubling slashes
///
/// # Examples
/// ```ignore
/// full_url_for("https://example.com/", "/about") // -> "https://example.com/about"
/// ```
pub fn full_url_for(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        base.to_string()
    } else {
        format!("{}/{}", base, path)
    }
}

/// Encode a slug for use in a URL path, keeping `/` between nested segments
pub fn encode_slug(slug: &str) -> String {
    slug.split('/')
        .map(|segment| utf8_percent_encode(segment, SEGMENT).to_string())
        .collect::<Vec<_>>()
        .join("/")
}

/// Public path of a post
pub fn post_path(slug: &str) -> String {
    format!("/posts/{}", encode_slug(slug))
}

/// Public path of a project
pub fn project_path(slug: &str) -> String {
    format!("/projects/{}", encode_slug(slug))
}

/// Public path of a project's updates index
pub fn project_updates_path(project_slug: &str) -> String {
    format!("{}/updates", project_path(project_slug))
}

/// Public path of a single project update
pub fn project_update_path(project_slug: &str, update_slug: &str) -> String {
    format!(
        "{}/{}",
        project_updates_path(project_slug),
        encode_slug(update_slug)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_url_for() {
        assert_eq!(
            full_url_for("https://example.com/", "/about"),
            "https://example.com/about"
        );
        assert_eq!(full_url_for("https://example.com", ""), "https://example.com");
        assert_eq!(full_url_for("https://example.com", "/"), "https://example.com");
    }

    #[test]
    fn test_paths() {
        assert_eq!(post_path("my-post"), "/posts/my-post");
        assert_eq!(project_updates_path("acme"), "/projects/acme/updates");
        assert_eq!(
            project_update_path("acme", "2024/launch day"),
            "/projects/acme/updates/2024/launch%20day"
        );
    }
}
