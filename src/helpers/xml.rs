//! XML helpers shared by the feed and sitemap builders

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Root-relative `href`/`src` values; protocol-relative `//host` is left alone
    static ref ROOT_RELATIVE: Regex =
        Regex::new(r#"\b(href|src)=(["'])/([^/])"#).unwrap();
}

/// Escape XML special characters
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Wrap text in a CDATA section, splitting any embedded `]]>`
pub fn cdata(s: &str) -> String {
    format!("<![CDATA[{}]]>", s.replace("]]>", "]]]]><![CDATA[>"))
}

/// Convert root-relative URLs in HTML content to absolute URLs
/// Handles href="/...", src="/..." and their single-quoted forms
pub fn absolutize_urls(content: &str, base_url: &str) -> String {
    let base = base_url.trim_end_matches('/').replace('$', "$$");
    let replacement = format!("${{1}}=${{2}}{}/${{3}}", base);
    ROOT_RELATIVE
        .replace_all(content, replacement.as_str())
        .into_owned()
}

/// Strip invalid XML control characters (except tab, newline, carriage return)
/// XML 1.0 only allows: #x9 | #xA | #xD | [#x20-#xD7FF] | [#xE000-#xFFFD] | [#x10000-#x10FFFF]
pub fn strip_invalid_xml_chars(s: &str) -> String {
    s.chars()
        .filter(|&c| {
            c == '\t'
                || c == '\n'
                || c == '\r'
                || ('\u{0020}'..='\u{D7FF}').contains(&c)
                || ('\u{E000}'..='\u{FFFD}').contains(&c)
                || ('\u{10000}'..='\u{10FFFF}').contains(&c)
        })
        .collect()
}
