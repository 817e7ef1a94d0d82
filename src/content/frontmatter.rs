//! Front-matter parsing
//!
//! A content file starts with a YAML block between `---` lines. The block
//! holds one top-level key per exported metadata object (`post`, `project`,
//! `update`); everything after the closing `---` is the markdown body.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use std::path::Path;

use crate::error::{Error, Result};

/// Custom deserializer that handles both a single string and a list of strings
pub(crate) fn string_or_vec<'de, D>(deserializer: D) -> std::result::Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrVec {
        One(String),
        Many(Vec<String>),
    }

    Ok(
        Option::<StringOrVec>::deserialize(deserializer)?.map(|v| match v {
            StringOrVec::One(s) => vec![s],
            StringOrVec::Many(v) => v,
        }),
    )
}

/// Front-matter block of a content file
#[derive(Debug, Clone, Default)]
pub struct FrontMatter {
    mapping: serde_yaml::Mapping,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    pub fn parse<'a>(content: &'a str, path: &Path) -> Result<(Self, &'a str)> {
        let trimmed = content.trim_start_matches('\u{feff}').trim_start();

        let Some(rest) = trimmed.strip_prefix("---") else {
            return Ok((FrontMatter::default(), content));
        };
        let rest = rest.trim_start_matches([' ', '\t']);
        let Some(rest) = rest
            .strip_prefix("\r\n")
            .or_else(|| rest.strip_prefix('\n'))
        else {
            // `---something` on the first line is a thematic break, not front-matter
            return Ok((FrontMatter::default(), content));
        };

        let (yaml, body) = match find_closing_fence(rest) {
            Some((end, after)) => (&rest[..end], &rest[after..]),
            None => return Ok((FrontMatter::default(), content)),
        };

        if yaml.trim().is_empty() {
            return Ok((FrontMatter::default(), body));
        }

        let value: serde_yaml::Value =
            serde_yaml::from_str(yaml).map_err(|e| Error::InvalidMetadata {
                path: path.to_path_buf(),
                export: "front-matter",
                message: e.to_string(),
            })?;

        match value {
            serde_yaml::Value::Mapping(mapping) => Ok((Self { mapping }, body)),
            serde_yaml::Value::Null => Ok((FrontMatter::default(), body)),
            _ => Err(Error::InvalidMetadata {
                path: path.to_path_buf(),
                export: "front-matter",
                message: "front-matter must be a mapping".to_string(),
            }),
        }
    }

    /// Whether the named metadata block is present
    pub fn has(&self, export: &str) -> bool {
        self.mapping.contains_key(export)
    }

    /// Deserialize the named metadata block
    pub fn extract<M: DeserializeOwned>(&self, export: &'static str, path: &Path) -> Result<M> {
        let value = match self.mapping.get(export) {
            Some(v) if !v.is_null() => v.clone(),
            _ => {
                return Err(Error::MissingMetadata {
                    path: path.to_path_buf(),
                    export,
                })
            }
        };

        serde_yaml::from_value(value).map_err(|e| Error::InvalidMetadata {
            path: path.to_path_buf(),
            export,
            message: e.to_string(),
        })
    }
}

/// Locate the closing `---` line; returns (yaml_end, body_start)
fn find_closing_fence(rest: &str) -> Option<(usize, usize)> {
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        let bare = line.trim_end_matches(['\n', '\r']);
        if bare.trim_end() == "---" {
            let body_start = offset + line.len();
            let body = &rest[body_start..];
            let skipped = body.len() - body.trim_start_matches(['\n', '\r']).len();
            return Some((offset, body_start + skipped));
        }
        offset += line.len();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Meta {
        title: String,
        #[serde(default, deserialize_with = "string_or_vec")]
        tags: Option<Vec<String>>,
    }

    fn path() -> &'static Path {
        Path::new("posts/hello/page.md")
    }

    #[test]
    fn test_parse_named_block() {
        let content = r#"---
post:
  title: Hello World
  tags:
    - rust
    - web
---

This is the content.
"#;

        let (fm, body) = FrontMatter::parse(content, path()).unwrap();
        assert!(fm.has("post"));
        let meta: Meta = fm.extract("post", path()).unwrap();
        assert_eq!(meta.title, "Hello World");
        assert_eq!(meta.tags, Some(vec!["rust".to_string(), "web".to_string()]));
        assert_eq!(body, "This is the content.\n");
    }

    #[test]
    fn test_single_string_tags() {
        let content = "---\npost:\n  title: One\n  tags: Notes\n---\nBody";
        let (fm, _) = FrontMatter::parse(content, path()).unwrap();
        let meta: Meta = fm.extract("post", path()).unwrap();
        assert_eq!(meta.tags, Some(vec!["Notes".to_string()]));
    }

    #[test]
    fn test_missing_block_names_file() {
        let content = "---\nproject:\n  title: Wrong kind\n---\nBody";
        let (fm, _) = FrontMatter::parse(content, path()).unwrap();
        let err = fm.extract::<Meta>("post", path()).unwrap_err();
        assert!(matches!(err, Error::MissingMetadata { export: "post", .. }));
        assert!(err.to_string().contains("posts/hello/page.md"));
    }

    #[test]
    fn test_no_front_matter() {
        let content = "# Just markdown\n\n---\n\nwith a rule";
        let (fm, body) = FrontMatter::parse(content, path()).unwrap();
        assert!(!fm.has("post"));
        assert_eq!(body, content);
    }

    #[test]
    fn test_unterminated_front_matter_is_body() {
        let content = "---\npost:\n  title: Never closed\n";
        let (fm, body) = FrontMatter::parse(content, path()).unwrap();
        assert!(!fm.has("post"));
        assert_eq!(body, content);
    }

    #[test]
    fn test_malformed_yaml_is_an_error() {
        let content = "---\npost: [unclosed\n---\nBody";
        let err = FrontMatter::parse(content, path()).unwrap_err();
        assert!(matches!(err, Error::InvalidMetadata { .. }));
    }

    #[test]
    fn test_wrong_shape_is_invalid_metadata() {
        let content = "---\npost:\n  tags: [a]\n---\nBody";
        let (fm, _) = FrontMatter::parse(content, path()).unwrap();
        let err = fm.extract::<Meta>("post", path()).unwrap_err();
        assert!(matches!(err, Error::InvalidMetadata { export: "post", .. }));
    }
}
