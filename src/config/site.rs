//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::Error;

/// Environment variable holding the public site URL
pub const SITE_URL_ENV: &str = "SITE_URL";

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: AuthorConfig,

    // URL (SITE_URL overrides it)
    pub url: Option<String>,

    // Directory
    pub content_dir: String,
    pub public_dir: String,

    // Writing
    #[serde(default)]
    pub highlight: HighlightConfig,

    // Third-party integrations
    #[serde(default)]
    pub integrations: IntegrationsConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Sergio Leon".to_string(),
            description:
                "Writing on software, startups, company building, and multiculturalism."
                    .to_string(),
            author: AuthorConfig::default(),
            url: None,
            content_dir: "content".to_string(),
            public_dir: "public".to_string(),
            highlight: HighlightConfig::default(),
            integrations: IntegrationsConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Overlay values from the process environment
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    /// Overlay values from an arbitrary lookup; empty values are ignored
    pub fn apply_env_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get(SITE_URL_ENV) {
            self.url = Some(url);
        }

        let integrations = &mut self.integrations;
        for (key, slot) in [
            ("ENGAGEMENT_WIDGET_ID", &mut integrations.engagement_widget_id),
            (
                "STARTUP_INQUIRY_FORM_URL",
                &mut integrations.startup_inquiry_form_url,
            ),
            (
                "PARTNER_INQUIRY_FORM_URL",
                &mut integrations.partner_inquiry_form_url,
            ),
            ("CALENDAR_URL", &mut integrations.calendar_url),
        ] {
            if let Some(value) = get(key) {
                *slot = Some(value);
            }
        }
    }

    /// The public site URL without a trailing slash
    ///
    /// Feed and sitemap cannot produce correct links without it, so its
    /// absence is a hard error.
    pub fn site_url(&self) -> Result<&str, Error> {
        self.url
            .as_deref()
            .map(|u| u.trim().trim_end_matches('/'))
            .filter(|u| !u.is_empty())
            .ok_or(Error::MissingConfig(SITE_URL_ENV))
    }
}

/// Site owner, used as feed author
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorConfig {
    pub name: String,
    pub email: String,
}

impl Default for AuthorConfig {
    fn default() -> Self {
        Self {
            name: "Sergio Leon".to_string(),
            email: "intro@cbnsndwch.io".to_string(),
        }
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}

/// Optional third-party integration values
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegrationsConfig {
    pub engagement_widget_id: Option<String>,
    pub startup_inquiry_form_url: Option<String>,
    pub partner_inquiry_form_url: Option<String>,
    pub calendar_url: Option<String>,
}

/// Resolved state of one integration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Integration {
    Available(String),
    ComingSoon,
}

impl Integration {
    fn from_option(value: &Option<String>) -> Self {
        match value.as_deref().map(str::trim) {
            Some(v) if !v.is_empty() => Integration::Available(v.to_string()),
            _ => Integration::ComingSoon,
        }
    }
}

/// All integrations, each degraded to `ComingSoon` when unset
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntegrationStatus {
    pub engagement_widget: Integration,
    pub startup_inquiry_form: Integration,
    pub partner_inquiry_form: Integration,
    pub calendar: Integration,
}

impl IntegrationsConfig {
    pub fn status(&self) -> IntegrationStatus {
        IntegrationStatus {
            engagement_widget: Integration::from_option(&self.engagement_widget_id),
            startup_inquiry_form: Integration::from_option(&self.startup_inquiry_form_url),
            partner_inquiry_form: Integration::from_option(&self.partner_inquiry_form_url),
            calendar: Integration::from_option(&self.calendar_url),
        }
    }
}
