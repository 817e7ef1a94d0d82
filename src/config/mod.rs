//! Configuration module

mod site;

pub use site::AuthorConfig;
pub use site::HighlightConfig;
pub use site::Integration;
pub use site::IntegrationStatus;
pub use site::IntegrationsConfig;
pub use site::SiteConfig;
pub use site::SITE_URL_ENV;
