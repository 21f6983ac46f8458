//! Runner configuration
//!
//! Settings assembled from the command line before anything starts. A bad
//! value here is fatal at startup; nothing in the running task group reads
//! configuration again.

use std::path::PathBuf;

/// Runner configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the promotion API endpoint
    pub api_url: String,

    /// Public site URL used for the referer/origin headers
    pub site_url: String,

    /// Link to the account profile, target of profile-flavored services
    pub profile_link: String,

    /// Link to the media item, target of every other service
    pub media_link: String,

    /// Optional local catalog snapshot; when set, the remote catalog
    /// endpoint is not consulted
    pub catalog_file: Option<PathBuf>,
}

impl Config {
    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            anyhow::bail!("api_url must start with http:// or https://");
        }

        if !self.site_url.starts_with("http://") && !self.site_url.starts_with("https://") {
            anyhow::bail!("site_url must start with http:// or https://");
        }

        if self.profile_link.trim().is_empty() {
            anyhow::bail!("profile link cannot be empty");
        }

        if self.media_link.trim().is_empty() {
            anyhow::bail!("media link cannot be empty");
        }

        Ok(())
    }
}
