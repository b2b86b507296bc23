//! Application configuration.

use std::time::Duration;

/// Published CSV export of the collection sheet.
pub const DEFAULT_SHEET_URL: &str = "https://docs.google.com/spreadsheets/d/e/2PACX-1vQe1zOKqN2u29JOZwM101MexXcI2l3TM5tFNieWaHgDQ8DAXClR9ab3NgKwxsj3w6AvrwcYaUxg2x1v/pub?gid=0&single=true&output=csv";

/// Environment variable overriding [`DEFAULT_SHEET_URL`].
pub const SHEET_URL_ENV: &str = "CRYSTAL_VAULT_SHEET_URL";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);
const DEFAULT_THUMBNAIL_EDGE: u32 = 240;

/// Runtime settings shared by the loader and the viewer.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub sheet_url: String,
    pub request_timeout: Duration,
    pub user_agent: String,
    /// Longest edge of a card thumbnail, in pixels.
    pub thumbnail_edge: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sheet_url: DEFAULT_SHEET_URL.to_string(),
            request_timeout: DEFAULT_TIMEOUT,
            user_agent: format!("crystal-vault/{}", env!("CARGO_PKG_VERSION")),
            thumbnail_edge: DEFAULT_THUMBNAIL_EDGE,
        }
    }
}

impl AppConfig {
    /// Defaults, with the sheet URL taken from the environment when set.
    pub fn from_env() -> Self {
        Self::with_sheet_url(std::env::var(SHEET_URL_ENV).ok())
    }

    fn with_sheet_url(url: Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(url) = url.map(|u| u.trim().to_string()).filter(|u| !u.is_empty()) {
            config.sheet_url = url;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_override_keeps_default_url() {
        let config = AppConfig::with_sheet_url(Some("   ".to_string()));
        assert_eq!(config.sheet_url, DEFAULT_SHEET_URL);
    }

    #[test]
    fn override_replaces_url_only() {
        let config = AppConfig::with_sheet_url(Some(" https://example.com/sheet.csv ".to_string()));
        assert_eq!(config.sheet_url, "https://example.com/sheet.csv");
        assert_eq!(config.request_timeout, DEFAULT_TIMEOUT);
        assert_eq!(config.thumbnail_edge, DEFAULT_THUMBNAIL_EDGE);
    }
}
