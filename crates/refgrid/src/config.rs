//! Configuration shared by extraction, resolution and schema retrieval.

use std::time::Duration;

/// Default schema API endpoint.
const DEFAULT_API_URL: &str = "http://localhost:6900";

/// Environment variable overriding the schema API endpoint.
pub const API_URL_ENV: &str = "REFGRID_API_URL";

/// Configuration for refgrid.
#[derive(Debug, Clone)]
pub struct RefgridConfig {
    /// Suffix marking a reference field (`site_ref` -> table `site`).
    pub ref_suffix: String,
    /// Column holding the reference-row key.
    pub reference_column: String,
    /// String values treated as missing, in addition to JSON `null`.
    pub null_sentinels: Vec<String>,
    /// Base URL of the schema file API.
    pub api_url: String,
    /// Timeout for schema requests.
    pub timeout: Duration,
}

impl Default for RefgridConfig {
    fn default() -> Self {
        Self {
            ref_suffix: "_ref".to_string(),
            reference_column: "reference".to_string(),
            null_sentinels: vec!["NA".to_string()],
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl RefgridConfig {
    /// Default configuration with the API URL taken from `REFGRID_API_URL` when set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var(API_URL_ENV) {
            config.api_url = url.trim_end_matches('/').to_string();
        }
        config
    }

    /// Set the reference field suffix.
    pub fn with_ref_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.ref_suffix = suffix.into();
        self
    }

    /// Set the reference column name.
    pub fn with_reference_column(mut self, column: impl Into<String>) -> Self {
        self.reference_column = column.into();
        self
    }

    /// Set the schema API base URL.
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the schema request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Strip the reference suffix from a field name, returning the table base name.
    pub fn reference_base<'a>(&self, field: &'a str) -> &'a str {
        field.strip_suffix(self.ref_suffix.as_str()).unwrap_or(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_base_strips_trailing_suffix_only() {
        let config = RefgridConfig::default();
        assert_eq!(config.reference_base("site_ref"), "site");
        assert_eq!(config.reference_base("ref_site"), "ref_site");
        assert_eq!(config.reference_base("site_ref_ref"), "site_ref");
        assert_eq!(config.reference_base("site"), "site");
    }

    #[test]
    fn test_api_url_trailing_slash_trimmed() {
        let config = RefgridConfig::default().with_api_url("http://example.test/");
        assert_eq!(config.api_url, "http://example.test");
    }
}
