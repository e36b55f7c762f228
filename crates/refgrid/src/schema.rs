//! Retrieval of extraction schema files from the file API.

use chrono::{DateTime, Utc};
use reqwest::blocking::Client;
use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::RefgridConfig;
use crate::error::{RefgridError, Result};

/// Version information returned alongside a schema file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaMetadata {
    pub schema_name: String,
    pub etag: Option<String>,
    pub version_id: Option<String>,
    pub version_tag: Option<String>,
    pub last_modified: Option<DateTime<Utc>>,
}

impl SchemaMetadata {
    /// Read metadata from response headers.
    pub fn from_headers(schema_name: impl Into<String>, headers: &HeaderMap) -> Self {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };

        Self {
            schema_name: schema_name.into(),
            etag: header("etag"),
            version_id: header("version-id"),
            version_tag: header("version-tag"),
            last_modified: header("last-modified")
                .and_then(|v| DateTime::parse_from_rfc2822(&v).ok())
                .map(|d| d.with_timezone(&Utc)),
        }
    }
}

/// Blocking client for the schema file API.
pub struct SchemaClient {
    client: Client,
    api_url: String,
}

impl SchemaClient {
    /// Create a client using the configured base URL and timeout.
    pub fn new(config: &RefgridConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RefgridError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
        })
    }

    /// URL of a schema file. The schema name is lower-cased.
    pub fn schema_url(&self, workspace: &str, schema_name: &str) -> String {
        format!(
            "{}/v1/file/{}/schemas/{}.json",
            self.api_url,
            workspace,
            schema_name.to_lowercase()
        )
    }

    /// Fetch a schema file, optionally at a specific version.
    ///
    /// Every failure is reported as [`RefgridError::SchemaFetch`].
    pub fn fetch(
        &self,
        workspace: &str,
        schema_name: &str,
        version_id: Option<&str>,
    ) -> Result<(Value, SchemaMetadata)> {
        let url = self.schema_url(workspace, schema_name);
        debug!(%url, ?version_id, "fetching schema");

        let mut request = self.client.get(&url);
        if let Some(version_id) = version_id {
            request = request.query(&[("version_id", version_id)]);
        }

        let response = request.send().map_err(|e| {
            warn!(%url, error = %e, "schema request failed");
            RefgridError::schema_fetch(e.to_string())
        })?;

        let status = response.status();
        let metadata = SchemaMetadata::from_headers(schema_name, response.headers());
        let body = response
            .text()
            .map_err(|e| RefgridError::schema_fetch(e.to_string()))?;

        if !status.is_success() {
            warn!(%url, %status, "schema request rejected");
            return Err(RefgridError::schema_fetch(error_message(&body, &status.to_string())));
        }

        let schema: Value = serde_json::from_str(&body)
            .map_err(|e| RefgridError::schema_fetch(format!("invalid schema body: {}", e)))?;

        Ok((schema, metadata))
    }
}

/// Best-effort error message from an error response body.
///
/// Prefers a JSON `detail` field, then `message`, then the raw body, then `fallback`.
pub fn error_message(body: &str, fallback: &str) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) {
        for key in ["detail", "message"] {
            match map.get(key) {
                None | Some(Value::Null) => {}
                Some(Value::String(s)) if s.is_empty() => {}
                Some(Value::String(s)) => return s.clone(),
                Some(other) => return other.to_string(),
            }
        }
    }

    if !body.trim().is_empty() {
        return body.to_string();
    }
    fallback.to_string()
}
