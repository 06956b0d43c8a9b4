//! Schema sources: where a version's artifact is fetched from on a cache miss

use crate::cache::SchemaCacheConfig;
use crate::errors::{schema_unavailable, Result};
use ecsfit_core::errors::{ExError, ExErrorKind, FieldCheckError};
use ecsfit_core::{log_op_end, log_op_error, log_op_start};
use std::time::{Duration, Instant};

/// A remote (or fake) provider of raw schema artifacts
pub trait SchemaSource {
    /// Human-readable location of the artifact for `version`
    fn location(&self, version: &str) -> String;

    /// Fetch the raw artifact bytes for `version`
    ///
    /// # Errors
    ///
    /// - `SchemaUnavailable` when the source has no such version
    /// - `SchemaFetch` on any other transport or status failure
    fn fetch(&self, version: &str) -> Result<Vec<u8>>;
}

/// Fetches artifacts over HTTP(S) from an expanded URL template
pub struct HttpSchemaSource {
    template: String,
    client: reqwest::blocking::Client,
}

impl HttpSchemaSource {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Build a source for the config's template with the default timeout
    pub fn from_config(config: &SchemaCacheConfig) -> Result<Self> {
        Self::with_timeout(config.schema_source_template.clone(), Self::DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(template: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("ecsfit/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                ExError::new(ExErrorKind::Internal)
                    .with_op("http_client")
                    .with_message(e.to_string())
            })?;
        Ok(Self {
            template: template.into(),
            client,
        })
    }

    fn request(&self, version: &str, url: &str) -> Result<Vec<u8>> {
        let fetch_error = |reason: String| -> ExError {
            FieldCheckError::SchemaFetch {
                version: version.to_string(),
                url: url.to_string(),
                reason,
            }
            .into()
        };

        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| fetch_error(format!("can't download the online schema: {e}")))?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(schema_unavailable(version, url));
        }
        if !status.is_success() {
            return Err(fetch_error(format!("unexpected HTTP status code: {status}")));
        }

        resp.bytes()
            .map(|b| b.to_vec())
            .map_err(|e| fetch_error(format!("can't read schema content: {e}")))
    }
}

impl SchemaSource for HttpSchemaSource {
    fn location(&self, version: &str) -> String {
        self.template
            .replace(crate::cache::VERSION_PLACEHOLDER, version)
    }

    fn fetch(&self, version: &str) -> Result<Vec<u8>> {
        let url = self.location(version);
        let started = Instant::now();
        log_op_start!("schema_fetch", schema_version = version, url = url.as_str());

        let result = self.request(version, &url);
        let duration_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(bytes) => log_op_end!(
                "schema_fetch",
                duration_ms = duration_ms,
                schema_version = version,
                bytes = bytes.len()
            ),
            Err(err) => log_op_error!(
                "schema_fetch",
                err.clone(),
                duration_ms = duration_ms,
                schema_version = version
            ),
        }
        result
    }
}
