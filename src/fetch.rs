// Fetcher - single blocking HTTP GET for the revenue page
//
// No retries and no caching: a failed fetch aborts the run.

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{PipelineError, Result};

pub struct Fetcher {
    client: Client,
    headers: HeaderMap,
}

impl Fetcher {
    /// Build a fetcher sending `user_agent` plus any extra `headers`
    pub fn new(
        user_agent: &str,
        headers: &BTreeMap<String, String>,
        timeout: Duration,
    ) -> Result<Self> {
        let headers = build_header_map(headers)?;

        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| PipelineError::Fetch(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { client, headers })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            &config.user_agent,
            &config.headers,
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Fetch `url` and return the response body as text.
    ///
    /// Transport failures and non-2xx statuses both map to `PipelineError::Fetch`.
    pub fn fetch(&self, url: &str) -> Result<String> {
        info!("Fetching {}", url);

        let response = self
            .client
            .get(url)
            .headers(self.headers.clone())
            .send()
            .map_err(|e| PipelineError::Fetch(format!("request to {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PipelineError::Fetch(format!(
                "{} returned status {}",
                url, status
            )));
        }

        let body = response
            .text()
            .map_err(|e| PipelineError::Fetch(format!("failed to read body of {}: {}", url, e)))?;

        debug!("Fetched {} bytes from {}", body.len(), url);
        Ok(body)
    }
}

fn build_header_map(headers: &BTreeMap<String, String>) -> Result<HeaderMap> {
    let mut map = HeaderMap::new();
    for (name, value) in headers {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| PipelineError::Config(format!("invalid header name '{}'", name)))?;
        let header_value = HeaderValue::from_str(value).map_err(|_| {
            PipelineError::Config(format!("invalid value for header '{}'", name))
        })?;
        map.insert(header_name, header_value);
    }
    Ok(map)
}
