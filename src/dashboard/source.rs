use reqwest::blocking::Client;
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// Failures of a single JSON fetch.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("invalid url '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("request to '{url}' failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("'{url}' responded with status {status}")]
    Status { url: String, status: u16 },

    #[error("'{url}' did not return valid json: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Anything that can turn a URL into a JSON document.
pub trait JsonSource: Send + Sync {
    fn get_json(&self, url: &str) -> Result<Value, FetchError>;
}

/// Blocking HTTP source used by widget polls, health and identity lookups.
#[derive(Clone)]
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("homelab-dashboard/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

impl JsonSource for HttpSource {
    fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        let parsed = Url::parse(url.trim()).map_err(|source| FetchError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;
        let resp = self
            .client
            .get(parsed)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let body = resp.text().map_err(|source| FetchError::Transport {
            url: url.to_string(),
            source,
        })?;
        serde_json::from_str(&body).map_err(|source| FetchError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_relative_urls_without_network() {
        let source = HttpSource::new(Duration::from_secs(1)).unwrap();
        let err = source.get_json("not a url").unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl { .. }));
    }
}
