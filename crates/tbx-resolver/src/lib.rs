//! HTTP adapter for the external link-resolution service.
//!
//! One GET per classified link, no retries, no backoff; any non-success
//! outcome is an `Error::Resolve`. The caller owns persistence of the result.

use async_trait::async_trait;

use tbx_core::{errors::Error, ports::LinkResolverPort, Result};

#[derive(Clone, Debug)]
pub struct HttpLinkResolver {
    endpoint: String,
    api_key: String,
    http: reqwest::Client,
}

impl HttpLinkResolver {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            // Default reqwest client, deliberately without a request timeout:
            // a resolution runs to completion or transport failure.
            http: reqwest::Client::new(),
        }
    }
}

/// The response body must carry a non-empty string `url` field; anything else
/// counts as a malformed response.
fn extract_direct_url(body: &serde_json::Value) -> Result<String> {
    match body.get("url").and_then(|u| u.as_str()) {
        Some(url) if !url.trim().is_empty() => Ok(url.to_string()),
        _ => Err(Error::Resolve(
            "resolver response missing url field".to_string(),
        )),
    }
}

#[async_trait]
impl LinkResolverPort for HttpLinkResolver {
    async fn resolve(&self, link: &str) -> Result<String> {
        let resp = self
            .http
            .get(&self.endpoint)
            .query(&[("url", link), ("apikey", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| Error::Resolve(format!("resolver request error: {e}")))?;

        if !resp.status().is_success() {
            return Err(Error::Resolve(format!(
                "resolver returned {}",
                resp.status()
            )));
        }

        let body: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| Error::Resolve(format!("resolver json error: {e}")))?;

        extract_direct_url(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_url_field() {
        let body = json!({ "url": "https://cdn.example/v.mp4", "size": "120MB" });
        assert_eq!(
            extract_direct_url(&body).unwrap(),
            "https://cdn.example/v.mp4"
        );
    }

    #[test]
    fn rejects_missing_empty_or_non_string_url() {
        for body in [
            json!({}),
            json!({ "url": "" }),
            json!({ "url": "   " }),
            json!({ "url": 42 }),
            json!({ "download": "https://cdn.example/v.mp4" }),
        ] {
            assert!(extract_direct_url(&body).is_err(), "accepted {body}");
        }
    }
}
