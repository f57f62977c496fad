use reqwest::Client;
use serde::{Deserialize, Serialize};
use storyboard_core::{BoardResult, MetadataConfig};

use super::remote_error;

/// Title and thumbnail reported by the design host for a link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkMetadata {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub html: Option<String>,
}

/// Client for an oEmbed endpoint. Lookups never fail loudly.
#[derive(Debug, Clone)]
pub struct OEmbedClient {
    client: Client,
    endpoint: String,
}

impl OEmbedClient {
    pub fn new(config: &MetadataConfig) -> BoardResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| remote_error("building HTTP client", e))?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    /// Build a client from `config` and look `link` up. A client that cannot
    /// be built counts as a failed lookup.
    pub async fn lookup_with(config: &MetadataConfig, link: &str) -> Option<LinkMetadata> {
        match Self::new(config) {
            Ok(client) => client.lookup(link).await,
            Err(e) => {
                tracing::debug!("Metadata lookup unavailable: {}", e);
                None
            }
        }
    }

    /// `None` on any network, status or decoding failure.
    pub async fn lookup(&self, link: &str) -> Option<LinkMetadata> {
        let link = link.trim();
        if link.is_empty() {
            return None;
        }

        let response = match self
            .client
            .get(&self.endpoint)
            .query(&[("url", link)])
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!("Metadata request for {} failed: {}", link, e);
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::debug!(
                "Metadata endpoint answered {} for {}",
                response.status(),
                link
            );
            return None;
        }

        match response.json::<LinkMetadata>().await {
            Ok(metadata) => Some(metadata),
            Err(e) => {
                tracing::debug!("Unreadable metadata for {}: {}", link, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> OEmbedClient {
        OEmbedClient::new(&MetadataConfig {
            endpoint: format!("{}/_oembed", server.uri()),
            timeout_secs: 5,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_lookup_success() {
        let server = MockServer::start().await;
        let link = "https://www.canva.com/design/ABC123/view";

        Mock::given(method("GET"))
            .and(path("/_oembed"))
            .and(query_param("url", link))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "type": "rich",
                "title": "Launch teaser",
                "thumbnail_url": "https://img.example.com/t.png",
                "html": "<iframe></iframe>"
            })))
            .mount(&server)
            .await;

        let metadata = client_for(&server).lookup(link).await.unwrap();
        assert_eq!(metadata.title.as_deref(), Some("Launch teaser"));
        assert_eq!(
            metadata.thumbnail_url.as_deref(),
            Some("https://img.example.com/t.png")
        );
    }

    #[tokio::test]
    async fn test_lookup_error_status_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        assert!(client_for(&server)
            .lookup("https://www.canva.com/design/X/view")
            .await
            .is_none());
    }

    #[tokio::test]
    async fn test_lookup_bad_json_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        assert!(client_for(&server)
            .lookup("https://www.canva.com/design/X/view")
            .await
            .is_none());
    }

    #[tokio::test]
    async fn test_lookup_blank_link_skips_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        assert!(client_for(&server).lookup("   ").await.is_none());
    }

    #[tokio::test]
    async fn test_lookup_with_unusable_endpoint_is_none() {
        let config = MetadataConfig {
            endpoint: "not a url".into(),
            timeout_secs: 1,
        };
        let result =
            OEmbedClient::lookup_with(&config, "https://www.canva.com/design/ABC123/view").await;
        assert!(result.is_none());
    }
}
