//! HTTP client for the pod server.
//!
//! The server exposes a handful of unauthenticated JSON routes:
//! - `GET  /getUserInterests` - array of tag strings
//! - `GET  /getPods` - array of (stringified) pod documents
//! - `GET  /pod/{id}/attenders` - array of attender objects
//! - `POST /savePod`, `POST /nopePod` - `{ "pod": <pod> }`, response ignored

use crate::error::{Result, SourceError};
use crate::types::Attender;
use async_trait::async_trait;
use pod_model::parser::{parse_interests, parse_pod_list};
use pod_model::{Pod, Tag};
use reqwest::{Client, Response};
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

/// Default request timeout for pod server calls
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Anything that can supply pods and interests for a deck.
///
/// ## Design Note
/// - `Send + Sync` so one source can be shared behind an `Arc`
/// - Async because every real implementation talks to the network
#[async_trait]
pub trait PodSource: Send + Sync {
    /// Candidate pods in the server's presentation order
    async fn get_pods(&self) -> Result<Vec<Pod>>;

    /// Tags the current user is interested in
    async fn get_user_interests(&self) -> Result<Vec<Tag>>;

    /// People who joined a pod
    async fn get_attenders(&self, pod_id: &str) -> Result<Vec<Attender>>;
}

#[derive(Serialize)]
struct PodEnvelope<'a> {
    pod: &'a Pod,
}

/// reqwest-backed [`PodSource`].
#[derive(Clone, Debug)]
pub struct HttpPodClient {
    client: Client,
    base_url: String,
}

impl HttpPodClient {
    /// Create a client for the server at `base_url` (e.g. "http://localhost:3000").
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Reuse an existing reqwest client (connection pool, custom TLS, ...).
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn get_text(&self, path: &str) -> Result<String> {
        let url = self.url(path);
        debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        let response = check_status(path, response)?;
        Ok(response.text().await?)
    }

    /// POST `{ "pod": pod }` to `path`. The response body is discarded.
    pub async fn post_pod(&self, path: &str, pod: &Pod) -> Result<()> {
        let url = self.url(path);
        debug!("POST {} (pod {})", url, pod.id);
        let response = self
            .client
            .post(&url)
            .json(&PodEnvelope { pod })
            .send()
            .await?;
        check_status(path, response)?;
        Ok(())
    }
}

fn check_status(endpoint: &str, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(SourceError::Status {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
        })
    }
}

#[async_trait]
impl PodSource for HttpPodClient {
    async fn get_pods(&self) -> Result<Vec<Pod>> {
        let body = self.get_text("getPods").await?;
        Ok(parse_pod_list(&body)?)
    }

    async fn get_user_interests(&self) -> Result<Vec<Tag>> {
        let body = self.get_text("getUserInterests").await?;
        Ok(parse_interests(&body)?)
    }

    async fn get_attenders(&self, pod_id: &str) -> Result<Vec<Attender>> {
        let path = format!("pod/{}/attenders", pod_id);
        let body = self.get_text(&path).await?;
        serde_json::from_str(&body).map_err(|source| SourceError::Json {
            endpoint: path,
            source,
        })
    }
}
