use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error, info};
use url::Url;

use super::types::{ExternalStream, ExternalStreamsResponse, ResolveResponse};
use crate::backends::traits::StreamResolver;
use crate::config::ExternalStreamsConfig;
use crate::models::ContentId;
use crate::utils::{StreamError, StreamResult};

/// Client for the external stream resolution service.
///
/// Stateless apart from the pooled HTTP connection: every call is a plain GET
/// and nothing is retried.
#[derive(Debug, Clone)]
pub struct ExternalStreamApi {
    client: reqwest::Client,
    base_url: Url,
}

impl ExternalStreamApi {
    pub fn new(config: &ExternalStreamsConfig) -> StreamResult<Self> {
        Self::with_timeouts(
            &config.base_url,
            config.connect_timeout(),
            config.read_timeout(),
        )
    }

    pub fn with_timeouts(
        base_url: &str,
        connect_timeout: Duration,
        read_timeout: Duration,
    ) -> StreamResult<Self> {
        let base_url = Url::parse(base_url.trim())
            .map_err(|e| StreamError::InvalidConfig(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(StreamError::InvalidConfig(format!(
                "{} cannot be used as a base URL",
                base_url
            )));
        }

        let client = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .read_timeout(read_timeout)
            .build()
            .map_err(|e| StreamError::InvalidConfig(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, base_url })
    }

    fn endpoint(&self, segments: &[&str]) -> StreamResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                StreamError::InvalidConfig(format!("{} cannot be used as a base URL", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> StreamResult<T> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(StreamError::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(StreamError::http_status(status));
        }

        let body = response.text().await.map_err(StreamError::from_transport)?;
        debug!("Response body: {}", body);

        Ok(serde_json::from_str(&body)?)
    }

    pub async fn get_streams(&self, content_id: &ContentId) -> StreamResult<Vec<ExternalStream>> {
        let url = self.endpoint(&["streams", content_id.as_str()])?;

        match self.get_json::<ExternalStreamsResponse>(url).await {
            Ok(response) => {
                info!(
                    "Received {} candidate streams for {}",
                    response.strms.len(),
                    content_id
                );
                Ok(response.strms)
            }
            Err(e) => {
                error!("Failed to get streams for {}: {}", content_id, e);
                Err(e)
            }
        }
    }

    pub async fn resolve_stream(
        &self,
        content_id: &ContentId,
        stream_index: usize,
    ) -> StreamResult<ResolveResponse> {
        let mut url = self.endpoint(&["resolve", content_id.as_str()])?;
        url.query_pairs_mut()
            .append_pair("stream", &stream_index.to_string());

        match self.get_json::<ResolveResponse>(url).await {
            Ok(response) => {
                info!(
                    "Resolve of {} stream {} returned status '{}'",
                    content_id, stream_index, response.status
                );
                Ok(response)
            }
            Err(e) => {
                error!(
                    "Failed to resolve stream {} for {}: {}",
                    stream_index, content_id, e
                );
                Err(e)
            }
        }
    }
}

#[async_trait]
impl StreamResolver for ExternalStreamApi {
    async fn list_streams(&self, content_id: &ContentId) -> StreamResult<Vec<ExternalStream>> {
        self.get_streams(content_id).await
    }

    async fn resolve_stream(
        &self,
        content_id: &ContentId,
        index: usize,
    ) -> StreamResult<ResolveResponse> {
        ExternalStreamApi::resolve_stream(self, content_id, index).await
    }
}
