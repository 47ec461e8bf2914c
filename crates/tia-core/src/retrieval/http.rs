//! HTTP-backed retrieval collaborator

use super::{RetrievalResult, Retriever};
use crate::error::{Error, Result};
use async_trait::async_trait;

/// Retriever that delegates to a remote index service over HTTP.
///
/// Sends `{"query": ..., "k": ...}` as JSON and expects a
/// [`RetrievalResult`] payload back. Whether an endpoint is configured at
/// all is the caller's readiness decision, made once at startup.
pub struct HttpRetriever {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpRetriever {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: reqwest::Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Retriever for HttpRetriever {
    fn name(&self) -> &str {
        "http-index"
    }

    async fn ask(&self, query: &str, k: usize) -> Result<RetrievalResult> {
        tracing::debug!(endpoint = %self.endpoint, k, "Querying index");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&serde_json::json!({ "query": query, "k": k }))
            .send()
            .await
            .map_err(|e| Error::Retrieval(format!("index request failed: {e}")))?;

        let response = response
            .error_for_status()
            .map_err(|e| Error::Retrieval(format!("index returned an error: {e}")))?;

        response
            .json::<RetrievalResult>()
            .await
            .map_err(|e| Error::Retrieval(format!("malformed index response: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_is_kept_verbatim() {
        let retriever = HttpRetriever::new("http://localhost:9200/ask");
        assert_eq!(retriever.endpoint(), "http://localhost:9200/ask");
        assert_eq!(retriever.name(), "http-index");
    }
}
