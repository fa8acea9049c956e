//! Model service endpoint settings.

use std::time::Duration;

use reqwest::{Client, RequestBuilder};

use crate::error::{MlClientError, MlResult};

/// Where and how to reach one model service.
#[derive(Debug, Clone)]
pub struct ServiceEndpoint {
    /// Full URL requests are POSTed to
    pub url: String,
    /// Bearer token, if the service wants one
    pub api_key: Option<String>,
    /// Whole-request timeout, `None` for no limit
    pub timeout: Option<Duration>,
}

impl ServiceEndpoint {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: None,
            timeout: None,
        }
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|k| !k.is_empty());
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build an HTTP client honoring the timeout.
    pub(crate) fn client(&self) -> MlResult<Client> {
        if self.url.trim().is_empty() {
            return Err(MlClientError::Config("service URL is empty".to_string()));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(builder.build()?)
    }

    /// POST to the endpoint with auth applied.
    pub(crate) fn post(&self, client: &Client) -> RequestBuilder {
        let request = client.post(&self.url);
        match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }
}

/// Turn a non-2xx response into [`MlClientError::Status`].
pub(crate) async fn check_status(response: reqwest::Response) -> MlResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(MlClientError::Status {
        status: status.as_u16(),
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_url_rejected() {
        let endpoint = ServiceEndpoint::new("  ");
        assert!(matches!(endpoint.client(), Err(MlClientError::Config(_))));
    }

    #[test]
    fn test_blank_api_key_dropped() {
        let endpoint = ServiceEndpoint::new("http://localhost").with_api_key(Some(String::new()));
        assert!(endpoint.api_key.is_none());
    }
}
