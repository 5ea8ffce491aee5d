//! reqwest-backed transport.
//!
//! Every call is a JSON `POST` to `{base_url}{endpoint path}`. The stored
//! token is sent verbatim in the `Authorization` header for every endpoint
//! except login and change-password.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderValue};

use crate::endpoint::Endpoint;
use crate::error::ClientError;
use crate::reply::Reply;
use crate::transport::Transport;

pub struct HttpTransport {
    http: reqwest::Client,
    base_url: String,
    authorization: Option<HeaderValue>,
}

impl HttpTransport {
    /// Build a transport for `base_url` (scheme, host, port and API prefix).
    ///
    /// `timeout` of `None` keeps reqwest's defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidToken`] if `token` cannot be used as a
    /// header value and [`ClientError::Http`] if the client fails to build.
    pub fn new(
        base_url: &str,
        token: Option<&str>,
        timeout: Option<Duration>,
    ) -> Result<Self, ClientError> {
        let authorization = token
            .filter(|token| !token.is_empty())
            .map(|token| {
                let mut value = HeaderValue::from_str(token).map_err(|_| ClientError::InvalidToken)?;
                value.set_sensitive(true);
                Ok::<_, ClientError>(value)
            })
            .transpose()?;

        let mut builder = reqwest::Client::builder().user_agent("playbook/0.1");
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            authorization,
        })
    }

    #[must_use]
    pub fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }
}

impl Transport for HttpTransport {
    async fn post(
        &self,
        endpoint: Endpoint,
        body: &serde_json::Value,
    ) -> Result<Reply, ClientError> {
        let mut request = self.http.post(self.url(endpoint)).json(body);
        if endpoint.is_authenticated()
            && let Some(authorization) = &self.authorization
        {
            request = request.header(AUTHORIZATION, authorization.clone());
        }

        let response = request.send().await.map_err(|e| ClientError::Transport {
            endpoint: endpoint.name(),
            message: e.to_string(),
        })?;
        read_reply(response, endpoint).await
    }
}

/// Collect status and body. Reading the body is part of the exchange, so a
/// failure here is a transport failure.
async fn read_reply(response: reqwest::Response, endpoint: Endpoint) -> Result<Reply, ClientError> {
    let status = response.status().as_u16();
    let body = response.text().await.map_err(|e| ClientError::Transport {
        endpoint: endpoint.name(),
        message: format!("reading response body: {e}"),
    })?;
    Ok(Reply { status, body })
}
