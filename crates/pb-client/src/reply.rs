//! Raw status + body returned by a transport.

use pb_core::wire::Envelope;
use serde::de::DeserializeOwned;

use crate::endpoint::Endpoint;
use crate::error::ClientError;

const MAX_MESSAGE_LEN: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub body: String,
}

impl Reply {
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// A `200` reply carrying `data` inside the usual envelope.
    #[must_use]
    pub fn ok(data: &serde_json::Value) -> Self {
        Self::new(
            200,
            serde_json::json!({"success": true, "error": false, "data": data}).to_string(),
        )
    }

    /// The server signals success with `200` only.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status == 200
    }

    /// Decode the body into the response envelope. An empty body decodes to
    /// an empty envelope.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Decode`] if the body is not a matching envelope.
    pub fn envelope<T>(&self, endpoint: Endpoint) -> Result<Envelope<T>, ClientError>
    where
        T: DeserializeOwned + Default,
    {
        if self.body.trim().is_empty() {
            return Ok(Envelope::default());
        }
        serde_json::from_str(&self.body).map_err(|source| ClientError::Decode {
            endpoint: endpoint.name(),
            source,
        })
    }

    /// The envelope's `data` payload.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Decode`] if the body is not a matching envelope.
    pub fn data<T>(&self, endpoint: Endpoint) -> Result<T, ClientError>
    where
        T: DeserializeOwned + Default,
    {
        Ok(self.envelope(endpoint)?.data)
    }

    /// Turn a non-success reply into [`ClientError::Api`].
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] when the status is not a success.
    pub fn require_success(self, endpoint: Endpoint) -> Result<Self, ClientError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ClientError::Api {
                endpoint: endpoint.name(),
                status: self.status,
                message: self.error_message(),
            })
        }
    }

    /// Short human-readable reason for a failed call: the envelope's
    /// `message` when present, the raw body otherwise.
    #[must_use]
    pub fn error_message(&self) -> String {
        let from_envelope = serde_json::from_str::<serde_json::Value>(&self.body)
            .ok()
            .and_then(|value| match value.get("message") {
                Some(serde_json::Value::String(text)) => Some(text.clone()),
                Some(serde_json::Value::Null) | None => None,
                Some(other) => Some(other.to_string()),
            });

        let message = from_envelope.unwrap_or_else(|| self.body.trim().to_string());
        if message.chars().count() <= MAX_MESSAGE_LEN {
            return message;
        }
        let mut truncated: String = message.chars().take(MAX_MESSAGE_LEN).collect();
        truncated.push('…');
        truncated
    }
}
