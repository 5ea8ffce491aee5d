//! In-memory transport for tests.
//!
//! Replies are scripted per endpoint and every call is recorded, so tests can
//! assert call order, call count and request bodies without a server.
//!
//! Reply resolution order for a call: a scripted transport failure, then a
//! field-matching reply, then a one-shot reply, then the endpoint default,
//! then an empty `200` envelope.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde_json::Value;

use crate::endpoint::Endpoint;
use crate::error::ClientError;
use crate::reply::Reply;
use crate::transport::Transport;

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub endpoint: Endpoint,
    pub body: Value,
}

#[derive(Debug)]
struct MatchRule {
    endpoint: Endpoint,
    field: String,
    value: Value,
    reply: Reply,
}

#[derive(Debug, Default)]
struct Script {
    defaults: HashMap<Endpoint, Reply>,
    once: HashMap<Endpoint, VecDeque<Reply>>,
    matching: Vec<MatchRule>,
    failures: HashMap<Endpoint, String>,
    calls: Vec<RecordedCall>,
}

#[derive(Debug, Default)]
pub struct RecordingTransport {
    script: Mutex<Script>,
}

impl RecordingTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn script(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Reply to every call on `endpoint` with `reply`.
    pub fn respond(&self, endpoint: Endpoint, reply: Reply) -> &Self {
        self.script().defaults.insert(endpoint, reply);
        self
    }

    /// Reply to the next unmatched call on `endpoint` with `reply`.
    pub fn respond_once(&self, endpoint: Endpoint, reply: Reply) -> &Self {
        self.script()
            .once
            .entry(endpoint)
            .or_default()
            .push_back(reply);
        self
    }

    /// Reply with `reply` whenever the body's `field` equals `value`.
    pub fn respond_matching(
        &self,
        endpoint: Endpoint,
        field: &str,
        value: impl Into<Value>,
        reply: Reply,
    ) -> &Self {
        self.script().matching.push(MatchRule {
            endpoint,
            field: field.to_string(),
            value: value.into(),
            reply,
        });
        self
    }

    /// Fail every call on `endpoint` as if the server were unreachable.
    pub fn fail_on(&self, endpoint: Endpoint, message: &str) -> &Self {
        self.script().failures.insert(endpoint, message.to_string());
        self
    }

    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.script().calls.clone()
    }

    #[must_use]
    pub fn endpoints(&self) -> Vec<Endpoint> {
        self.script().calls.iter().map(|call| call.endpoint).collect()
    }

    /// Bodies sent to one endpoint, in call order.
    #[must_use]
    pub fn bodies(&self, endpoint: Endpoint) -> Vec<Value> {
        self.script()
            .calls
            .iter()
            .filter(|call| call.endpoint == endpoint)
            .map(|call| call.body.clone())
            .collect()
    }

    fn resolve(&self, endpoint: Endpoint, body: &Value) -> Result<Reply, ClientError> {
        let mut script = self.script();
        script.calls.push(RecordedCall {
            endpoint,
            body: body.clone(),
        });

        if let Some(message) = script.failures.get(&endpoint) {
            return Err(ClientError::Transport {
                endpoint: endpoint.name(),
                message: message.clone(),
            });
        }

        if let Some(rule) = script
            .matching
            .iter()
            .find(|rule| rule.endpoint == endpoint && body.get(&rule.field) == Some(&rule.value))
        {
            return Ok(rule.reply.clone());
        }

        if let Some(reply) = script.once.get_mut(&endpoint).and_then(VecDeque::pop_front) {
            return Ok(reply);
        }

        Ok(script
            .defaults
            .get(&endpoint)
            .cloned()
            .unwrap_or_else(|| Reply::ok(&Value::Null)))
    }
}

impl Transport for RecordingTransport {
    async fn post(&self, endpoint: Endpoint, body: &Value) -> Result<Reply, ClientError> {
        self.resolve(endpoint, body)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn resolution_order() {
        let transport = RecordingTransport::new();
        transport
            .respond(Endpoint::TestCreate, Reply::new(201, "default"))
            .respond_once(Endpoint::TestCreate, Reply::new(202, "once"))
            .respond_matching(Endpoint::TestCreate, "name", "special", Reply::new(409, "match"));

        let special = transport
            .post(Endpoint::TestCreate, &json!({"name": "special"}))
            .await
            .unwrap();
        let first = transport
            .post(Endpoint::TestCreate, &json!({"name": "a"}))
            .await
            .unwrap();
        let second = transport
            .post(Endpoint::TestCreate, &json!({"name": "b"}))
            .await
            .unwrap();
        let unscripted = transport.post(Endpoint::TestRead, &json!({})).await.unwrap();

        assert_eq!(special.status, 409);
        assert_eq!(first.status, 202);
        assert_eq!(second.status, 201);
        assert_eq!(unscripted.status, 200);
        assert_eq!(transport.calls().len(), 4);
        assert_eq!(transport.bodies(Endpoint::TestCreate).len(), 3);
    }

    #[tokio::test]
    async fn failures_are_recorded_too() {
        let transport = RecordingTransport::new();
        transport.fail_on(Endpoint::Login, "dns");

        assert!(transport.post(Endpoint::Login, &json!({})).await.is_err());
        assert_eq!(transport.endpoints(), vec![Endpoint::Login]);
    }
}
