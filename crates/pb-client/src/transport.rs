//! The seam between typed calls and the wire.

use std::future::Future;

use crate::endpoint::Endpoint;
use crate::error::ClientError;
use crate::reply::Reply;

/// Sends one JSON body to one endpoint.
///
/// Implementations return `Ok` for every response the server produced,
/// whatever its status. `Err` is reserved for calls that never completed.
pub trait Transport: Send + Sync {
    fn post(
        &self,
        endpoint: Endpoint,
        body: &serde_json::Value,
    ) -> impl Future<Output = Result<Reply, ClientError>> + Send;
}
