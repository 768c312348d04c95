//! Call-site types shared by generated service code and vmicro transports.
//!
//! These are the values that flow through the generated client adapters:
//!
//! - [`Context`] - Per-call metadata handed to every client, callback and handler method
//! - [`CallOption`] - Per-call overrides forwarded untouched to [`Client::call`](crate::Client::call)
//! - [`Request`] - Outbound request built by [`Client::new_request`](crate::Client::new_request)

use std::collections::BTreeMap;
use std::time::Duration;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Execution context for a single call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    metadata: BTreeMap<String, String>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a metadata entry, replacing any previous value for `key`.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn metadata(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }

    pub fn metadata_iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.metadata
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Per-call option. Interpretation belongs to the transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallOption {
    /// Give up waiting for the transport after this long
    Timeout(Duration),
    /// Number of additional attempts the transport may make
    Retries(u32),
    /// Bypass discovery and send to this address
    Address(String),
}

/// Outbound request addressed by namespace and routing key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    /// Routing namespace the adapter was constructed with
    pub service: String,
    /// Routing key, `<Service>.<method>`
    pub endpoint: String,
    /// Encoded request message
    pub body: Bytes,
}

impl Request {
    pub fn new(service: impl Into<String>, endpoint: impl Into<String>, body: Bytes) -> Self {
        Self {
            service: service.into(),
            endpoint: endpoint.into(),
            body,
        }
    }
}
