//! Runtime contract for vmicro service bindings.
//!
//! Code produced by `vmicro_codegen` (either through `protoc-gen-vmicro`, a
//! prost-build service generator, or the `#[vmicro_service]` macro) only
//! talks to a transport through the [`Client`] and [`Server`] traits defined
//! here. A transport implements these traits; the generated adapters never
//! inspect or wrap the errors it returns.

use std::any::Any;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod protocol;

pub use bytes::Bytes;
pub use protocol::{CallOption, Context, Request};

// Generated adapters encode requests through this path so that user crates
// only need to name `vmicro_types`.
pub use prost;

/// Type-erased callback or handler implementation handed to a transport.
///
/// Generated code always registers an `Arc<dyn <Name>Callback>` or an
/// `Arc<dyn <Name>Handler>`; transports get it back with [`registered`].
pub type BoxedHandler = Box<dyn Any + Send + Sync>;

/// Recover a registered service trait object.
///
/// ```rust,ignore
/// if let Some(callback) = vmicro_types::registered::<dyn GreeterCallback>(&boxed) {
///     callback.SayHello(&ctx, &req, &rsp);
/// }
/// ```
pub fn registered<T>(handler: &BoxedHandler) -> Option<Arc<T>>
where
    T: ?Sized + Send + Sync + 'static,
{
    handler.downcast_ref::<Arc<T>>().cloned()
}

/// Error surfaced by a transport to generated code.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Error {
    #[error("Transport failure: {0}")]
    Transport(String),

    #[error("Call to '{endpoint}' timed out")]
    Timeout { endpoint: String },

    #[error("Handler registration rejected: {0}")]
    Registration(String),

    #[error("Remote handler failed: {message}")]
    Handler { message: String },

    #[error("Failed to decode message: {0}")]
    Decode(String),
}

impl Error {
    pub fn transport<E: ToString>(e: E) -> Self {
        Error::Transport(e.to_string())
    }

    pub fn handler<E: ToString>(e: E) -> Self {
        Error::Handler {
            message: e.to_string(),
        }
    }
}

impl From<prost::DecodeError> for Error {
    fn from(e: prost::DecodeError) -> Self {
        Error::Decode(e.to_string())
    }
}

/// Client half of a transport.
pub trait Client: Send + Sync {
    /// Build an outbound request for `endpoint` within the `service` namespace.
    fn new_request(&self, service: &str, endpoint: &str, body: Bytes) -> Request;

    /// Perform the call. Responses are delivered through the registered callback.
    fn call(&self, ctx: &Context, request: Request, opts: &[CallOption]) -> Result<(), Error>;

    /// Register the callback implementation that receives responses.
    fn handle(&self, callback: BoxedHandler) -> Result<(), Error>;
}

/// Server half of a transport.
pub trait Server: Send + Sync {
    /// Register a handler implementation.
    fn handle(&self, handler: BoxedHandler) -> Result<(), Error>;
}
