use thiserror::Error;

pub type Result<T, E = CodegenError> = std::result::Result<T, E>;

/// Errors that abort generation of the enclosing file.
#[derive(Error, Debug)]
pub enum CodegenError {
    #[error("Service name is empty")]
    EmptyServiceName,

    #[error("Type reference '{type_ref}' could not be resolved")]
    UnresolvedType { type_ref: String },

    #[error("Resolved type '{path}' is not a valid Rust type: {source}")]
    InvalidTypePath {
        path: String,
        #[source]
        source: syn::Error,
    },

    #[error("'{name}' is not a valid Rust identifier")]
    InvalidIdentifier { name: String },

    #[error("Runtime path '{path}' is not a valid Rust path: {source}")]
    InvalidRuntimePath {
        path: String,
        #[source]
        source: syn::Error,
    },

    #[error("Invalid value '{value}' for plugin parameter '{key}'")]
    InvalidParameter { key: String, value: String },

    #[error("Failed to decode CodeGeneratorRequest: {0}")]
    Decode(#[from] prost::DecodeError),
}
