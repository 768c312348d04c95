//! Read-only schema tree consumed by the generator.
//!
//! Schema sources (protoc, prost-build, the `#[vmicro_service]` macro) build
//! these once; every later stage only borrows them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque reference to a message type, resolved by a [`TypeResolver`](crate::TypeResolver).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeRef(String);

impl TypeRef {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeRef {
    fn from(reference: &str) -> Self {
        Self::new(reference)
    }
}

impl From<String> for TypeRef {
    fn from(reference: String) -> Self {
        Self(reference)
    }
}

/// One schema file: its package and the services it declares, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDescriptor {
    pub name: String,
    pub package: String,
    pub services: Vec<ServiceDescriptor>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    /// Raw IDL identifier
    pub name: String,
    /// Declared package, may be empty
    pub package: String,
    /// Methods in declaration order
    pub methods: Vec<MethodDescriptor>,
    /// Leading comment lines
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<String>,
}

impl ServiceDescriptor {
    pub fn new(name: impl Into<String>, package: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            package: package.into(),
            ..Default::default()
        }
    }

    pub fn with_method(mut self, method: MethodDescriptor) -> Self {
        self.methods.push(method);
        self
    }
}

/// A unary method. Streaming flags are carried for diagnostics only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDescriptor {
    pub name: String,
    pub input_type: TypeRef,
    pub output_type: TypeRef,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<String>,
    #[serde(default)]
    pub client_streaming: bool,
    #[serde(default)]
    pub server_streaming: bool,
}

impl MethodDescriptor {
    pub fn new(
        name: impl Into<String>,
        input_type: impl Into<TypeRef>,
        output_type: impl Into<TypeRef>,
    ) -> Self {
        Self {
            name: name.into(),
            input_type: input_type.into(),
            output_type: output_type.into(),
            comments: Vec::new(),
            client_streaming: false,
            server_streaming: false,
        }
    }

    pub fn with_comments<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.comments = lines.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_streaming(&self) -> bool {
        self.client_streaming || self.server_streaming
    }
}
