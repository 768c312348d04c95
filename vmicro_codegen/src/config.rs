use serde::{Deserialize, Serialize};

use crate::error::{CodegenError, Result};

/// Path generated code uses to reach the runtime contract crate.
pub const DEFAULT_RUNTIME_PATH: &str = "::vmicro_types";

/// Generation settings shared by every schema source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub(crate) runtime_path: String,
    pub(crate) emit_client: bool,
    pub(crate) emit_server: bool,
    pub(crate) emit_comments: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            runtime_path: DEFAULT_RUNTIME_PATH.to_string(),
            emit_client: true,
            emit_server: true,
            emit_comments: true,
        }
    }
}

impl Config {
    /// Create a new builder for configuring generation
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    pub fn runtime_path(&self) -> &str {
        &self.runtime_path
    }

    pub fn emit_client(&self) -> bool {
        self.emit_client
    }

    pub fn emit_server(&self) -> bool {
        self.emit_server
    }

    pub fn emit_comments(&self) -> bool {
        self.emit_comments
    }

    /// The runtime path parsed for interpolation into generated code.
    pub fn runtime(&self) -> Result<syn::Path> {
        syn::parse_str::<syn::Path>(&self.runtime_path).map_err(|source| {
            CodegenError::InvalidRuntimePath {
                path: self.runtime_path.clone(),
                source,
            }
        })
    }
}

/// Builder for [`Config`].
///
/// ```rust
/// use vmicro_codegen::Config;
///
/// let config = Config::builder()
///     .runtime_path("crate::rt")
///     .emit_server(false)
///     .build()
///     .expect("valid config");
/// assert!(config.emit_client());
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Path of the runtime contract crate or module
    ///
    /// Default: `::vmicro_types`
    pub fn runtime_path(mut self, path: impl Into<String>) -> Self {
        self.config.runtime_path = path.into();
        self
    }

    /// Generate the client trait, callback trait, adapter and constructor
    ///
    /// Default: true
    pub fn emit_client(mut self, enabled: bool) -> Self {
        self.config.emit_client = enabled;
        self
    }

    /// Generate the handler trait and registration function
    ///
    /// Default: true
    pub fn emit_server(mut self, enabled: bool) -> Self {
        self.config.emit_server = enabled;
        self
    }

    /// Carry schema comments over as doc comments
    ///
    /// Default: true
    pub fn emit_comments(mut self, enabled: bool) -> Self {
        self.config.emit_comments = enabled;
        self
    }

    pub fn build(self) -> Result<Config> {
        self.config.runtime()?;
        Ok(self.config)
    }
}
