use std::collections::BTreeSet;

use crate::config::Config;
use crate::descriptor::{FileDescriptor, TypeRef};
use crate::error::{CodegenError, Result};
use crate::resolver::TypeResolver;

/// State owned by one generation run.
///
/// Holds the settings, the type resolver, and the modules the current file
/// depends on. Nothing in here outlives the run or is shared between runs.
pub struct GenContext {
    config: Config,
    runtime: syn::Path,
    resolver: Box<dyn TypeResolver>,
    dependencies: BTreeSet<String>,
}

impl GenContext {
    pub fn new(config: Config, resolver: impl TypeResolver + 'static) -> Result<Self> {
        let runtime = config.runtime()?;
        Ok(Self {
            config,
            runtime,
            resolver: Box::new(resolver),
            dependencies: BTreeSet::new(),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn runtime(&self) -> &syn::Path {
        &self.runtime
    }

    /// Modules referenced by the file currently being generated.
    pub fn dependencies(&self) -> &BTreeSet<String> {
        &self.dependencies
    }

    pub(crate) fn enter_file(&mut self, file: &FileDescriptor) {
        self.dependencies.clear();
        self.resolver.enter_file(file);
    }

    /// Resolve a type reference and record its originating module.
    pub fn resolve_type(&mut self, type_ref: &TypeRef) -> Result<syn::Type> {
        let resolved = self.resolver.resolve(type_ref)?;
        if let Some(module) = resolved.module {
            self.dependencies.insert(module);
        }

        syn::parse_str::<syn::Type>(&resolved.path).map_err(|source| {
            CodegenError::InvalidTypePath {
                path: resolved.path,
                source,
            }
        })
    }
}
