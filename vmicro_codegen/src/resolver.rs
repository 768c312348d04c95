//! Type reference resolution.
//!
//! A [`TypeResolver`] turns the opaque [`TypeRef`]s of a schema into Rust
//! type paths and reports which module each type comes from, so the caller
//! can track what the generated file depends on.

use std::collections::HashMap;
use std::iter;

use prost_types::{DescriptorProto, FileDescriptorProto};

use crate::descriptor::{FileDescriptor, TypeRef};
use crate::error::{CodegenError, Result};
use crate::names::{rust_module_name, rust_type_name};

/// A resolved type reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedType {
    /// Rust type path as it should appear in generated code
    pub path: String,
    /// Module the type originates from, if it is not the current one
    pub module: Option<String>,
}

impl ResolvedType {
    pub fn local(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            module: None,
        }
    }
}

pub trait TypeResolver {
    /// Called before the services of `file` are generated.
    fn enter_file(&mut self, _file: &FileDescriptor) {}

    fn resolve(&mut self, type_ref: &TypeRef) -> Result<ResolvedType>;
}

/// Treats every reference as an already valid Rust type.
#[derive(Debug, Default, Clone, Copy)]
pub struct VerbatimResolver;

impl TypeResolver for VerbatimResolver {
    fn resolve(&mut self, type_ref: &TypeRef) -> Result<ResolvedType> {
        Ok(ResolvedType::local(type_ref.as_str()))
    }
}

/// Lookup table filled by a schema source that already resolved its types.
#[derive(Debug, Default, Clone)]
pub struct PrebuiltResolver {
    types: HashMap<TypeRef, ResolvedType>,
}

impl PrebuiltResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, type_ref: TypeRef, resolved: ResolvedType) {
        self.types.insert(type_ref, resolved);
    }
}

impl TypeResolver for PrebuiltResolver {
    fn resolve(&mut self, type_ref: &TypeRef) -> Result<ResolvedType> {
        self.types
            .get(type_ref)
            .cloned()
            .ok_or_else(|| CodegenError::UnresolvedType {
                type_ref: type_ref.to_string(),
            })
    }
}

/// Resolves fully-qualified protobuf names (`.pkg.Outer.Inner`) to the paths
/// prost generates, relative to the package of the file being generated.
///
/// Generated bindings are expected to be included in the same module as the
/// prost output for their package.
#[derive(Debug, Default, Clone)]
pub struct ProtoTypeResolver {
    /// Fully-qualified message name -> declaring package
    packages: HashMap<String, String>,
    current_package: String,
}

impl ProtoTypeResolver {
    pub fn from_files<'a>(files: impl IntoIterator<Item = &'a FileDescriptorProto>) -> Self {
        let mut resolver = Self::default();
        for file in files {
            let package = file.package();
            let prefix = if package.is_empty() {
                String::new()
            } else {
                format!(".{package}")
            };
            for message in &file.message_type {
                resolver.register(&prefix, package, message);
            }
        }
        resolver
    }

    fn register(&mut self, prefix: &str, package: &str, message: &DescriptorProto) {
        let name = format!("{prefix}.{}", message.name());
        for nested in &message.nested_type {
            self.register(&name, package, nested);
        }
        self.packages.insert(name, package.to_string());
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

impl TypeResolver for ProtoTypeResolver {
    fn enter_file(&mut self, file: &FileDescriptor) {
        self.current_package = file.package.clone();
    }

    fn resolve(&mut self, type_ref: &TypeRef) -> Result<ResolvedType> {
        let Some(package) = self.packages.get(type_ref.as_str()) else {
            log::warn!("Unknown message type {}", type_ref);
            return Err(CodegenError::UnresolvedType {
                type_ref: type_ref.to_string(),
            });
        };

        let module = (package != &self.current_package).then(|| package.clone());

        Ok(ResolvedType {
            path: relative_path(&self.current_package, type_ref.as_str()),
            module,
        })
    }
}

/// Path from `local_package` to the fully-qualified `fq_name`: one `super`
/// per unshared package segment, then snake_case modules for the rest of the
/// target package and any enclosing messages.
fn relative_path(local_package: &str, fq_name: &str) -> String {
    let mut local = local_package
        .split('.')
        .filter(|segment| !segment.is_empty())
        .peekable();

    let mut ident_path = fq_name.trim_start_matches('.').split('.');
    let ident_type = ident_path.next_back().unwrap_or_default();
    let mut ident_path = ident_path.peekable();

    while local.peek().is_some() && local.peek() == ident_path.peek() {
        local.next();
        ident_path.next();
    }

    local
        .map(|_| "super".to_string())
        .chain(ident_path.map(rust_module_name))
        .chain(iter::once(rust_type_name(ident_type)))
        .collect::<Vec<_>>()
        .join("::")
}
