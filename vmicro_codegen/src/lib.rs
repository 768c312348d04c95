//! Binding generator for vmicro services.
//!
//! Turns a service descriptor (from protoc, prost-build or the
//! `#[vmicro_service]` macro) into Rust bindings for the `vmicro_types`
//! runtime:
//!
//! - `<Name>Service`: client interface
//! - `<Name>Callback`: receives responses for client calls
//! - `New<Name>Service`: constructor of the transport backed client adapter
//! - `<Name>Handler` and `Register<Name>Handler`: server side
//!
//! Generated code names message types the way prost does, so it is meant to
//! be `include!`d in the same module as the prost output for its package.
//!
//! ```rust,ignore
//! // build.rs
//! prost_build::Config::new()
//!     .service_generator(Box::new(vmicro_codegen::VMicroServiceGenerator::default()))
//!     .compile_protos(&["proto/helloworld.proto"], &["proto"])?;
//! ```

mod config;
mod context;
mod descriptor;
mod driver;
mod emit;
mod error;
mod names;
mod params;
pub mod plugin;
mod render;
mod resolver;
mod service_generator;
mod signature;

pub use config::{Config, ConfigBuilder, DEFAULT_RUNTIME_PATH};
pub use context::GenContext;
pub use descriptor::{FileDescriptor, MethodDescriptor, ServiceDescriptor, TypeRef};
pub use driver::generate_file;
pub use emit::{emit, ClientBindings, GeneratedArtifact, ServerBindings};
pub use error::{CodegenError, Result};
pub use names::{pascal_case, rust_module_name, rust_type_name, unexport, ResolvedNames};
pub use params::{add_plugin_to_params, PluginParams, PLUGIN_NAME};
pub use render::{render_file, render_with_header};
pub use resolver::{
    PrebuiltResolver, ProtoTypeResolver, ResolvedType, TypeResolver, VerbatimResolver,
};
pub use service_generator::VMicroServiceGenerator;
pub use signature::{build_signatures, MethodSignatures};
