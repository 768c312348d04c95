use prost_build::{Service, ServiceGenerator};

use crate::config::Config;
use crate::context::GenContext;
use crate::descriptor::{FileDescriptor, MethodDescriptor, ServiceDescriptor, TypeRef};
use crate::driver::generate_file;
use crate::error::Result;
use crate::render::render_file;
use crate::resolver::{PrebuiltResolver, ResolvedType};

/// `prost_build::ServiceGenerator` emitting vmicro bindings next to the
/// prost messages of each package.
///
/// ```rust,ignore
/// prost_build::Config::new()
///     .service_generator(Box::new(VMicroServiceGenerator::default()))
///     .compile_protos(&["proto/helloworld.proto"], &["proto"])?;
/// ```
#[derive(Debug, Default)]
pub struct VMicroServiceGenerator {
    config: Config,
}

impl VMicroServiceGenerator {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Generate one service into `buf`.
    pub fn generate_service(&self, service: &Service, buf: &mut String) -> Result<()> {
        let (descriptor, resolver) = from_prost(service);
        let mut ctx = GenContext::new(self.config.clone(), resolver)?;

        let file = FileDescriptor {
            name: service.package.clone(),
            package: service.package.clone(),
            services: vec![descriptor],
        };
        let artifacts = generate_file(&mut ctx, &file)?;

        buf.push_str(&render_file(&artifacts));
        Ok(())
    }
}

impl ServiceGenerator for VMicroServiceGenerator {
    fn generate(&mut self, service: Service, buf: &mut String) {
        // prost-build offers no error channel; failing the build script is the only option
        if let Err(e) = self.generate_service(&service, buf) {
            panic!(
                "vmicro: failed to generate bindings for service {}: {}",
                service.proto_name, e
            );
        }
    }
}

/// Adapt a prost-build service. prost has already resolved every type, so the
/// resolver is a lookup table keyed by the protobuf names.
fn from_prost(service: &Service) -> (ServiceDescriptor, PrebuiltResolver) {
    let mut resolver = PrebuiltResolver::new();
    let mut register = |proto_type: &str, rust_type: &str| {
        let module = proto_type
            .trim_start_matches('.')
            .rsplit_once('.')
            .map(|(package, _)| package)
            .filter(|package| *package != service.package)
            .map(str::to_string);
        resolver.insert(
            TypeRef::new(proto_type),
            ResolvedType {
                path: rust_type.to_string(),
                module,
            },
        );
    };

    let methods = service
        .methods
        .iter()
        .map(|method| {
            register(&method.input_proto_type, &method.input_type);
            register(&method.output_proto_type, &method.output_type);
            MethodDescriptor {
                name: method.proto_name.clone(),
                input_type: TypeRef::new(method.input_proto_type.as_str()),
                output_type: TypeRef::new(method.output_proto_type.as_str()),
                comments: method.comments.leading.clone(),
                client_streaming: method.client_streaming,
                server_streaming: method.server_streaming,
            }
        })
        .collect();

    let descriptor = ServiceDescriptor {
        name: service.proto_name.clone(),
        package: service.package.clone(),
        methods,
        comments: service.comments.leading.clone(),
    };

    (descriptor, resolver)
}
