//! protoc plugin protocol: `CodeGeneratorRequest` in, `CodeGeneratorResponse` out.

use std::collections::HashMap;

use prost::Message;
use prost_types::compiler::code_generator_response::{Feature, File};
use prost_types::compiler::{CodeGeneratorRequest, CodeGeneratorResponse};
use prost_types::FileDescriptorProto;

use crate::context::GenContext;
use crate::descriptor::{FileDescriptor, MethodDescriptor, ServiceDescriptor, TypeRef};
use crate::driver::generate_file;
use crate::error::Result;
use crate::params::PluginParams;
use crate::render::render_with_header;
use crate::resolver::ProtoTypeResolver;

// Field numbers used in SourceCodeInfo location paths
const SERVICE_FIELD: i32 = 6;
const METHOD_FIELD: i32 = 2;

pub fn decode_request(bytes: &[u8]) -> Result<CodeGeneratorRequest> {
    Ok(CodeGeneratorRequest::decode(bytes)?)
}

/// Run the generator over a request. Failures are reported through the
/// response's `error` field, as protoc expects.
pub fn run(request: &CodeGeneratorRequest) -> CodeGeneratorResponse {
    let supported_features = Some(Feature::Proto3Optional as u64);

    match generate(request) {
        Ok(file) => CodeGeneratorResponse {
            supported_features,
            file,
            ..Default::default()
        },
        Err(e) => {
            log::error!("Generation failed: {e}");
            CodeGeneratorResponse {
                error: Some(e.to_string()),
                supported_features,
                ..Default::default()
            }
        }
    }
}

fn generate(request: &CodeGeneratorRequest) -> Result<Vec<File>> {
    let params = PluginParams::parse(request.parameter())?;
    if !params.is_enabled() {
        log::debug!("{} not among requested plugins", crate::params::PLUGIN_NAME);
        return Ok(Vec::new());
    }

    let resolver = ProtoTypeResolver::from_files(&request.proto_file);
    let mut ctx = GenContext::new(params.config, resolver)?;
    let mut out = Vec::new();

    for name in &request.file_to_generate {
        let Some(proto) = request.proto_file.iter().find(|f| f.name() == name) else {
            log::warn!("{name} was requested but not provided");
            continue;
        };

        let file = file_descriptor(proto);
        let artifacts = generate_file(&mut ctx, &file)?;
        if artifacts.is_empty() {
            continue;
        }

        out.push(File {
            name: Some(output_name(&file.name)),
            content: Some(render_with_header(&artifacts, ctx.dependencies())),
            ..Default::default()
        });
    }

    Ok(out)
}

/// `helloworld/greeter.proto` -> `helloworld/greeter.vmicro.rs`
fn output_name(proto_name: &str) -> String {
    let stem = proto_name.strip_suffix(".proto").unwrap_or(proto_name);
    format!("{stem}.vmicro.rs")
}

fn file_descriptor(proto: &FileDescriptorProto) -> FileDescriptor {
    let comments = comment_index(proto);
    let lookup = |path: &[i32]| comments.get(path).cloned().unwrap_or_default();

    let services = proto
        .service
        .iter()
        .enumerate()
        .map(|(i, service)| {
            let service_path = [SERVICE_FIELD, i as i32];
            let methods = service
                .method
                .iter()
                .enumerate()
                .map(|(j, method)| MethodDescriptor {
                    name: method.name().to_string(),
                    input_type: TypeRef::new(method.input_type()),
                    output_type: TypeRef::new(method.output_type()),
                    comments: lookup(&[SERVICE_FIELD, i as i32, METHOD_FIELD, j as i32][..]),
                    client_streaming: method.client_streaming(),
                    server_streaming: method.server_streaming(),
                })
                .collect();

            ServiceDescriptor {
                name: service.name().to_string(),
                package: proto.package().to_string(),
                methods,
                comments: lookup(&service_path[..]),
            }
        })
        .collect();

    FileDescriptor {
        name: proto.name().to_string(),
        package: proto.package().to_string(),
        services,
    }
}

fn comment_index(proto: &FileDescriptorProto) -> HashMap<Vec<i32>, Vec<String>> {
    proto
        .source_code_info
        .iter()
        .flat_map(|info| &info.location)
        .filter_map(|location| {
            let text = location.leading_comments.as_deref()?;
            Some((
                location.path.clone(),
                text.lines().map(str::to_string).collect(),
            ))
        })
        .collect()
}
