//! protoc plugin entry point.
//!
//! ```text
//! protoc --plugin=protoc-gen-vmicro --vmicro_out=plugins=vmicro:out greeter.proto
//! ```

use std::io::{Read, Write};

use anyhow::Context;
use prost::Message;
use vmicro_codegen::plugin;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let mut input = Vec::new();
    std::io::stdin()
        .read_to_end(&mut input)
        .context("Failed to read CodeGeneratorRequest from stdin")?;

    let request = plugin::decode_request(&input)?;
    log::debug!(
        "Received {} files to generate ({} in request)",
        request.file_to_generate.len(),
        request.proto_file.len()
    );

    let response = plugin::run(&request);

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(&response.encode_to_vec())
        .context("Failed to write CodeGeneratorResponse to stdout")?;
    stdout.flush()?;

    Ok(())
}
