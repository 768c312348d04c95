use crate::context::GenContext;
use crate::descriptor::FileDescriptor;
use crate::emit::{emit, GeneratedArtifact};
use crate::error::Result;

/// Generate bindings for every service of `file`, in declaration order.
///
/// A file without services yields nothing. The first failing service aborts
/// the whole file.
pub fn generate_file(ctx: &mut GenContext, file: &FileDescriptor) -> Result<Vec<GeneratedArtifact>> {
    ctx.enter_file(file);

    if file.services.is_empty() {
        log::debug!("{} declares no services", file.name);
        return Ok(Vec::new());
    }

    let artifacts = file
        .services
        .iter()
        .map(|service| emit(ctx, service))
        .collect::<Result<Vec<_>>>()?;

    log::debug!(
        "{}: generated {} service(s), {} dependent module(s)",
        file.name,
        artifacts.len(),
        ctx.dependencies().len()
    );

    Ok(artifacts)
}
