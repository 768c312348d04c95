use crate::emit::GeneratedArtifact;

pub(crate) const HEADER: &str = "// Code generated by protoc-gen-vmicro. DO NOT EDIT.\n";

/// Render artifacts to formatted Rust source, in the order given.
pub fn render_file(artifacts: &[GeneratedArtifact]) -> String {
    let file = syn::File {
        shebang: None,
        attrs: Vec::new(),
        items: artifacts.iter().flat_map(GeneratedArtifact::items).collect(),
    };
    prettyplease::unparse(&file)
}

/// Like [`render_file`], with a generated-code header listing the modules
/// the bindings refer to.
pub fn render_with_header<'a>(
    artifacts: &[GeneratedArtifact],
    dependencies: impl IntoIterator<Item = &'a String>,
) -> String {
    let mut out = String::from(HEADER);
    for module in dependencies {
        out.push_str("// depends on: ");
        out.push_str(module);
        out.push('\n');
    }
    out.push('\n');
    out.push_str(&render_file(artifacts));
    out
}
