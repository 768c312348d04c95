use syn::parse_quote;

use crate::context::GenContext;
use crate::descriptor::MethodDescriptor;
use crate::error::Result;
use crate::names::{ident, pascal_case};

/// The three signatures synthesized for one method.
///
/// All share the `ctx`, `req` prefix; the client call takes `opts` instead of
/// a response, which arrives through the callback.
#[derive(Debug, Clone)]
pub struct MethodSignatures {
    /// Method name as declared in the schema
    pub raw_name: String,
    pub ident: syn::Ident,
    pub docs: Vec<syn::Attribute>,
    /// `fn M(&self, ctx: &Context, req: &In, opts: &[CallOption]) -> Result<(), Error>`
    pub client: syn::Signature,
    /// `fn M(&self, ctx: &Context, req: &In, rsp: &Out)`
    pub callback: syn::Signature,
    /// `fn M(&self, ctx: &Context, req: &In, rsp: &mut Out) -> Result<(), Error>`
    pub server: syn::Signature,
}

pub fn build_signatures(ctx: &mut GenContext, method: &MethodDescriptor) -> Result<MethodSignatures> {
    if method.is_streaming() {
        log::warn!(
            "Method {} is declared streaming, generating a unary binding",
            method.name
        );
    }

    let method_ident = ident(&pascal_case(&method.name))?;
    let input = ctx.resolve_type(&method.input_type)?;
    let output = ctx.resolve_type(&method.output_type)?;

    let docs = if ctx.config().emit_comments() {
        doc_attrs(&method.comments)
    } else {
        Vec::new()
    };

    let rt = ctx.runtime();

    let client: syn::Signature = parse_quote! {
        fn #method_ident(
            &self,
            ctx: &#rt::Context,
            req: &#input,
            opts: &[#rt::CallOption]
        ) -> ::std::result::Result<(), #rt::Error>
    };

    let callback: syn::Signature = parse_quote! {
        fn #method_ident(&self, ctx: &#rt::Context, req: &#input, rsp: &#output)
    };

    let server: syn::Signature = parse_quote! {
        fn #method_ident(
            &self,
            ctx: &#rt::Context,
            req: &#input,
            rsp: &mut #output
        ) -> ::std::result::Result<(), #rt::Error>
    };

    Ok(MethodSignatures {
        raw_name: method.name.clone(),
        ident: method_ident,
        docs,
        client,
        callback,
        server,
    })
}

pub(crate) fn doc_attrs(lines: &[String]) -> Vec<syn::Attribute> {
    lines
        .iter()
        .map(|line| -> syn::Attribute { parse_quote!(#[doc = #line]) })
        .collect()
}
