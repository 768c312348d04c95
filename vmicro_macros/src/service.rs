use crate::attributes::{doc_lines, parse_method_attr, ServiceAttr};
use proc_macro2::TokenStream;
use quote::{quote, ToTokens};
use syn::{FnArg, ItemTrait, ReturnType, TraitItem, TraitItemFn};
use vmicro_codegen::{
    emit, Config, GenContext, MethodDescriptor, ServiceDescriptor, TypeRef, VerbatimResolver,
};

/// A service trait converted to the generator's descriptor model.
#[derive(Debug)]
pub struct ServiceDefinition {
    pub trait_ident: syn::Ident,
    pub descriptor: ServiceDescriptor,
    pub runtime: Option<String>,
}

impl ServiceDefinition {
    pub fn from_item(attr: ServiceAttr, trait_def: ItemTrait) -> syn::Result<Self> {
        if !trait_def.generics.params.is_empty() {
            return Err(syn::Error::new_spanned(
                &trait_def.generics,
                "Generic service traits are not supported",
            ));
        }

        let name = attr.name.unwrap_or_else(|| trait_def.ident.to_string());
        if name.is_empty() {
            return Err(syn::Error::new_spanned(
                &trait_def.ident,
                "Service name must not be empty",
            ));
        }

        let mut descriptor = ServiceDescriptor::new(name, attr.package.unwrap_or_default());
        descriptor.comments = doc_lines(&trait_def.attrs);

        for item in trait_def.items {
            let TraitItem::Fn(method) = item else {
                return Err(syn::Error::new_spanned(
                    item,
                    "Only methods allowed in service trait",
                ));
            };
            descriptor.methods.push(method_descriptor(method)?);
        }

        Ok(Self {
            trait_ident: trait_def.ident,
            descriptor,
            runtime: attr.runtime,
        })
    }

    /// Generate the bindings. The service trait itself is replaced by them.
    pub fn render(&self) -> syn::Result<TokenStream> {
        let to_syn = |e: vmicro_codegen::CodegenError| {
            syn::Error::new_spanned(&self.trait_ident, e.to_string())
        };

        let mut config = Config::builder();
        if let Some(runtime) = &self.runtime {
            config = config.runtime_path(runtime.as_str());
        }
        let config = config.build().map_err(to_syn)?;

        let mut ctx = GenContext::new(config, VerbatimResolver).map_err(to_syn)?;
        let artifact = emit(&mut ctx, &self.descriptor).map_err(to_syn)?;

        Ok(artifact.into_token_stream())
    }
}

/// `fn name(req: Input) -> Output;`
fn method_descriptor(method: TraitItemFn) -> syn::Result<MethodDescriptor> {
    let sig = &method.sig;

    if let Some(body) = &method.default {
        return Err(syn::Error::new_spanned(
            body,
            "Service methods cannot have a default body",
        ));
    }
    if sig.asyncness.is_some() {
        return Err(syn::Error::new_spanned(
            sig.asyncness,
            "Service methods must not be async",
        ));
    }
    if !sig.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &sig.generics,
            "Service methods cannot be generic",
        ));
    }

    let mut inputs = sig.inputs.iter();
    let input_type = match (inputs.next(), inputs.next()) {
        (Some(FnArg::Typed(arg)), None) => &arg.ty,
        (Some(FnArg::Receiver(receiver)), _) => {
            return Err(syn::Error::new_spanned(
                receiver,
                "Service methods take no receiver, the generated traits add it",
            ));
        }
        _ => {
            return Err(syn::Error::new_spanned(
                &sig.inputs,
                "Service methods take exactly one request argument",
            ));
        }
    };

    let output_type = match &sig.output {
        ReturnType::Type(_, ty) => ty,
        ReturnType::Default => {
            return Err(syn::Error::new_spanned(
                sig,
                "Service methods must declare a response type",
            ));
        }
    };

    let name = match parse_method_attr(&method.attrs)? {
        Some(attr) => attr.name,
        None => sig.ident.to_string(),
    };

    Ok(MethodDescriptor::new(
        name,
        type_ref(input_type),
        type_ref(output_type),
    )
    .with_comments(doc_lines(&method.attrs)))
}

fn type_ref(ty: &syn::Type) -> TypeRef {
    TypeRef::new(quote!(#ty).to_string())
}
