//! Assembly of the per-service binding document.
//!
//! [`emit`] produces a [`GeneratedArtifact`]: typed `syn` items, in output
//! order, that the renderer or the attribute macro turns into code. Tests and
//! callers can inspect the structure without matching on generated text.

use proc_macro2::TokenStream as TokenStream2;
use quote::{quote, ToTokens};
use syn::{parse_quote, ItemFn, ItemImpl, ItemStruct, ItemTrait};

use crate::context::GenContext;
use crate::descriptor::ServiceDescriptor;
use crate::error::{CodegenError, Result};
use crate::names::{ident, ResolvedNames};
use crate::signature::{build_signatures, doc_attrs, MethodSignatures};

/// Everything generated for one service.
#[derive(Debug, Clone)]
pub struct GeneratedArtifact {
    pub names: ResolvedNames,
    pub client: Option<ClientBindings>,
    pub server: Option<ServerBindings>,
}

/// Client half: interface, callback interface, adapter and its constructor.
#[derive(Debug, Clone)]
pub struct ClientBindings {
    pub client_trait: ItemTrait,
    pub callback_trait: ItemTrait,
    pub adapter_struct: ItemStruct,
    pub constructor: ItemFn,
    pub adapter_impl: ItemImpl,
    /// Routing key of each adapter method, in method order
    pub routing_keys: Vec<String>,
}

/// Server half: handler interface and registration function.
#[derive(Debug, Clone)]
pub struct ServerBindings {
    pub handler_trait: ItemTrait,
    pub register_fn: ItemFn,
}

impl GeneratedArtifact {
    /// All items in output order.
    pub fn items(&self) -> Vec<syn::Item> {
        let mut items = Vec::with_capacity(7);
        if let Some(client) = &self.client {
            items.push(syn::Item::Trait(client.client_trait.clone()));
            items.push(syn::Item::Trait(client.callback_trait.clone()));
            items.push(syn::Item::Struct(client.adapter_struct.clone()));
            items.push(syn::Item::Fn(client.constructor.clone()));
            items.push(syn::Item::Impl(client.adapter_impl.clone()));
        }
        if let Some(server) = &self.server {
            items.push(syn::Item::Trait(server.handler_trait.clone()));
            items.push(syn::Item::Fn(server.register_fn.clone()));
        }
        items
    }
}

impl ToTokens for GeneratedArtifact {
    fn to_tokens(&self, tokens: &mut TokenStream2) {
        for item in self.items() {
            item.to_tokens(tokens);
        }
    }
}

/// Build the bindings for one service.
pub fn emit(ctx: &mut GenContext, service: &ServiceDescriptor) -> Result<GeneratedArtifact> {
    if service.name.is_empty() {
        return Err(CodegenError::EmptyServiceName);
    }

    let names = ResolvedNames::resolve(&service.name, &service.package);
    log::debug!(
        "Generating {} ({} methods, namespace {})",
        names.service_alias,
        service.methods.len(),
        names.routing_namespace
    );

    let signatures = service
        .methods
        .iter()
        .map(|method| build_signatures(ctx, method))
        .collect::<Result<Vec<_>>>()?;

    let service_docs = if ctx.config().emit_comments() {
        doc_attrs(&service.comments)
    } else {
        Vec::new()
    };

    let client = if ctx.config().emit_client() {
        Some(render_client(ctx, &names, &service_docs, &signatures)?)
    } else {
        None
    };

    let server = if ctx.config().emit_server() {
        Some(render_server(ctx, &names, &service_docs, &signatures)?)
    } else {
        None
    };

    Ok(GeneratedArtifact {
        names,
        client,
        server,
    })
}

fn render_client(
    ctx: &GenContext,
    names: &ResolvedNames,
    service_docs: &[syn::Attribute],
    signatures: &[MethodSignatures],
) -> Result<ClientBindings> {
    let rt = ctx.runtime();
    let alias = ident(&names.service_alias)?;
    let callback = ident(&names.callback_ident)?;
    let adapter = ident(&names.adapter_ident)?;
    let constructor = ident(&names.constructor_ident)?;

    let client_title = format!(" Client API for {} service", names.service_ident);
    let client_methods = signatures.iter().map(|m| {
        let docs = &m.docs;
        let sig = &m.client;
        quote! {
            #(#docs)*
            #sig;
        }
    });

    let client_trait: ItemTrait = parse_quote! {
        #[doc = #client_title]
        #(#service_docs)*
        #[allow(non_snake_case)]
        pub trait #alias: Send + Sync {
            #(#client_methods)*
        }
    };

    let callback_title = format!(
        " Receives responses for calls made through [`{}`].",
        names.service_alias
    );
    let callback_methods = signatures.iter().map(|m| {
        let sig = &m.callback;
        quote! { #sig; }
    });

    let callback_trait: ItemTrait = parse_quote! {
        #[doc = #callback_title]
        #[allow(non_snake_case)]
        pub trait #callback: Send + Sync + 'static {
            #(#callback_methods)*
        }
    };

    let adapter_struct: ItemStruct = parse_quote! {
        #[allow(non_camel_case_types, dead_code)]
        struct #adapter {
            c: ::std::sync::Arc<dyn #rt::Client>,
            name: ::std::string::String,
        }
    };

    let namespace_doc = format!(
        " `name` is the routing namespace, normally `\"{}\"`.",
        names.routing_namespace
    );
    let constructor: ItemFn = parse_quote! {
        #[doc = #namespace_doc]
        ///
        /// Panics if `c` is `None`, if `name` is empty, or if the client
        /// rejects the callback handler.
        #[allow(non_snake_case)]
        pub fn #constructor<H: #callback>(
            name: &str,
            hdcb: H,
            c: ::std::option::Option<::std::sync::Arc<dyn #rt::Client>>,
        ) -> ::std::boxed::Box<dyn #alias> {
            let c = match c {
                ::std::option::Option::Some(c) => c,
                ::std::option::Option::None => panic!("transport client is None"),
            };
            if name.is_empty() {
                panic!("service name is empty");
            }
            let hdcb: ::std::sync::Arc<dyn #callback> = ::std::sync::Arc::new(hdcb);
            if let ::std::result::Result::Err(err) = c.handle(::std::boxed::Box::new(hdcb)) {
                panic!("failed to register callback handler: {}", err);
            }
            ::std::boxed::Box::new(#adapter {
                c,
                name: name.to_string(),
            })
        }
    };

    let routing_keys: Vec<String> = signatures
        .iter()
        .map(|m| names.routing_key(&m.raw_name))
        .collect();

    let adapter_methods = signatures.iter().zip(&routing_keys).map(|(m, key)| {
        let sig = &m.client;
        quote! {
            #sig {
                let r = self.c.new_request(
                    &self.name,
                    #key,
                    #rt::Bytes::from(#rt::prost::Message::encode_to_vec(req)),
                );
                self.c.call(ctx, r, opts)
            }
        }
    });

    let adapter_impl: ItemImpl = parse_quote! {
        impl #alias for #adapter {
            #(#adapter_methods)*
        }
    };

    Ok(ClientBindings {
        client_trait,
        callback_trait,
        adapter_struct,
        constructor,
        adapter_impl,
        routing_keys,
    })
}

fn render_server(
    ctx: &GenContext,
    names: &ResolvedNames,
    service_docs: &[syn::Attribute],
    signatures: &[MethodSignatures],
) -> Result<ServerBindings> {
    let rt = ctx.runtime();
    let handler = ident(&names.handler_ident)?;
    let register = ident(&names.register_ident)?;

    let server_title = format!(" Server API for {} service", names.service_ident);
    let handler_methods = signatures.iter().map(|m| {
        let docs = &m.docs;
        let sig = &m.server;
        quote! {
            #(#docs)*
            #sig;
        }
    });

    let handler_trait: ItemTrait = parse_quote! {
        #[doc = #server_title]
        #(#service_docs)*
        #[allow(non_snake_case)]
        pub trait #handler: Send + Sync + 'static {
            #(#handler_methods)*
        }
    };

    let register_fn: ItemFn = parse_quote! {
        #[allow(non_snake_case)]
        pub fn #register<H: #handler>(
            s: &dyn #rt::Server,
            hdlr: H,
        ) -> ::std::result::Result<(), #rt::Error> {
            let hdlr: ::std::sync::Arc<dyn #handler> = ::std::sync::Arc::new(hdlr);
            s.handle(::std::boxed::Box::new(hdlr))
        }
    };

    Ok(ServerBindings {
        handler_trait,
        register_fn,
    })
}
