use proc_macro::TokenStream;
use syn::{parse_macro_input, ItemTrait};

mod attributes;
mod service;

/// Generates vmicro client and server bindings from a trait.
///
/// Each trait item declares one RPC as `fn method(req: Request) -> Response;`.
/// Request and response types must implement `prost::Message`.
///
/// # Service Definition
///
/// ```rust,ignore
/// use vmicro_macros::vmicro_service;
///
/// #[vmicro_service(package = "helloworld")]
/// trait Greeter {
///     /// Sends a greeting
///     fn say_hello(req: HelloRequest) -> HelloReply;
///
///     /// Routed as `Greeter.Ping` instead of `Greeter.ping`
///     #[method(name = "Ping")]
///     fn ping(req: Empty) -> Empty;
/// }
/// ```
///
/// # Attributes
///
/// - `name`: service name in the schema, defaults to the trait name
/// - `package`: schema package
/// - `runtime`: path of the runtime crate, defaults to `::vmicro_types`
///
/// # Generated Code
///
/// The trait is replaced by:
/// - `GreeterService` trait - client API, one method per RPC
/// - `GreeterCallback` trait - receives the responses of client calls
/// - `NewGreeterService` - builds a `GreeterService` on top of a `vmicro_types::Client`
/// - `GreeterHandler` trait - implement this with your business logic
/// - `RegisterGreeterHandler` - registers a handler with a `vmicro_types::Server`
#[proc_macro_attribute]
pub fn vmicro_service(attr: TokenStream, item: TokenStream) -> TokenStream {
    let attr = parse_macro_input!(attr as attributes::ServiceAttr);
    let trait_def = parse_macro_input!(item as ItemTrait);

    match service::ServiceDefinition::from_item(attr, trait_def).and_then(|s| s.render()) {
        Ok(tokens) => tokens.into(),
        Err(e) => e.to_compile_error().into(),
    }
}
