//! End-to-end generation through the public API: descriptors in, bindings out.

use prost_types::{DescriptorProto, FileDescriptorProto};
use vmicro_codegen::{
    emit, generate_file, render_with_header, Config, FileDescriptor, GenContext,
    MethodDescriptor, ProtoTypeResolver, ResolvedNames, ServiceDescriptor, VerbatimResolver,
};

fn message(name: &str, nested: Vec<DescriptorProto>) -> DescriptorProto {
    DescriptorProto {
        name: Some(name.to_string()),
        nested_type: nested,
        ..Default::default()
    }
}

fn proto(name: &str, package: &str, messages: Vec<DescriptorProto>) -> FileDescriptorProto {
    FileDescriptorProto {
        name: Some(name.to_string()),
        package: Some(package.to_string()),
        message_type: messages,
        ..Default::default()
    }
}

fn verbatim() -> GenContext {
    GenContext::new(Config::default(), VerbatimResolver).unwrap()
}

#[test]
fn test_alias_naming_table() {
    let cases = [
        ("greeter", "GreeterService"),
        ("user_service", "UserService"),
        ("Greeter Service", "GreeterService"),
        ("Service", "Service"),
        ("ServiceService", "ServiceService"),
        ("account2fa", "Account2FaService"),
    ];

    for (raw, alias) in cases {
        let names = ResolvedNames::resolve(raw, "pkg");
        assert_eq!(names.service_alias, alias, "alias of {raw:?}");

        let mut expected_adapter = alias.to_string();
        expected_adapter.replace_range(..1, &alias[..1].to_lowercase());
        assert_eq!(names.adapter_ident, expected_adapter, "adapter of {raw:?}");
    }
}

#[test]
fn test_traits_follow_method_order() {
    let service = ServiceDescriptor::new("Inventory", "store")
        .with_method(MethodDescriptor::new("ListItems", "ListRequest", "ListReply"))
        .with_method(MethodDescriptor::new("add_item", "AddRequest", "AddReply"))
        .with_method(MethodDescriptor::new("RemoveItem", "RemoveRequest", "RemoveReply"));

    let artifact = emit(&mut verbatim(), &service).unwrap();
    let client = artifact.client.as_ref().unwrap();
    let server = artifact.server.as_ref().unwrap();

    let fn_names = |items: &[syn::TraitItem]| -> Vec<String> {
        items
            .iter()
            .filter_map(|item| match item {
                syn::TraitItem::Fn(f) => Some(f.sig.ident.to_string()),
                _ => None,
            })
            .collect()
    };

    let expected = vec!["ListItems", "AddItem", "RemoveItem"];
    assert_eq!(fn_names(&client.client_trait.items), expected);
    assert_eq!(fn_names(&client.callback_trait.items), expected);
    assert_eq!(fn_names(&server.handler_trait.items), expected);
    assert_eq!(client.adapter_impl.items.len(), 3);

    assert_eq!(
        client.routing_keys,
        vec![
            "Inventory.ListItems",
            "Inventory.add_item",
            "Inventory.RemoveItem"
        ]
    );
}

#[test]
fn test_empty_service_still_has_constructor_and_registration() {
    let file = FileDescriptor {
        name: "empty.proto".to_string(),
        package: "empty".to_string(),
        services: vec![ServiceDescriptor::new("Nothing", "empty")],
    };

    let artifacts = generate_file(&mut verbatim(), &file).unwrap();
    assert_eq!(artifacts.len(), 1);

    let items = artifacts[0].items();
    assert_eq!(items.len(), 7);

    let source = render_with_header(&artifacts, std::iter::empty());
    assert!(source.contains("pub trait NothingService"));
    assert!(source.contains("pub fn NewNothingService"));
    assert!(source.contains("pub fn RegisterNothingHandler"));
}

#[test]
fn test_file_without_services_is_noop() {
    let file = FileDescriptor {
        name: "messages.proto".to_string(),
        package: "messages".to_string(),
        services: Vec::new(),
    };

    assert!(generate_file(&mut verbatim(), &file).unwrap().is_empty());
}

#[test]
fn test_cross_package_types() {
    let files = [
        proto(
            "store/v1/types.proto",
            "store.v1",
            vec![message("Order", vec![message("Line_item", Vec::new())])],
        ),
        proto("common.proto", "common", vec![message("Empty", Vec::new())]),
        proto("store/v1/api.proto", "store.v1.api", Vec::new()),
    ];
    let resolver = ProtoTypeResolver::from_files(&files);
    let mut ctx = GenContext::new(Config::default(), resolver).unwrap();

    let file = FileDescriptor {
        name: "store/v1/api.proto".to_string(),
        package: "store.v1.api".to_string(),
        services: vec![ServiceDescriptor::new("Orders", "store.v1.api")
            .with_method(MethodDescriptor::new(
                "GetLine",
                ".store.v1.Order.Line_item",
                ".common.Empty",
            ))],
    };

    let artifacts = generate_file(&mut ctx, &file).unwrap();
    let deps: Vec<_> = ctx.dependencies().iter().cloned().collect();
    assert_eq!(deps, vec!["common", "store.v1"]);

    let source = render_with_header(&artifacts, ctx.dependencies());
    assert!(source.contains("req: &super::order::LineItem"));
    assert!(source.contains("rsp: &mut super::super::super::common::Empty"));
    assert!(source.contains("\"Orders.GetLine\""));
}

#[test]
fn test_message_names_follow_prost() {
    let files = [
        proto(
            "web.proto",
            "web",
            vec![message("HTTPRequest", Vec::new()), message("Self", Vec::new())],
        ),
        proto("type.proto", "type", vec![message("URLInfo", Vec::new())]),
    ];
    let resolver = ProtoTypeResolver::from_files(&files);
    let mut ctx = GenContext::new(Config::default(), resolver).unwrap();

    let file = FileDescriptor {
        name: "web.proto".to_string(),
        package: "web".to_string(),
        services: vec![ServiceDescriptor::new("Fetcher", "web")
            .with_method(MethodDescriptor::new("Fetch", ".web.HTTPRequest", ".type.URLInfo"))
            .with_method(MethodDescriptor::new("self", ".web.Self", ".web.Self"))],
    };

    let artifacts = generate_file(&mut ctx, &file).unwrap();
    let source = render_with_header(&artifacts, ctx.dependencies());

    assert!(source.contains("req: &HttpRequest"));
    assert!(source.contains("rsp: &super::r#type::UrlInfo"));
    assert!(source.contains("fn Self_("));
    assert!(source.contains("req: &Self_"));
    assert!(source.contains("\"Fetcher.self\""));
    assert!(syn::parse_file(&source).is_ok());
}

#[test]
fn test_rendered_output_is_valid_rust() {
    let config = Config::builder()
        .runtime_path("crate::runtime")
        .build()
        .unwrap();
    let mut ctx = GenContext::new(config, VerbatimResolver).unwrap();

    let file = FileDescriptor {
        name: "greeter.proto".to_string(),
        package: String::new(),
        services: vec![
            ServiceDescriptor::new("Greeter", "").with_method(
                MethodDescriptor::new("SayHello", "HelloRequest", "HelloReply")
                    .with_comments([" Sends a greeting"]),
            ),
            ServiceDescriptor::new("admin_service", ""),
        ],
    };

    let artifacts = generate_file(&mut ctx, &file).unwrap();
    let source = render_with_header(&artifacts, ctx.dependencies());

    let parsed = syn::parse_file(&source).unwrap();
    assert_eq!(parsed.items.len(), 14);
    assert!(source.contains("crate::runtime::Context"));
    assert!(source.contains("normally `\"greeter\"`"));
    assert!(source.contains("normally `\"admin_service\"`"));
}
