//! Generated bindings driven through a recording transport.
#![allow(non_snake_case)]

use std::sync::{Arc, Mutex};

use prost::Message;
use vmicro_macros::vmicro_service;
use vmicro_types::{BoxedHandler, Bytes, CallOption, Client, Context, Error, Request, Server};

#[derive(Clone, PartialEq, prost::Message)]
pub struct HelloRequest {
    #[prost(string, tag = "1")]
    pub name: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct HelloReply {
    #[prost(string, tag = "1")]
    pub message: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ProfileRequest {
    #[prost(uint64, tag = "1")]
    pub user_id: u64,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ProfileReply {
    #[prost(string, tag = "1")]
    pub display_name: String,
}

#[vmicro_service(package = "helloworld")]
trait Greeter {
    /// Sends a greeting
    fn say_hello(req: HelloRequest) -> HelloReply;

    #[method(name = "Ping")]
    fn ping(req: HelloRequest) -> HelloReply;
}

#[vmicro_service(name = "user_service")]
trait Users {
    fn get_profile(req: ProfileRequest) -> ProfileReply;
}

#[vmicro_service]
trait Empty {}

// Test transport

#[derive(Default)]
struct MockClient {
    requests: Mutex<Vec<Request>>,
    callbacks: Mutex<Vec<BoxedHandler>>,
    reject_callbacks: bool,
    call_error: Option<Error>,
}

impl MockClient {
    fn recorded(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }
}

impl Client for MockClient {
    fn new_request(&self, service: &str, endpoint: &str, body: Bytes) -> Request {
        Request::new(service, endpoint, body)
    }

    fn call(&self, _ctx: &Context, request: Request, _opts: &[CallOption]) -> Result<(), Error> {
        self.requests.lock().unwrap().push(request);
        match &self.call_error {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }

    fn handle(&self, callback: BoxedHandler) -> Result<(), Error> {
        if self.reject_callbacks {
            return Err(Error::Registration("callback rejected".to_string()));
        }
        self.callbacks.lock().unwrap().push(callback);
        Ok(())
    }
}

#[derive(Default)]
struct MockServer {
    handlers: Mutex<Vec<BoxedHandler>>,
}

impl Server for MockServer {
    fn handle(&self, handler: BoxedHandler) -> Result<(), Error> {
        self.handlers.lock().unwrap().push(handler);
        Ok(())
    }
}

#[derive(Default)]
struct GreeterResponses {
    replies: Arc<Mutex<Vec<String>>>,
}

impl GreeterCallback for GreeterResponses {
    fn SayHello(&self, _ctx: &Context, _req: &HelloRequest, rsp: &HelloReply) {
        self.replies.lock().unwrap().push(rsp.message.clone());
    }

    fn Ping(&self, _ctx: &Context, _req: &HelloRequest, _rsp: &HelloReply) {}
}

struct UserResponses;

impl UserServiceCallback for UserResponses {
    fn GetProfile(&self, _ctx: &Context, _req: &ProfileRequest, _rsp: &ProfileReply) {}
}

struct NoResponses;

impl EmptyCallback for NoResponses {}

struct GreeterImpl;

impl GreeterHandler for GreeterImpl {
    fn SayHello(&self, _ctx: &Context, req: &HelloRequest, rsp: &mut HelloReply) -> Result<(), Error> {
        rsp.message = format!("Hello {}", req.name);
        Ok(())
    }

    fn Ping(&self, _ctx: &Context, _req: &HelloRequest, _rsp: &mut HelloReply) -> Result<(), Error> {
        Ok(())
    }
}

fn transport(client: MockClient) -> (Arc<MockClient>, Option<Arc<dyn Client>>) {
    let client = Arc::new(client);
    let dyn_client: Arc<dyn Client> = client.clone();
    (client, Some(dyn_client))
}

#[test]
fn test_calls_use_routing_keys() {
    let (client, c) = transport(MockClient::default());
    let greeter = NewGreeterService("helloworld", GreeterResponses::default(), c);

    let ctx = Context::new().with_metadata("trace-id", "abc");
    let req = HelloRequest {
        name: "bob".to_string(),
    };
    greeter
        .SayHello(&ctx, &req, &[CallOption::Retries(2)])
        .unwrap();
    greeter.Ping(&ctx, &req, &[]).unwrap();

    let requests = client.recorded();
    assert_eq!(requests.len(), 2);

    // Service identifier plus raw method name, namespace from the constructor
    assert_eq!(requests[0].service, "helloworld");
    assert_eq!(requests[0].endpoint, "Greeter.say_hello");
    assert_eq!(requests[1].endpoint, "Greeter.Ping");

    let decoded = HelloRequest::decode(requests[0].body.clone()).unwrap();
    assert_eq!(decoded, req);
}

#[test]
fn test_renamed_service() {
    let (client, c) = transport(MockClient::default());
    let users: Box<dyn UserService> = NewUserService("user_service", UserResponses, c);

    users
        .GetProfile(&Context::new(), &ProfileRequest { user_id: 7 }, &[])
        .unwrap();

    let requests = client.recorded();
    assert_eq!(requests[0].service, "user_service");
    assert_eq!(requests[0].endpoint, "UserService.get_profile");
}

#[test]
fn test_transport_errors_propagate_unchanged() {
    let error = Error::Timeout {
        endpoint: "Greeter.say_hello".to_string(),
    };
    let (_, c) = transport(MockClient {
        call_error: Some(error.clone()),
        ..Default::default()
    });
    let greeter = NewGreeterService("helloworld", GreeterResponses::default(), c);

    let result = greeter.SayHello(&Context::new(), &HelloRequest::default(), &[]);
    assert_eq!(result, Err(error));
}

// What a transport does with a response: it only knows the generated trait.
fn deliver_say_hello(callback: &BoxedHandler, req: &HelloRequest, rsp: &HelloReply) -> bool {
    match vmicro_types::registered::<dyn GreeterCallback>(callback) {
        Some(callback) => {
            callback.SayHello(&Context::new(), req, rsp);
            true
        }
        None => false,
    }
}

#[test]
fn test_constructor_registers_callback() {
    let (client, c) = transport(MockClient::default());
    let responses = GreeterResponses::default();
    let replies = responses.replies.clone();
    let _greeter = NewGreeterService("helloworld", responses, c);

    let callbacks = client.callbacks.lock().unwrap();
    assert_eq!(callbacks.len(), 1);

    let reply = HelloReply {
        message: "Hello bob".to_string(),
    };
    assert!(deliver_say_hello(&callbacks[0], &HelloRequest::default(), &reply));
    assert_eq!(*replies.lock().unwrap(), vec!["Hello bob"]);

    // The concrete type is not visible to the transport
    assert!(callbacks[0].downcast_ref::<GreeterResponses>().is_none());
}

#[test]
#[should_panic(expected = "transport client is None")]
fn test_constructor_panics_without_client() {
    let _ = NewGreeterService("helloworld", GreeterResponses::default(), None);
}

#[test]
#[should_panic(expected = "service name is empty")]
fn test_constructor_panics_on_empty_name() {
    let (_, c) = transport(MockClient::default());
    let _ = NewGreeterService("", GreeterResponses::default(), c);
}

#[test]
#[should_panic(expected = "failed to register callback handler")]
fn test_constructor_panics_when_callback_rejected() {
    let (_, c) = transport(MockClient {
        reject_callbacks: true,
        ..Default::default()
    });
    let _ = NewGreeterService("helloworld", GreeterResponses::default(), c);
}

#[test]
fn test_register_handler() {
    let server = MockServer::default();
    RegisterGreeterHandler(&server, GreeterImpl).unwrap();

    let handlers = server.handlers.lock().unwrap();
    assert_eq!(handlers.len(), 1);

    let handler = vmicro_types::registered::<dyn GreeterHandler>(&handlers[0])
        .expect("registered value should be a GreeterHandler trait object");
    let mut rsp = HelloReply::default();
    handler
        .SayHello(
            &Context::new(),
            &HelloRequest {
                name: "alice".to_string(),
            },
            &mut rsp,
        )
        .unwrap();
    assert_eq!(rsp.message, "Hello alice");
}

#[test]
fn test_empty_service() {
    let (client, c) = transport(MockClient::default());
    let _empty: Box<dyn EmptyService> = NewEmptyService("empty", NoResponses, c);
    assert_eq!(client.callbacks.lock().unwrap().len(), 1);

    struct NoHandlers;
    impl EmptyHandler for NoHandlers {}

    let server = MockServer::default();
    RegisterEmptyHandler(&server, NoHandlers).unwrap();
    let handlers = server.handlers.lock().unwrap();
    assert!(vmicro_types::registered::<dyn EmptyHandler>(&handlers[0]).is_some());

    let callbacks = client.callbacks.lock().unwrap();
    assert!(vmicro_types::registered::<dyn EmptyCallback>(&callbacks[0]).is_some());
}
