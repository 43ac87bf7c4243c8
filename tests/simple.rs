use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use tokio::{net::TcpListener, time::timeout};
use tokio_stream::wrappers::TcpListenerStream;
use tonic::{
    transport::{Endpoint, Server},
    Request, Response, Status,
};

use simple_grpc::{
    client,
    gate::CountdownGate,
    metadata::Metadata,
    pb::{
        simple_client::SimpleClient,
        simple_server::{Simple, SimpleServer},
    },
    server,
};

#[tokio::test]
async fn hello_round_trip_and_quit_shutdown() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let serving = tokio::spawn(async move { server::serve(listener).await.unwrap() });

    let channel = Endpoint::from_shared(format!("http://{addr}"))
        .unwrap()
        .connect_lazy();
    let mut client = SimpleClient::new(channel);

    let mut request = Request::new(client::REQUEST_BODY.to_owned());
    Metadata::from_pairs([("x", "xylophone"), ("y", "yu"), ("z", "zither")])
        .apply_to(request.metadata_mut())
        .unwrap();

    let response = timeout(Duration::from_secs(10), client.hello(request))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(response.get_ref(), server::REPLY_BODY);

    let metadata = Metadata::from_map(response.metadata());
    for (key, value) in [
        ("a", "Apple"),
        ("b", "Banana"),
        ("c", "Cherry"),
        ("0", "zero"),
        ("1", "one"),
        ("2", "two"),
    ] {
        assert!(
            metadata.iter().any(|(k, v)| k == key && v == value),
            "missing metadata entry {key}: {value}"
        );
    }

    // A plain hello must not stop the serve loop.
    assert!(!serving.is_finished());

    let response = timeout(
        Duration::from_secs(10),
        client.quit(Request::new(client::REQUEST_BODY.to_owned())),
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(response.get_ref(), server::REPLY_BODY);

    timeout(Duration::from_secs(10), serving)
        .await
        .expect("serve loop did not stop after quit")
        .unwrap();
}

struct Recorder {
    methods: Arc<Mutex<Vec<&'static str>>>,
    shutdown: CountdownGate,
}

#[tonic::async_trait]
impl Simple for Recorder {
    async fn hello(&self, _: Request<String>) -> Result<Response<String>, Status> {
        self.methods.lock().unwrap().push("hello");
        Ok(Response::new(server::REPLY_BODY.to_owned()))
    }

    async fn quit(&self, _: Request<String>) -> Result<Response<String>, Status> {
        self.methods.lock().unwrap().push("quit");
        self.shutdown.signal();
        Ok(Response::new(server::REPLY_BODY.to_owned()))
    }
}

#[tokio::test]
async fn client_driver_sends_hello_hello_quit_in_order() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let methods = Arc::new(Mutex::new(Vec::new()));
    let shutdown = CountdownGate::new(1);
    let svc = Recorder {
        methods: methods.clone(),
        shutdown: shutdown.clone(),
    };

    let serving = tokio::spawn(async move {
        Server::builder()
            .add_service(SimpleServer::new(svc))
            .serve_with_incoming_shutdown(TcpListenerStream::new(listener), async move {
                shutdown.wait().await;
            })
            .await
            .unwrap();
    });

    timeout(Duration::from_secs(10), client::run(&addr.to_string(), 3))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(*methods.lock().unwrap(), ["hello", "hello", "quit"]);
    timeout(Duration::from_secs(10), serving)
        .await
        .unwrap()
        .unwrap();
}
