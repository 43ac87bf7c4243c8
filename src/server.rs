use std::sync::atomic::{AtomicU64, Ordering};

use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::{transport::Server, Request, Response, Status};

use crate::{
    gate::CountdownGate,
    metadata::Metadata,
    pb::simple_server::{Simple, SimpleServer},
    BoxError,
};

/// Fixed reply body every response carries.
pub const REPLY_BODY: &str = "hello, client!";

/// Unary `simple.Simple` handler: fixed replies, an atomic request counter,
/// and a shutdown gate that `quit` opens.
#[derive(Debug)]
pub struct SimpleService {
    requests: AtomicU64,
    shutdown: CountdownGate,
}

impl SimpleService {
    pub fn new(shutdown: CountdownGate) -> Self {
        Self {
            requests: AtomicU64::new(0),
            shutdown,
        }
    }

    fn reply(&self, method: &str, request: &Request<String>) -> Result<Response<String>, Status> {
        let n = self.requests.fetch_add(1, Ordering::Relaxed) + 1;
        let peer = request
            .remote_addr()
            .map(|addr| addr.to_string())
            .unwrap_or_else(|| "<unknown>".to_owned());
        tracing::info!(request = n, method, %peer, "received request");

        for (key, value) in Metadata::from_map(request.metadata()).iter() {
            tracing::info!(request = n, "received metadata -> {key}: {value}");
        }
        tracing::info!(request = n, "received message: {}", request.get_ref());

        let mut response = Response::new(REPLY_BODY.to_owned());
        response_metadata()
            .apply_to(response.metadata_mut())
            .map_err(|e| Status::internal(e.to_string()))?;
        Ok(response)
    }
}

#[tonic::async_trait]
impl Simple for SimpleService {
    async fn hello(&self, request: Request<String>) -> Result<Response<String>, Status> {
        self.reply("hello", &request)
    }

    async fn quit(&self, request: Request<String>) -> Result<Response<String>, Status> {
        let response = self.reply("quit", &request);
        tracing::info!("quitting");
        self.shutdown.signal();
        response
    }
}

/// Entries sent back with every reply. A unary response carries a single
/// metadata map, so the `a/b/c` and `0/1/2` groups travel together.
fn response_metadata() -> Metadata {
    Metadata::from_pairs([
        ("a", "Apple"),
        ("b", "Banana"),
        ("c", "Cherry"),
        ("0", "zero"),
        ("1", "one"),
        ("2", "two"),
    ])
}

/// Binds `addr` and serves until a `quit` call opens the shutdown gate.
pub async fn run(addr: &str) -> Result<(), BoxError> {
    let listener = TcpListener::bind(addr).await?;
    serve(listener).await
}

/// Serves on an already-bound listener. Per-request failures surface as a
/// [`Status`] to the caller and never stop the accept loop; in-flight calls
/// are drained before the loop exits.
pub async fn serve(listener: TcpListener) -> Result<(), BoxError> {
    let shutdown = CountdownGate::new(1);
    let service = SimpleService::new(shutdown.clone());

    tracing::info!(addr = %listener.local_addr()?, "server listening");

    Server::builder()
        .add_service(SimpleServer::new(service))
        .serve_with_incoming_shutdown(TcpListenerStream::new(listener), async move {
            shutdown.wait().await;
        })
        .await?;

    tracing::info!("server stopped");
    Ok(())
}
