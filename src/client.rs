use tonic::{transport::Endpoint, Code, Request, Response};

use crate::{metadata::Metadata, pb::simple_client::SimpleClient, BoxError};

/// Fixed request body every call carries.
pub const REQUEST_BODY: &str = "hello, server!";

/// Dials `addr` and issues `calls` unary calls, strictly one at a time.
///
/// Every call but the last goes to `hello`; the last goes to `quit`, the
/// in-band signal for the server to stop serving. A per-call
/// [`tonic::Status`] error is reported and the remaining calls still run;
/// only setup failures (bad address, refused connection) abort the run.
pub async fn run(addr: &str, calls: u32) -> Result<(), BoxError> {
    let channel = Endpoint::from_shared(format!("http://{addr}"))?
        .connect()
        .await?;
    let mut client = SimpleClient::new(channel);

    for i in 0..calls {
        let quitting = i + 1 == calls;
        let method = if quitting { "quit" } else { "hello" };
        tracing::info!(call = i + 1, method, "calling");

        let mut request = Request::new(REQUEST_BODY.to_owned());
        request_metadata().apply_to(request.metadata_mut())?;

        let result = if quitting {
            client.quit(request).await
        } else {
            client.hello(request).await
        };

        match result {
            Ok(response) => print_response(&response),
            Err(status) => {
                println!("status: {}", status.code() as i32);
                println!("statusMessage: {}", status.message());
            }
        }
    }

    tracing::info!("done");
    Ok(())
}

/// The illustrative `x/y/z` entries attached to every outbound call.
fn request_metadata() -> Metadata {
    Metadata::from_pairs([("x", "xylophone"), ("y", "yu"), ("z", "zither")])
}

fn print_response(response: &Response<String>) {
    println!("status: {}", Code::Ok as i32);
    println!("statusMessage: OK");
    println!("message: {}", response.get_ref());
    for (key, value) in Metadata::from_map(response.metadata()).iter() {
        println!("METADATA -> {key}: {value}");
    }
}
