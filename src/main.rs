use std::env;

use simple_grpc::{cli, client, server, BoxError, DEFAULT_CALLS};

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    tracing_subscriber::fmt::init();
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "simple-grpc");

    let Some(command) = cli::parse(env::args().skip(1)) else {
        // Unrecognized invocations print usage and exit 0.
        println!("{}", cli::usage());
        return Ok(());
    };

    match command {
        cli::Command::Client { addr } => client::run(&addr, DEFAULT_CALLS).await,
        cli::Command::Server { addr } => server::run(&addr).await,
    }
}
