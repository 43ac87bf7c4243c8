//! A minimal unary gRPC client/server example.
//!
//! The `simple.Simple` service is defined manually (no .proto file) in
//! `build.rs` and carries raw UTF-8 text via [`codec::TextCodec`]. The
//! client issues a short, strictly sequential run of `Hello` calls followed
//! by one `Quit`, the in-band signal for the server to stop serving.

pub mod cli;
pub mod client;
pub mod codec;
pub mod gate;
pub mod metadata;
pub mod server;

/// Client and server stubs for the `simple.Simple` service, generated by
/// `tonic_build::manual` in `build.rs`.
pub mod pb {
    include!(concat!(env!("OUT_DIR"), "/simple.Simple.rs"));
}

/// Boxed error used at the driver seams.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Address both drivers use unless one is given on the command line.
pub const DEFAULT_ADDR: &str = "localhost:8001";

/// Number of calls the client driver issues; the last one is `quit`.
pub const DEFAULT_CALLS: u32 = 3;
