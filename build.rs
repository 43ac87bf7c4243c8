fn main() {
    let simple = tonic_build::manual::Service::builder()
        .name("Simple")
        .package("simple")
        .method(
            tonic_build::manual::Method::builder()
                .name("hello")
                .route_name("Hello")
                .input_type("::std::string::String")
                .output_type("::std::string::String")
                .codec_path("crate::codec::TextCodec")
                .build(),
        )
        .method(
            tonic_build::manual::Method::builder()
                .name("quit")
                .route_name("Quit")
                .input_type("::std::string::String")
                .output_type("::std::string::String")
                .codec_path("crate::codec::TextCodec")
                .build(),
        )
        .build();

    tonic_build::manual::Builder::new().compile(&[simple]);
}
