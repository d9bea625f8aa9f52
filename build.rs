//! Generates the gRPC stubs for `proto/order/v1/order.proto`.
//!
//! The descriptor set is produced with protox, so no `protoc` is needed on
//! the build machine. The encoded set is also written to `OUT_DIR` for the
//! reflection service.
#![allow(clippy::expect_used)]

use prost::Message;
use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=proto/");

    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR not set"));

    let fds = protox::compile(["order/v1/order.proto"], ["proto"])
        .expect("Failed to compile proto/order/v1/order.proto");

    fs::write(out_dir.join("order_descriptor.bin"), fds.encode_to_vec())
        .expect("Failed to write descriptor set");

    tonic_prost_build::configure()
        .build_client(true)
        .build_server(true)
        .compile_fds(fds)
        .expect("Failed to generate gRPC stubs");
}
