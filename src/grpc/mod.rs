pub mod server;

#[allow(clippy::all, clippy::pedantic)]
pub mod proto {
    tonic::include_proto!("order.v1");

    /// Encoded descriptor set for gRPC reflection
    pub const FILE_DESCRIPTOR_SET: &[u8] =
        include_bytes!(concat!(env!("OUT_DIR"), "/order_descriptor.bin"));
}

pub use server::OrderGrpcService;
