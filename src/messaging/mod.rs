// ============================================================================
// Messaging - outbound notifications
// ============================================================================
//
// - broker: BrokerChannel port (publish bytes to exchange/routing key)
// - order_created_handler: forwards OrderCreated events through a channel
// - redpanda: BrokerChannel backed by a Kafka-compatible producer
//
// ============================================================================

mod broker;
mod order_created_handler;
mod redpanda;

pub use broker::{BrokerChannel, BrokerError};
pub use order_created_handler::OrderCreatedHandler;
pub use redpanda::RedpandaClient;
