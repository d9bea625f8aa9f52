use async_trait::async_trait;
use rdkafka::{
    config::ClientConfig,
    producer::{FutureProducer, FutureRecord},
    util::Timeout,
};
use std::time::Duration;

use super::broker::{BrokerChannel, BrokerError};

// ============================================================================
// Redpanda Client - Kafka-compatible BrokerChannel
// ============================================================================
//
// exchange    -> topic
// routing key -> record key (empty key = no key, partitioner picks)
//
// ============================================================================

pub struct RedpandaClient {
    producer: FutureProducer,
    timeout: Duration,
}

impl RedpandaClient {
    pub fn new(brokers: &str, timeout: Duration) -> Result<Self, BrokerError> {
        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", brokers)
            .set("message.timeout.ms", timeout.as_millis().to_string())
            .create()
            .map_err(|e| BrokerError::Client(e.to_string()))?;

        tracing::info!(brokers = %brokers, "Redpanda producer created");

        Ok(Self { producer, timeout })
    }
}

#[async_trait]
impl BrokerChannel for RedpandaClient {
    async fn publish(
        &self,
        exchange: &str,
        routing_key: &str,
        message: &[u8],
    ) -> Result<(), BrokerError> {
        let mut record: FutureRecord<'_, str, [u8]> = FutureRecord::to(exchange).payload(message);
        if !routing_key.is_empty() {
            record = record.key(routing_key);
        }

        match self.producer.send(record, Timeout::After(self.timeout)).await {
            Ok(_) => {
                tracing::info!(
                    topic = %exchange,
                    key = %routing_key,
                    bytes = message.len(),
                    "Published to Redpanda"
                );
                Ok(())
            }
            Err((e, _)) => {
                tracing::error!(
                    error = %e,
                    topic = %exchange,
                    "Failed to publish to Redpanda"
                );
                Err(BrokerError::Publish {
                    exchange: exchange.to_string(),
                    reason: e.to_string(),
                })
            }
        }
    }
}
