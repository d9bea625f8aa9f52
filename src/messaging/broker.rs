use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum BrokerError {
    #[error("Failed to publish to '{exchange}': {reason}")]
    Publish { exchange: String, reason: String },

    #[error("Failed to serialize message: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Broker client error: {0}")]
    Client(String),
}

/// Publish capability of an external message broker.
///
/// Connection lifecycle belongs to the implementation.
#[async_trait]
pub trait BrokerChannel: Send + Sync {
    async fn publish(
        &self,
        exchange: &str,
        routing_key: &str,
        message: &[u8],
    ) -> Result<(), BrokerError>;
}
