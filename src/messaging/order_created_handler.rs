use anyhow::Context;
use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::order::Order;
use crate::events::{Event, EventHandler, HandlerError};

use super::broker::{BrokerChannel, BrokerError};

pub const DEFAULT_EXCHANGE: &str = "amq.direct";

// ============================================================================
// OrderCreated Handler
// ============================================================================
//
// Serializes the created order to JSON
// ({"id", "price", "tax", "final_price"}) and publishes it once.
// No retries here; a failure is reported back to the dispatcher.
//
// ============================================================================

pub struct OrderCreatedHandler {
    channel: Arc<dyn BrokerChannel>,
    exchange: String,
    routing_key: String,
}

impl OrderCreatedHandler {
    pub fn new(channel: Arc<dyn BrokerChannel>) -> Self {
        Self {
            channel,
            exchange: DEFAULT_EXCHANGE.to_string(),
            routing_key: String::new(),
        }
    }

    pub fn with_route(mut self, exchange: impl Into<String>, routing_key: impl Into<String>) -> Self {
        self.exchange = exchange.into();
        self.routing_key = routing_key.into();
        self
    }
}

#[async_trait]
impl EventHandler<Order> for OrderCreatedHandler {
    fn name(&self) -> &str {
        "order-created-publisher"
    }

    async fn handle(&self, event: &Event<Order>) -> Result<(), HandlerError> {
        let order = &event.payload;
        let message = serde_json::to_vec(order).map_err(BrokerError::from)?;

        self.channel
            .publish(&self.exchange, &self.routing_key, &message)
            .await
            .with_context(|| format!("publishing {} for order {}", event.name, order.id()))?;

        tracing::info!(
            order_id = %order.id(),
            exchange = %self.exchange,
            routing_key = %self.routing_key,
            "Published order notification"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::order_created;
    use rust_decimal_macros::dec;
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct RecordingChannel {
        published: Mutex<Vec<(String, String, Vec<u8>)>>,
    }

    #[async_trait]
    impl BrokerChannel for RecordingChannel {
        async fn publish(
            &self,
            exchange: &str,
            routing_key: &str,
            message: &[u8],
        ) -> Result<(), BrokerError> {
            self.published.lock().await.push((
                exchange.to_string(),
                routing_key.to_string(),
                message.to_vec(),
            ));
            Ok(())
        }
    }

    struct DownChannel;

    #[async_trait]
    impl BrokerChannel for DownChannel {
        async fn publish(
            &self,
            exchange: &str,
            _routing_key: &str,
            _message: &[u8],
        ) -> Result<(), BrokerError> {
            Err(BrokerError::Publish {
                exchange: exchange.to_string(),
                reason: "connection reset".to_string(),
            })
        }
    }

    fn event() -> Event<Order> {
        order_created(Order::restore(
            "order-1".to_string(),
            dec!(100.00),
            dec!(10.00),
            dec!(110.00),
        ))
    }

    #[tokio::test]
    async fn test_publishes_order_json() {
        let channel = Arc::new(RecordingChannel::default());
        let handler = OrderCreatedHandler::new(channel.clone());

        handler.handle(&event()).await.unwrap();

        let published = channel.published.lock().await;
        assert_eq!(published.len(), 1);

        let (exchange, routing_key, body) = &published[0];
        assert_eq!(exchange, DEFAULT_EXCHANGE);
        assert_eq!(routing_key, "");

        let json: serde_json::Value = serde_json::from_slice(body).unwrap();
        assert_eq!(json["id"], "order-1");
        assert_eq!(json["price"], "100.00");
        assert_eq!(json["tax"], "10.00");
        assert_eq!(json["final_price"], "110.00");
    }

    #[tokio::test]
    async fn test_custom_route() {
        let channel = Arc::new(RecordingChannel::default());
        let handler = OrderCreatedHandler::new(channel.clone()).with_route("orders", "created");

        handler.handle(&event()).await.unwrap();

        let published = channel.published.lock().await;
        assert_eq!(published[0].0, "orders");
        assert_eq!(published[0].1, "created");
    }

    #[tokio::test]
    async fn test_broker_failure_is_reported() {
        let handler = OrderCreatedHandler::new(Arc::new(DownChannel));

        let err = handler.handle(&event()).await.unwrap_err();

        assert_eq!(err.to_string(), "publishing OrderCreated for order order-1");
        assert!(matches!(
            err.downcast_ref::<BrokerError>(),
            Some(BrokerError::Publish { .. })
        ));
    }
}
