use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::order::{total_final_price, Order, OrderRepository, RepositoryError};

/// Orders kept in insertion order behind a read-write lock
#[derive(Default)]
pub struct InMemoryOrderRepository {
    orders: RwLock<Vec<Order>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn save(&self, order: &Order) -> Result<(), RepositoryError> {
        let mut orders = self.orders.write().await;
        if orders.iter().any(|o| o.id() == order.id()) {
            return Err(RepositoryError::Duplicate(order.id().to_string()));
        }
        orders.push(order.clone());

        tracing::debug!(order_id = %order.id(), count = orders.len(), "Stored order in memory");
        Ok(())
    }

    async fn list_orders(&self) -> Result<Vec<Order>, RepositoryError> {
        Ok(self.orders.read().await.clone())
    }

    async fn get_total(&self) -> Result<i64, RepositoryError> {
        total_final_price(&self.orders.read().await)
    }
}
