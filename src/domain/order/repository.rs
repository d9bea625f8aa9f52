use async_trait::async_trait;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use super::entity::Order;

// ============================================================================
// Order Repository - persistence port
// ============================================================================
//
// A successful save() must be visible to the next list_orders()/get_total()
// call on the same repository.
//
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Order already exists: {0}")]
    Duplicate(String),

    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error("Stored order is unreadable: {0}")]
    Corrupt(String),
}

#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn save(&self, order: &Order) -> Result<(), RepositoryError>;

    async fn list_orders(&self) -> Result<Vec<Order>, RepositoryError>;

    /// Sum of final prices across all orders, truncated to whole units
    async fn get_total(&self) -> Result<i64, RepositoryError>;
}

/// Shared `get_total` arithmetic for adapters that sum in process
pub fn total_final_price(orders: &[Order]) -> Result<i64, RepositoryError> {
    let sum = orders
        .iter()
        .try_fold(Decimal::ZERO, |acc, order| acc.checked_add(order.final_price()))
        .ok_or_else(|| RepositoryError::Backend("order total overflowed".to_string()))?;

    sum.trunc()
        .to_i64()
        .ok_or_else(|| RepositoryError::Backend(format!("order total {} does not fit in i64", sum)))
}
