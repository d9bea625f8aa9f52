use std::sync::Arc;
use uuid::Uuid;

use crate::domain::order::{order_created, FixedRateTax, Order, OrderRepository, TaxPolicy};
use crate::events::EventDispatcher;

use super::dto::{CreateOrderInputDto, OrderOutputDto};
use super::errors::UseCaseError;

/// Where order ids come from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IdPolicy {
    /// Use the caller's id when given, otherwise a UUID v7
    #[default]
    PreferCaller,
    /// Always a UUID v7; caller ids are ignored
    AlwaysGenerate,
}

impl IdPolicy {
    fn resolve(&self, requested: Option<&str>) -> String {
        match (self, requested.map(str::trim)) {
            (IdPolicy::PreferCaller, Some(id)) => id.to_string(),
            _ => Uuid::now_v7().to_string(),
        }
    }
}

// ============================================================================
// Create Order Use Case
// ============================================================================
//
// 1. Build the Order (tax derived from the configured policy)
// 2. Save it; on failure stop here, nothing is dispatched
// 3. Dispatch OrderCreated and wait for every handler
// 4. Return the created order, or Notification if a handler failed
//
// ============================================================================

pub struct CreateOrderUseCase {
    repository: Arc<dyn OrderRepository>,
    dispatcher: Arc<EventDispatcher<Order>>,
    tax_policy: Arc<dyn TaxPolicy>,
    id_policy: IdPolicy,
}

impl CreateOrderUseCase {
    pub fn new(
        repository: Arc<dyn OrderRepository>,
        dispatcher: Arc<EventDispatcher<Order>>,
    ) -> Self {
        Self {
            repository,
            dispatcher,
            tax_policy: Arc::new(FixedRateTax::default()),
            id_policy: IdPolicy::default(),
        }
    }

    pub fn with_tax_policy(mut self, tax_policy: Arc<dyn TaxPolicy>) -> Self {
        self.tax_policy = tax_policy;
        self
    }

    pub fn with_id_policy(mut self, id_policy: IdPolicy) -> Self {
        self.id_policy = id_policy;
        self
    }

    pub async fn execute(&self, input: CreateOrderInputDto) -> Result<OrderOutputDto, UseCaseError> {
        let id = self.id_policy.resolve(input.id.as_deref());
        let order = Order::new(id, input.price, self.tax_policy.as_ref())?;

        self.repository.save(&order).await.map_err(|e| {
            tracing::error!(order_id = %order.id(), error = %e, "Failed to persist order");
            e
        })?;

        tracing::info!(
            order_id = %order.id(),
            price = %order.price(),
            final_price = %order.final_price(),
            "Order persisted"
        );

        let output = OrderOutputDto::from(&order);

        if let Err(source) = self.dispatcher.dispatch(&order_created(order)).await {
            tracing::warn!(
                order_id = %output.id,
                error = %source,
                "Order created but notification failed"
            );
            return Err(UseCaseError::Notification {
                order: output,
                source,
            });
        }

        Ok(output)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
