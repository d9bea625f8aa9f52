use crate::events::Event;
use super::entity::Order;

// ============================================================================
// Order Events
// ============================================================================

/// Dispatched once an order has been persisted
pub const ORDER_CREATED: &str = "OrderCreated";

pub type OrderCreated = Event<Order>;

pub fn order_created(order: Order) -> OrderCreated {
    Event::new(ORDER_CREATED, order)
}
