// ============================================================================
// Infrastructure - OrderRepository adapters
// ============================================================================
//
// - memory: process-local store, used by tests and ORDER_STORE=memory
// - scylla_store: ScyllaDB table keyed by order id
//
// ============================================================================

mod memory;
mod scylla_store;

pub use memory::InMemoryOrderRepository;
pub use scylla_store::ScyllaOrderRepository;
