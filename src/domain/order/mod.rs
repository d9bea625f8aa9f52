// ============================================================================
// Order Domain
// ============================================================================
//
// - Entity (Order with derived pricing)
// - Tax policy (how tax is derived from price)
// - Events (OrderCreated)
// - Errors (OrderError)
// - Repository port (OrderRepository)
//
// Nothing here knows about storage engines or brokers.
//
// ============================================================================

pub mod entity;
pub mod errors;
pub mod events;
pub mod repository;
pub mod tax;

pub use entity::*;
pub use errors::*;
pub use events::*;
pub use repository::*;
pub use tax::*;
