// ============================================================================
// In-Process Events - Publish/Subscribe Infrastructure
// ============================================================================
//
// Generic dispatcher that decouples producers of domain events from the side
// effects reacting to them. Nothing in here knows about orders.
//
// Handlers run inside the caller's task, one after another, in the order they
// were registered. There is no queue and nothing is persisted.
//
// ============================================================================

mod dispatcher;
mod errors;
mod event;

pub use dispatcher::{EventDispatcher, EventHandler};
pub use errors::{DispatchError, HandlerError, HandlerFailure};
pub use event::Event;
