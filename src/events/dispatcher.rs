use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::errors::{DispatchError, HandlerError, HandlerFailure};
use super::event::Event;

// ============================================================================
// Event Handler - subscriber contract
// ============================================================================

#[async_trait]
pub trait EventHandler<P: Send + Sync>: Send + Sync {
    /// Identity used in logs and errors
    fn name(&self) -> &str;

    async fn handle(&self, event: &Event<P>) -> Result<(), HandlerError>;
}

// ============================================================================
// Event Dispatcher
// ============================================================================
//
// Registry of event name -> handlers, in registration order.
//
// Usage:
// 1. Build once at startup and register every handler
// 2. Share via Arc with the use cases that produce events
// 3. dispatch() awaits each handler in turn; failures are collected and
//    reported together after all handlers have run
//
// Dispatch only holds the read lock long enough to snapshot the handler
// list, so registration after startup is safe, it just does not affect a
// dispatch already in flight.
//
// ============================================================================

type HandlerRef<P> = Arc<dyn EventHandler<P>>;

pub struct EventDispatcher<P: Send + Sync> {
    handlers: RwLock<HashMap<String, Vec<HandlerRef<P>>>>,
}

impl<P: Send + Sync> Default for EventDispatcher<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Send + Sync> EventDispatcher<P> {
    pub fn new() -> Self {
        Self {
            handlers: RwLock::new(HashMap::new()),
        }
    }

    /// Register a handler for an event name.
    ///
    /// The same handler instance may only be registered once per name.
    pub async fn register(
        &self,
        event_name: &str,
        handler: HandlerRef<P>,
    ) -> Result<(), DispatchError> {
        let mut handlers = self.handlers.write().await;
        let registered = handlers.entry(event_name.to_string()).or_default();

        if registered.iter().any(|h| same_handler(h, &handler)) {
            return Err(DispatchError::DuplicateHandler {
                event_name: event_name.to_string(),
                handler: handler.name().to_string(),
            });
        }

        tracing::debug!(
            event_name = %event_name,
            handler = %handler.name(),
            position = registered.len(),
            "Registered event handler"
        );

        registered.push(handler);
        Ok(())
    }

    pub async fn remove(
        &self,
        event_name: &str,
        handler: &HandlerRef<P>,
    ) -> Result<(), DispatchError> {
        let mut handlers = self.handlers.write().await;

        let not_found = || DispatchError::HandlerNotFound {
            event_name: event_name.to_string(),
            handler: handler.name().to_string(),
        };

        let registered = handlers.get_mut(event_name).ok_or_else(not_found)?;
        let position = registered
            .iter()
            .position(|h| same_handler(h, handler))
            .ok_or_else(not_found)?;

        registered.remove(position);
        if registered.is_empty() {
            handlers.remove(event_name);
        }

        tracing::debug!(
            event_name = %event_name,
            handler = %handler.name(),
            "Removed event handler"
        );

        Ok(())
    }

    pub async fn has(&self, event_name: &str, handler: &HandlerRef<P>) -> bool {
        self.handlers
            .read()
            .await
            .get(event_name)
            .is_some_and(|registered| registered.iter().any(|h| same_handler(h, handler)))
    }

    pub async fn handler_count(&self, event_name: &str) -> usize {
        self.handlers
            .read()
            .await
            .get(event_name)
            .map_or(0, Vec::len)
    }

    /// Invoke every handler registered for `event.name`, in order.
    ///
    /// A failing handler does not stop the remaining ones. Returns
    /// `HandlersFailed` listing every failure if at least one handler failed.
    pub async fn dispatch(&self, event: &Event<P>) -> Result<(), DispatchError> {
        let handlers: Vec<HandlerRef<P>> = self
            .handlers
            .read()
            .await
            .get(&event.name)
            .cloned()
            .unwrap_or_default();

        if handlers.is_empty() {
            tracing::debug!(event_name = %event.name, "No handlers registered for event");
            return Ok(());
        }

        let mut failures = Vec::new();

        for handler in &handlers {
            match handler.handle(event).await {
                Ok(()) => {
                    tracing::debug!(
                        event_name = %event.name,
                        event_id = %event.event_id,
                        handler = %handler.name(),
                        "Event handled"
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        event_name = %event.name,
                        event_id = %event.event_id,
                        handler = %handler.name(),
                        error = %format_args!("{:#}", e),
                        "Event handler failed"
                    );
                    failures.push(HandlerFailure {
                        handler: handler.name().to_string(),
                        source: e,
                    });
                }
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(DispatchError::HandlersFailed {
                event_name: event.name.clone(),
                failures,
            })
        }
    }

    /// Drop every registration
    pub async fn clear(&self) {
        self.handlers.write().await.clear();
        tracing::debug!("Cleared all event handlers");
    }
}

// Compare data pointers only; vtable pointers for the same type can differ
// between codegen units.
fn same_handler<P: Send + Sync>(a: &HandlerRef<P>, b: &HandlerRef<P>) -> bool {
    std::ptr::eq(
        Arc::as_ptr(a) as *const (),
        Arc::as_ptr(b) as *const (),
    )
}

// ============================================================================
// Unit Tests
// ============================================================================
