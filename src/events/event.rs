use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Event - transient notification passed to subscribers
// ============================================================================

/// A named occurrence carrying the domain object that triggered it.
///
/// Type Parameter:
/// - `P`: the payload type shared by every handler of a dispatcher
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Event<P> {
    pub event_id: Uuid,
    /// Key used to look up subscribers
    pub name: String,
    pub payload: P,
    pub occurred_at: DateTime<Utc>,
    /// Name of the event that led to this one, if any
    pub causation: Option<String>,
}

impl<P> Event<P> {
    pub fn new(name: impl Into<String>, payload: P) -> Self {
        Self {
            event_id: Uuid::now_v7(),
            name: name.into(),
            payload,
            occurred_at: Utc::now(),
            causation: None,
        }
    }

    pub fn with_causation(mut self, event_name: impl Into<String>) -> Self {
        self.causation = Some(event_name.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_creation() {
        let event = Event::new("OrderCreated", 42u32);

        assert_eq!(event.name, "OrderCreated");
        assert_eq!(event.payload, 42);
        assert!(event.causation.is_none());
    }

    #[test]
    fn test_event_with_causation() {
        let event = Event::new("OrderNotified", ()).with_causation("OrderCreated");
        assert_eq!(event.causation.as_deref(), Some("OrderCreated"));
    }

    #[test]
    fn test_event_ids_are_unique() {
        let first = Event::new("OrderCreated", ());
        let second = Event::new("OrderCreated", ());
        assert_ne!(first.event_id, second.event_id);
    }
}
