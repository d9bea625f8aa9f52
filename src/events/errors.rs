use std::fmt;

// ============================================================================
// Dispatcher Errors
// ============================================================================

/// Cause reported by a failing handler
pub type HandlerError = anyhow::Error;

/// One handler's failure during a dispatch
#[derive(Debug)]
pub struct HandlerFailure {
    pub handler: String,
    pub source: HandlerError,
}

impl fmt::Display for HandlerFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:#}", self.handler, self.source)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("Handler '{handler}' is already registered for event '{event_name}'")]
    DuplicateHandler { event_name: String, handler: String },

    #[error("Handler '{handler}' is not registered for event '{event_name}'")]
    HandlerNotFound { event_name: String, handler: String },

    #[error("{} handler(s) failed for event '{}': {}", .failures.len(), .event_name, join_failures(.failures))]
    HandlersFailed {
        event_name: String,
        failures: Vec<HandlerFailure>,
    },
}

impl DispatchError {
    /// Handler failures carried by this error (empty for registration errors)
    pub fn failures(&self) -> &[HandlerFailure] {
        match self {
            DispatchError::HandlersFailed { failures, .. } => failures,
            _ => &[],
        }
    }
}

fn join_failures(failures: &[HandlerFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
