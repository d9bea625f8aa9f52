use crate::domain::order::{OrderError, RepositoryError};
use crate::events::DispatchError;

use super::dto::OrderOutputDto;

// ============================================================================
// Use Case Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum UseCaseError {
    /// Input rejected before anything was persisted
    #[error("Invalid order: {0}")]
    Validation(#[from] OrderError),

    #[error("Persistence failed: {0}")]
    Persistence(#[from] RepositoryError),

    /// The order was persisted; one or more subscribers failed
    #[error("Order {} was created but notification failed: {}", .order.id, .source)]
    Notification {
        order: OrderOutputDto,
        #[source]
        source: DispatchError,
    },
}

impl UseCaseError {
    /// True when the order exists despite the error
    pub fn is_degraded_success(&self) -> bool {
        matches!(self, UseCaseError::Notification { .. })
    }

    pub fn created_order(&self) -> Option<&OrderOutputDto> {
        match self {
            UseCaseError::Notification { order, .. } => Some(order),
            _ => None,
        }
    }
}
