// ============================================================================
// Use Cases - Application Orchestration
// ============================================================================
//
// Orchestrates: Input DTO -> Order -> Repository -> Dispatcher -> Output DTO
//
// Transport adapters (web/) only talk to these types.
//
// ============================================================================

mod create_order;
mod dto;
mod errors;
mod list_order;

pub use create_order::{CreateOrderUseCase, IdPolicy};
pub use dto::{CreateOrderInputDto, OrderOutputDto};
pub use errors::UseCaseError;
pub use list_order::ListOrderUseCase;
