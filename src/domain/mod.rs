// ============================================================================
// Domain Layer - Business Logic
// ============================================================================
//
// Entities, policies and ports. Adapters live in infrastructure/ and
// messaging/; orchestration lives in usecase/.
//
// ============================================================================

pub mod order;
