use rust_decimal::Decimal;

// ============================================================================
// Order Validation Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OrderError {
    #[error("Order id cannot be empty")]
    EmptyId,

    #[error("Order price cannot be negative: {0}")]
    NegativePrice(Decimal),

    #[error("Tax rate cannot be negative: {0}")]
    NegativeRate(Decimal),

    #[error("Tax policy produced a negative tax: {0}")]
    NegativeTax(Decimal),

    #[error("Order price is too large to price: {0}")]
    PriceOutOfRange(Decimal),
}
