use rust_decimal::{Decimal, RoundingStrategy};

use super::errors::OrderError;

// ============================================================================
// Tax Policy
// ============================================================================

/// Derives the tax owed on a price
pub trait TaxPolicy: Send + Sync {
    /// `None` when the tax cannot be represented as a `Decimal`
    fn tax_for(&self, price: Decimal) -> Option<Decimal>;
}

/// Flat percentage of the price, rounded to cents (half away from zero)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedRateTax {
    rate: Decimal,
}

impl FixedRateTax {
    pub fn new(rate: Decimal) -> Result<Self, OrderError> {
        if rate < Decimal::ZERO {
            return Err(OrderError::NegativeRate(rate));
        }
        Ok(Self { rate })
    }

    pub fn rate(&self) -> Decimal {
        self.rate
    }
}

impl Default for FixedRateTax {
    /// 10%
    fn default() -> Self {
        Self {
            rate: Decimal::new(10, 2),
        }
    }
}

impl TaxPolicy for FixedRateTax {
    fn tax_for(&self, price: Decimal) -> Option<Decimal> {
        price
            .checked_mul(self.rate)
            .map(|tax| tax.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
    }
}
