use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::errors::OrderError;
use super::tax::TaxPolicy;

// ============================================================================
// Order Entity
// ============================================================================

/// An order with its derived pricing.
///
/// `final_price == price + tax` holds for every order built by `new`.
/// There are no setters; a changed order only comes back through a
/// repository round-trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    id: String,
    price: Decimal,
    tax: Decimal,
    final_price: Decimal,
}

impl Order {
    pub fn new(
        id: impl Into<String>,
        price: Decimal,
        tax_policy: &dyn TaxPolicy,
    ) -> Result<Self, OrderError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(OrderError::EmptyId);
        }
        if price < Decimal::ZERO {
            return Err(OrderError::NegativePrice(price));
        }

        let tax = tax_policy
            .tax_for(price)
            .ok_or(OrderError::PriceOutOfRange(price))?;
        if tax < Decimal::ZERO {
            return Err(OrderError::NegativeTax(tax));
        }
        let final_price = price
            .checked_add(tax)
            .ok_or(OrderError::PriceOutOfRange(price))?;

        Ok(Self {
            id,
            price,
            tax,
            final_price,
        })
    }

    /// Rebuild an order exactly as it was stored
    pub fn restore(id: String, price: Decimal, tax: Decimal, final_price: Decimal) -> Self {
        Self {
            id,
            price,
            tax,
            final_price,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn tax(&self) -> Decimal {
        self.tax
    }

    pub fn final_price(&self) -> Decimal {
        self.final_price
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
