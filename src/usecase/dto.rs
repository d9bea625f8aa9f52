use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::order::Order;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderInputDto {
    /// Caller supplied id; generated when absent
    #[serde(default)]
    pub id: Option<String>,
    pub price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderOutputDto {
    pub id: String,
    pub price: Decimal,
    pub tax: Decimal,
    pub final_price: Decimal,
}

impl From<&Order> for OrderOutputDto {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id().to_string(),
            price: order.price(),
            tax: order.tax(),
            final_price: order.final_price(),
        }
    }
}
