use async_trait::async_trait;
use rust_decimal::Decimal;
use scylla::client::session::Session;
use scylla::value::{CqlValue, Row};
use std::str::FromStr;
use std::sync::Arc;

use crate::domain::order::{total_final_price, Order, OrderRepository, RepositoryError};

// ============================================================================
// ScyllaDB Order Repository
// ============================================================================
//
// Table: orders (id text PRIMARY KEY, price text, tax text, final_price text)
//
// Decimals are stored as their canonical text form so scale survives the
// round-trip. Inserts are lightweight transactions (IF NOT EXISTS) so an id
// can only be written once.
//
// ============================================================================

pub struct ScyllaOrderRepository {
    session: Arc<Session>,
}

impl ScyllaOrderRepository {
    pub fn new(session: Arc<Session>) -> Self {
        Self { session }
    }

    /// Create the orders table in the session's current keyspace
    pub async fn ensure_schema(&self) -> Result<(), RepositoryError> {
        self.session
            .query_unpaged(
                "CREATE TABLE IF NOT EXISTS orders (
                    id text PRIMARY KEY,
                    price text,
                    tax text,
                    final_price text
                )",
                &[],
            )
            .await
            .map_err(backend)?;

        tracing::info!("✅ Orders table ready");
        Ok(())
    }
}

#[async_trait]
impl OrderRepository for ScyllaOrderRepository {
    async fn save(&self, order: &Order) -> Result<(), RepositoryError> {
        let result = self
            .session
            .query_unpaged(
                "INSERT INTO orders (id, price, tax, final_price) VALUES (?, ?, ?, ?) IF NOT EXISTS",
                (
                    order.id(),
                    order.price().to_string(),
                    order.tax().to_string(),
                    order.final_price().to_string(),
                ),
            )
            .await
            .map_err(backend)?;

        let rows = result.into_rows_result().map_err(backend)?;
        let applied = match rows.maybe_first_row::<Row>().map_err(backend)? {
            Some(row) => matches!(row.columns.first(), Some(Some(CqlValue::Boolean(true)))),
            None => false,
        };

        if !applied {
            return Err(RepositoryError::Duplicate(order.id().to_string()));
        }

        tracing::debug!(order_id = %order.id(), "Inserted order into ScyllaDB");
        Ok(())
    }

    async fn list_orders(&self) -> Result<Vec<Order>, RepositoryError> {
        let result = self
            .session
            .query_unpaged("SELECT id, price, tax, final_price FROM orders", &[])
            .await
            .map_err(backend)?;

        let rows_result = result.into_rows_result().map_err(backend)?;

        let mut orders = Vec::new();
        for row in rows_result
            .rows::<(String, String, String, String)>()
            .map_err(backend)?
        {
            let (id, price, tax, final_price) = row.map_err(backend)?;
            orders.push(Order::restore(
                id.clone(),
                parse_decimal(&id, "price", &price)?,
                parse_decimal(&id, "tax", &tax)?,
                parse_decimal(&id, "final_price", &final_price)?,
            ));
        }

        tracing::debug!(count = orders.len(), "Loaded orders from ScyllaDB");
        Ok(orders)
    }

    async fn get_total(&self) -> Result<i64, RepositoryError> {
        let orders = self.list_orders().await?;
        total_final_price(&orders)
    }
}

fn backend(e: impl std::fmt::Display) -> RepositoryError {
    RepositoryError::Backend(e.to_string())
}

fn parse_decimal(id: &str, column: &str, raw: &str) -> Result<Decimal, RepositoryError> {
    Decimal::from_str(raw)
        .map_err(|e| RepositoryError::Corrupt(format!("order {} column {}: {}", id, column, e)))
}
