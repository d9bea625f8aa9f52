use std::sync::Arc;

use crate::domain::order::OrderRepository;

use super::dto::OrderOutputDto;
use super::errors::UseCaseError;

/// Read-only projection of every stored order, in repository order
pub struct ListOrderUseCase {
    repository: Arc<dyn OrderRepository>,
}

impl ListOrderUseCase {
    pub fn new(repository: Arc<dyn OrderRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self) -> Result<Vec<OrderOutputDto>, UseCaseError> {
        let orders = self.repository.list_orders().await?;

        tracing::debug!(count = orders.len(), "Listed orders");
        Ok(orders.iter().map(OrderOutputDto::from).collect())
    }

    /// Sum of final prices in whole units
    pub async fn total(&self) -> Result<i64, UseCaseError> {
        Ok(self.repository.get_total().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::{Order, RepositoryError};
    use crate::infrastructure::InMemoryOrderRepository;
    use async_trait::async_trait;
    use rust_decimal_macros::dec;

    struct UnreachableRepository;

    #[async_trait]
    impl OrderRepository for UnreachableRepository {
        async fn save(&self, _order: &Order) -> Result<(), RepositoryError> {
            Err(RepositoryError::Backend("timeout".to_string()))
        }

        async fn list_orders(&self) -> Result<Vec<Order>, RepositoryError> {
            Err(RepositoryError::Backend("timeout".to_string()))
        }

        async fn get_total(&self) -> Result<i64, RepositoryError> {
            Err(RepositoryError::Backend("timeout".to_string()))
        }
    }

    #[tokio::test]
    async fn test_empty_repository_lists_nothing() {
        let use_case = ListOrderUseCase::new(Arc::new(InMemoryOrderRepository::new()));
        assert!(use_case.execute().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_preserves_repository_order() {
        let repository = Arc::new(InMemoryOrderRepository::new());
        for (id, price) in [("c", dec!(3)), ("a", dec!(1)), ("b", dec!(2))] {
            repository
                .save(&Order::restore(id.to_string(), price, dec!(0), price))
                .await
                .unwrap();
        }

        let listed = ListOrderUseCase::new(repository).execute().await.unwrap();
        let ids: Vec<_> = listed.iter().map(|o| o.id.as_str()).collect();

        assert_eq!(ids, vec!["c", "a", "b"]);
        assert_eq!(listed[0].final_price, dec!(3));
    }

    #[tokio::test]
    async fn test_repository_failure_is_persistence_error() {
        let use_case = ListOrderUseCase::new(Arc::new(UnreachableRepository));

        assert!(matches!(use_case.execute().await, Err(UseCaseError::Persistence(_))));
        assert!(matches!(use_case.total().await, Err(UseCaseError::Persistence(_))));
    }

    #[tokio::test]
    async fn test_total() {
        let repository = Arc::new(InMemoryOrderRepository::new());
        repository
            .save(&Order::restore("a".to_string(), dec!(100), dec!(10), dec!(110)))
            .await
            .unwrap();

        assert_eq!(ListOrderUseCase::new(repository).total().await.unwrap(), 110);
    }
}
