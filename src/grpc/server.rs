use rust_decimal::Decimal;
use std::net::SocketAddr;
use std::sync::Arc;
use tonic::{Request, Response, Status};

use super::proto::order_service_server::{OrderService, OrderServiceServer};
use super::proto::{
    self, CreateOrderRequest, CreateOrderResponse, ListOrdersRequest, ListOrdersResponse,
};
use crate::domain::order::RepositoryError;
use crate::metrics::Metrics;
use crate::usecase::{
    CreateOrderInputDto, CreateOrderUseCase, ListOrderUseCase, OrderOutputDto, UseCaseError,
};

// ============================================================================
// gRPC Adapter - order.v1.OrderService
// ============================================================================
//
// CreateOrder -> OK | OK + warning (stored, notification failed)
//                INVALID_ARGUMENT | ALREADY_EXISTS | INTERNAL
// ListOrders  -> OK | INTERNAL
//
// Served next to grpc.health.v1 and server reflection.
//
// ============================================================================

pub struct OrderGrpcService {
    create_order: Arc<CreateOrderUseCase>,
    list_order: Arc<ListOrderUseCase>,
    metrics: Arc<Metrics>,
}

impl OrderGrpcService {
    pub fn new(
        create_order: Arc<CreateOrderUseCase>,
        list_order: Arc<ListOrderUseCase>,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self {
            create_order,
            list_order,
            metrics,
        }
    }

    /// Serve the order service with health and reflection until the
    /// transport fails
    pub async fn serve(self, addr: SocketAddr) -> anyhow::Result<()> {
        let (health_reporter, health_service) = tonic_health::server::health_reporter();
        health_reporter
            .set_serving::<OrderServiceServer<OrderGrpcService>>()
            .await;

        let reflection = tonic_reflection::server::Builder::configure()
            .register_encoded_file_descriptor_set(proto::FILE_DESCRIPTOR_SET)
            .build_v1()?;

        tracing::info!(addr = %addr, "gRPC server listening");

        tonic::transport::Server::builder()
            .add_service(health_service)
            .add_service(reflection)
            .add_service(OrderServiceServer::new(self))
            .serve(addr)
            .await?;

        Ok(())
    }
}

#[tonic::async_trait]
impl OrderService for OrderGrpcService {
    async fn create_order(
        &self,
        request: Request<CreateOrderRequest>,
    ) -> Result<Response<CreateOrderResponse>, Status> {
        let req = request.into_inner();
        let price: Decimal = req
            .price
            .trim()
            .parse()
            .map_err(|e| Status::invalid_argument(format!("Invalid price '{}': {}", req.price, e)))?;
        let id = Some(req.id).filter(|id| !id.is_empty());

        match self.create_order.execute(CreateOrderInputDto { id, price }).await {
            Ok(order) => {
                self.metrics.record_created("created");
                Ok(Response::new(CreateOrderResponse {
                    order: Some(order.into()),
                    warning: String::new(),
                }))
            }
            Err(UseCaseError::Notification { order, source }) => {
                self.metrics.record_created("degraded");
                for failure in source.failures() {
                    self.metrics.record_notification_failure(&failure.handler);
                }
                Ok(Response::new(CreateOrderResponse {
                    order: Some(order.into()),
                    warning: source.to_string(),
                }))
            }
            Err(e) => {
                let status = status_for(&e);
                let outcome = if status.code() == tonic::Code::Internal {
                    tracing::error!(error = %e, "Create order failed");
                    "failed"
                } else {
                    "rejected"
                };
                self.metrics.record_created(outcome);
                Err(status)
            }
        }
    }

    async fn list_orders(
        &self,
        _request: Request<ListOrdersRequest>,
    ) -> Result<Response<ListOrdersResponse>, Status> {
        let orders = self.list_order.execute().await.map_err(|e| {
            tracing::error!(error = %e, "List orders failed");
            status_for(&e)
        })?;

        self.metrics.orders_listed.inc();
        Ok(Response::new(ListOrdersResponse {
            orders: orders.into_iter().map(Into::into).collect(),
        }))
    }
}

impl From<OrderOutputDto> for proto::Order {
    fn from(order: OrderOutputDto) -> Self {
        Self {
            id: order.id,
            price: order.price.to_string(),
            tax: order.tax.to_string(),
            final_price: order.final_price.to_string(),
        }
    }
}

fn status_for(error: &UseCaseError) -> Status {
    match error {
        UseCaseError::Validation(_) => Status::invalid_argument(error.to_string()),
        UseCaseError::Persistence(RepositoryError::Duplicate(id)) => {
            Status::already_exists(format!("Order already exists: {}", id))
        }
        _ => Status::internal(error.to_string()),
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
