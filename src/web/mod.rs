use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;

use crate::domain::order::RepositoryError;
use crate::metrics::{self, Metrics};
use crate::usecase::{CreateOrderInputDto, CreateOrderUseCase, ListOrderUseCase, UseCaseError};

// ============================================================================
// HTTP Adapter
// ============================================================================
//
// POST /order         -> 201 created | 202 created, notification failed
//                        400 invalid | 409 duplicate id | 500 storage
// GET  /order         -> 200 [orders]
// GET  /order/total   -> 200 {"total": n}
// GET  /metrics, /health
//
// ============================================================================

/// Shared with the gRPC adapter, so every member is behind an `Arc`
pub struct AppState {
    pub create_order: Arc<CreateOrderUseCase>,
    pub list_order: Arc<ListOrderUseCase>,
    pub metrics: Arc<Metrics>,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/order", web::post().to(create_order))
        .route("/order", web::get().to(list_orders))
        .route("/order/total", web::get().to(order_total))
        .route("/metrics", web::get().to(scrape_metrics))
        .route("/health", web::get().to(metrics::health_handler));
}

async fn create_order(
    state: web::Data<AppState>,
    body: web::Json<CreateOrderInputDto>,
) -> impl Responder {
    match state.create_order.execute(body.into_inner()).await {
        Ok(order) => {
            state.metrics.record_created("created");
            HttpResponse::Created().json(order)
        }
        Err(UseCaseError::Notification { order, source }) => {
            state.metrics.record_created("degraded");
            for failure in source.failures() {
                state.metrics.record_notification_failure(&failure.handler);
            }
            HttpResponse::Accepted().json(serde_json::json!({
                "order": order,
                "warning": source.to_string(),
            }))
        }
        Err(e @ UseCaseError::Validation(_)) => {
            state.metrics.record_created("rejected");
            error_response(HttpResponse::BadRequest(), &e)
        }
        Err(UseCaseError::Persistence(RepositoryError::Duplicate(id))) => {
            state.metrics.record_created("rejected");
            HttpResponse::Conflict().json(serde_json::json!({
                "error": format!("Order already exists: {}", id)
            }))
        }
        Err(e) => {
            state.metrics.record_created("failed");
            tracing::error!(error = %e, "Create order failed");
            error_response(HttpResponse::InternalServerError(), &e)
        }
    }
}

async fn list_orders(state: web::Data<AppState>) -> impl Responder {
    match state.list_order.execute().await {
        Ok(orders) => {
            state.metrics.orders_listed.inc();
            HttpResponse::Ok().json(orders)
        }
        Err(e) => {
            tracing::error!(error = %e, "List orders failed");
            error_response(HttpResponse::InternalServerError(), &e)
        }
    }
}

async fn order_total(state: web::Data<AppState>) -> impl Responder {
    match state.list_order.total().await {
        Ok(total) => HttpResponse::Ok().json(serde_json::json!({ "total": total })),
        Err(e) => {
            tracing::error!(error = %e, "Order total failed");
            error_response(HttpResponse::InternalServerError(), &e)
        }
    }
}

async fn scrape_metrics(state: web::Data<AppState>) -> impl Responder {
    metrics::metrics_response(&state.metrics)
}

fn error_response(
    mut builder: actix_web::HttpResponseBuilder,
    error: &UseCaseError,
) -> HttpResponse {
    builder.json(serde_json::json!({ "error": error.to_string() }))
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::{Order, ORDER_CREATED};
    use crate::events::{Event, EventDispatcher, EventHandler, HandlerError};
    use crate::infrastructure::InMemoryOrderRepository;
    use actix_web::{http::StatusCode, test, App};
    use async_trait::async_trait;

    struct FailingPublisher;

    #[async_trait]
    impl EventHandler<Order> for FailingPublisher {
        fn name(&self) -> &str {
            "failing-publisher"
        }

        async fn handle(&self, _event: &Event<Order>) -> Result<(), HandlerError> {
            anyhow::bail!("broker down")
        }
    }

    async fn app_state(dispatcher: Arc<EventDispatcher<Order>>) -> web::Data<AppState> {
        let repository = Arc::new(InMemoryOrderRepository::new());
        web::Data::new(AppState {
            create_order: Arc::new(CreateOrderUseCase::new(repository.clone(), dispatcher)),
            list_order: Arc::new(ListOrderUseCase::new(repository)),
            metrics: Arc::new(Metrics::new().unwrap()),
        })
    }

    #[actix_web::test]
    async fn test_create_then_list() {
        let state = app_state(Arc::new(EventDispatcher::new())).await;
        let app = test::init_service(App::new().app_data(state).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/order")
            .set_json(serde_json::json!({ "id": "order-1", "price": "100.00" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["final_price"], "110.00");

        let req = test::TestRequest::get().uri("/order").to_request();
        let orders: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(orders.as_array().map(Vec::len), Some(1));
        assert_eq!(orders[0]["id"], "order-1");

        let req = test::TestRequest::get().uri("/order/total").to_request();
        let total: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(total["total"], 110);
    }

    #[actix_web::test]
    async fn test_negative_price_is_bad_request() {
        let state = app_state(Arc::new(EventDispatcher::new())).await;
        let app = test::init_service(App::new().app_data(state).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/order")
            .set_json(serde_json::json!({ "price": "-1" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_price_beyond_decimal_range_is_bad_request() {
        let state = app_state(Arc::new(EventDispatcher::new())).await;
        let app = test::init_service(App::new().app_data(state).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/order")
            .set_json(serde_json::json!({ "id": "order-1", "price": "79228162514264337593543950335" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::get().uri("/order").to_request();
        let orders: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(orders.as_array().map(Vec::len), Some(0));
    }

    #[actix_web::test]
    async fn test_metrics_served_from_app_state() {
        let state = app_state(Arc::new(EventDispatcher::new())).await;
        let app = test::init_service(App::new().app_data(state).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/order")
            .set_json(serde_json::json!({ "price": "5" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

        let req = test::TestRequest::get().uri("/metrics").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = test::read_body(resp).await;
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.contains("orders_created_total{outcome=\"created\"} 1"));
    }

    #[actix_web::test]
    async fn test_duplicate_id_is_conflict() {
        let state = app_state(Arc::new(EventDispatcher::new())).await;
        let app = test::init_service(App::new().app_data(state).configure(configure)).await;

        for expected in [StatusCode::CREATED, StatusCode::CONFLICT] {
            let req = test::TestRequest::post()
                .uri("/order")
                .set_json(serde_json::json!({ "id": "order-1", "price": "5" }))
                .to_request();
            assert_eq!(test::call_service(&app, req).await.status(), expected);
        }
    }

    #[actix_web::test]
    async fn test_notification_failure_is_accepted() {
        let dispatcher: Arc<EventDispatcher<Order>> = Arc::new(EventDispatcher::new());
        dispatcher
            .register(ORDER_CREATED, Arc::new(FailingPublisher))
            .await
            .unwrap();
        let state = app_state(dispatcher).await;
        let metrics = state.metrics.clone();
        let app = test::init_service(App::new().app_data(state).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/order")
            .set_json(serde_json::json!({ "id": "order-1", "price": "10" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::ACCEPTED);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["order"]["id"], "order-1");
        assert!(body["warning"].as_str().unwrap().contains("failing-publisher"));

        assert_eq!(
            metrics
                .notification_failures
                .with_label_values(&["failing-publisher"])
                .get(),
            1
        );
    }
}
