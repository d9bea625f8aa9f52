use actix_web::{web, App, HttpServer};
use scylla::client::session::Session;
use scylla::client::session_builder::SessionBuilder;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use order_events::config::{AppConfig, StoreKind};
use order_events::domain::order::{FixedRateTax, Order, OrderRepository, ORDER_CREATED};
use order_events::events::EventDispatcher;
use order_events::grpc::OrderGrpcService;
use order_events::infrastructure::{InMemoryOrderRepository, ScyllaOrderRepository};
use order_events::messaging::{OrderCreatedHandler, RedpandaClient};
use order_events::metrics::Metrics;
use order_events::usecase::{CreateOrderUseCase, ListOrderUseCase};
use order_events::web::{configure, AppState};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Default to INFO level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,order_events=debug"))
        )
        .init();

    tracing::info!("🚀 Starting order service");

    let config = AppConfig::from_env()?;
    tracing::info!(?config, "Configuration loaded");

    // === 1. Repository ===
    let repository: Arc<dyn OrderRepository> = match config.store {
        StoreKind::Scylla => {
            tracing::info!(node = %config.scylla_node, "Connecting to ScyllaDB...");
            let session: Session = SessionBuilder::new()
                .known_node(&config.scylla_node)
                .build()
                .await?;

            session
                .query_unpaged(
                    format!(
                        "CREATE KEYSPACE IF NOT EXISTS {} WITH REPLICATION = \
                         {{'class': 'SimpleStrategy', 'replication_factor': 1}}",
                        config.scylla_keyspace
                    ),
                    &[],
                )
                .await?;
            session.use_keyspace(&config.scylla_keyspace, false).await?;

            let repository = ScyllaOrderRepository::new(Arc::new(session));
            repository.ensure_schema().await?;
            Arc::new(repository)
        }
        StoreKind::Memory => {
            tracing::warn!("Using in-memory order store; orders are lost on restart");
            Arc::new(InMemoryOrderRepository::new())
        }
    };

    // === 2. Dispatcher + handlers (registered once, before serving) ===
    let redpanda = Arc::new(RedpandaClient::new(&config.redpanda_brokers, config.publish_timeout)?);
    let dispatcher = Arc::new(EventDispatcher::<Order>::new());
    dispatcher
        .register(
            ORDER_CREATED,
            Arc::new(OrderCreatedHandler::new(redpanda).with_route(config.order_topic.clone(), "")),
        )
        .await?;

    // === 3. Use cases ===
    let tax_policy = Arc::new(FixedRateTax::new(config.tax_rate)?);
    let create_order = Arc::new(
        CreateOrderUseCase::new(repository.clone(), dispatcher).with_tax_policy(tax_policy),
    );
    let list_order = Arc::new(ListOrderUseCase::new(repository));
    let metrics = Arc::new(Metrics::new()?);

    // === 4. gRPC server ===
    let grpc_addr: SocketAddr = format!("{}:{}", config.http_host, config.grpc_port).parse()?;
    let grpc = OrderGrpcService::new(create_order.clone(), list_order.clone(), metrics.clone())
        .serve(grpc_addr);

    // === 5. HTTP server ===
    let state = web::Data::new(AppState {
        create_order,
        list_order,
        metrics,
    });

    tracing::info!(
        "🌐 Serving on http://{}:{}/order",
        config.http_host,
        config.http_port
    );

    let http = HttpServer::new(move || App::new().app_data(state.clone()).configure(configure))
        .bind((config.http_host.as_str(), config.http_port))?
        .run();

    // Either server stopping ends the process
    tokio::select! {
        result = http => result?,
        result = grpc => result?,
    }

    tracing::info!("Server stopped");
    Ok(())
}
