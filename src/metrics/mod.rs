// Private module declaration
mod server;

use prometheus::{IntCounter, IntCounterVec, Opts, Registry};

pub use server::{health_handler, metrics_response};

// ============================================================================
// Metrics Module - Prometheus metrics for the order service
// ============================================================================
//
// - orders_created_total{outcome}: created | degraded | rejected | failed
// - orders_listed_total
// - notification_failures_total{handler}
//
// Scraped via GET /metrics on the HTTP server.
// ============================================================================

pub struct Metrics {
    registry: Registry,

    pub orders_created: IntCounterVec,
    pub orders_listed: IntCounter,
    pub notification_failures: IntCounterVec,
}

impl Metrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let orders_created = IntCounterVec::new(
            Opts::new("orders_created_total", "Create order requests by outcome"),
            &["outcome"],
        )?;
        registry.register(Box::new(orders_created.clone()))?;

        let orders_listed = IntCounter::new("orders_listed_total", "List order requests served")?;
        registry.register(Box::new(orders_listed.clone()))?;

        let notification_failures = IntCounterVec::new(
            Opts::new(
                "notification_failures_total",
                "Event handler failures after an order was persisted",
            ),
            &["handler"],
        )?;
        registry.register(Box::new(notification_failures.clone()))?;

        Ok(Self {
            registry,
            orders_created,
            orders_listed,
            notification_failures,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn record_created(&self, outcome: &str) {
        self.orders_created.with_label_values(&[outcome]).inc();
    }

    pub fn record_notification_failure(&self, handler: &str) {
        self.notification_failures.with_label_values(&[handler]).inc();
    }
}
