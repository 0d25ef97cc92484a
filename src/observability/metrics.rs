use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};

use crate::system::{Delivery, ProcessOutcome};

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    pub orders_total: IntCounterVec,
    pub assignments_total: IntCounter,
    pub pending_orders: IntGauge,
    pub assignment_distance: Histogram,
    pub deliveries_total: IntCounter,
    pub tickets_total: IntCounterVec,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let orders_total = IntCounterVec::new(
            Opts::new("orders_total", "Processed orders by restaurant decision"),
            &["outcome"],
        )
        .expect("valid orders_total metric");

        let assignments_total =
            IntCounter::new("assignments_total", "Drivers dispatched to orders")
                .expect("valid assignments_total metric");

        let pending_orders = IntGauge::new("pending_orders", "Accepted orders waiting for a driver")
            .expect("valid pending_orders metric");

        let assignment_distance = Histogram::with_opts(
            HistogramOpts::new(
                "assignment_distance",
                "Distance from dispatched driver to restaurant",
            )
            .buckets(vec![0.0, 1.0, 2.5, 5.0, 10.0, 25.0]),
        )
        .expect("valid assignment_distance metric");

        let deliveries_total = IntCounter::new("deliveries_total", "Completed deliveries")
            .expect("valid deliveries_total metric");

        let tickets_total = IntCounterVec::new(
            Opts::new("tickets_total", "Customer care ticket events"),
            &["event"],
        )
        .expect("valid tickets_total metric");

        registry
            .register(Box::new(orders_total.clone()))
            .expect("register orders_total");
        registry
            .register(Box::new(assignments_total.clone()))
            .expect("register assignments_total");
        registry
            .register(Box::new(pending_orders.clone()))
            .expect("register pending_orders");
        registry
            .register(Box::new(assignment_distance.clone()))
            .expect("register assignment_distance");
        registry
            .register(Box::new(deliveries_total.clone()))
            .expect("register deliveries_total");
        registry
            .register(Box::new(tickets_total.clone()))
            .expect("register tickets_total");

        Self {
            registry,
            orders_total,
            assignments_total,
            pending_orders,
            assignment_distance,
            deliveries_total,
            tickets_total,
        }
    }

    pub fn record_process(&self, outcome: &ProcessOutcome, pending: usize) {
        match outcome {
            ProcessOutcome::Rejected { .. } => {
                self.orders_total.with_label_values(&["rejected"]).inc();
            }
            ProcessOutcome::Accepted { pass, .. } => {
                self.orders_total.with_label_values(&["accepted"]).inc();
                for assignment in &pass.assignments {
                    self.assignments_total.inc();
                    self.assignment_distance.observe(assignment.distance);
                }
            }
        }
        self.pending_orders.set(pending as i64);
    }

    pub fn record_deliveries(&self, deliveries: &[Delivery]) {
        self.deliveries_total.inc_by(deliveries.len() as u64);
    }

    pub fn record_ticket(&self, event: &str) {
        self.tickets_total.with_label_values(&[event]).inc();
    }

    pub fn encode(&self) -> Result<String, String> {
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();

        TextEncoder::new()
            .encode(&metric_families, &mut buffer)
            .map_err(|err| format!("failed to encode metrics: {err}"))?;

        String::from_utf8(buffer).map_err(|err| format!("metrics are not valid utf8: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::Metrics;
    use crate::system::Delivery;
    use crate::models::{AgentId, OrderId};

    #[test]
    fn encodes_recorded_counters() {
        let metrics = Metrics::new();
        metrics.record_ticket("submitted");
        metrics.record_deliveries(&[Delivery {
            order_id: OrderId(0),
            agent_id: AgentId(0),
        }]);

        let body = metrics.encode().unwrap();
        assert!(body.contains("tickets_total{event=\"submitted\"} 1"));
        assert!(body.contains("deliveries_total 1"));
    }
}
