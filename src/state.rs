use crate::config::Config;
use crate::observability::metrics::Metrics;
use crate::setup::demo_system;
use crate::support::CustomerCare;
use crate::system::DeliverySystem;

pub struct AppState {
    pub config: Config,
    pub system: DeliverySystem,
    pub support: CustomerCare,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self::with_system(config, demo_system())
    }

    pub fn with_system(config: Config, system: DeliverySystem) -> Self {
        Self {
            config,
            system,
            support: CustomerCare::new(),
            metrics: Metrics::new(),
        }
    }
}
