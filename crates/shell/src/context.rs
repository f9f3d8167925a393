use stockledger_core::DomainResult;
use stockledger_inventory::StockRegistry;
use stockledger_products::LowStockThreshold;

use crate::config::{Config, ReportFormat};

/// Application state for one shell session, built once at startup.
#[derive(Debug, Clone, Default)]
pub struct AppContext {
    pub registry: StockRegistry,
    pub report_format: ReportFormat,
}

impl AppContext {
    pub fn from_config(config: &Config) -> DomainResult<Self> {
        let threshold = LowStockThreshold::new(config.low_stock_threshold)?;
        Ok(Self {
            registry: StockRegistry::with_threshold(threshold),
            report_format: config.report_format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_flows_into_registry() {
        let config = Config {
            low_stock_threshold: 3,
            ..Config::default()
        };
        let ctx = AppContext::from_config(&config).unwrap();
        assert_eq!(ctx.registry.threshold().value(), 3);
    }

    #[test]
    fn negative_threshold_is_a_validation_error() {
        let config = Config {
            low_stock_threshold: -2,
            ..Config::default()
        };
        assert!(AppContext::from_config(&config).is_err());
    }
}
