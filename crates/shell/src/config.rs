//! Command-line / environment configuration.

use clap::{Parser, ValueEnum};

use stockledger_products::DEFAULT_LOW_STOCK_THRESHOLD;

/// How option 4 renders the stock report.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, ValueEnum)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "stockledger", version, about = "Interactive inventory ledger.")]
pub struct Config {
    /// Quantity at or below which a product is flagged as low stock.
    #[arg(
        long,
        env = "STOCKLEDGER_LOW_STOCK_THRESHOLD",
        default_value_t = DEFAULT_LOW_STOCK_THRESHOLD,
        value_parser = clap::value_parser!(i64).range(0..)
    )]
    pub low_stock_threshold: i64,

    /// Default tracing filter when RUST_LOG is not set.
    #[arg(long, env = "STOCKLEDGER_LOG", default_value = "warn")]
    pub log_level: String,

    /// Report output format.
    #[arg(long, env = "STOCKLEDGER_REPORT_FORMAT", value_enum, default_value_t = ReportFormat::Text)]
    pub report_format: ReportFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
            log_level: "warn".to_string(),
            report_format: ReportFormat::Text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_flags_are_parsed() {
        let config = Config::try_parse_from([
            "stockledger",
            "--low-stock-threshold",
            "3",
            "--log-level",
            "info",
            "--report-format",
            "json",
        ])
        .unwrap();

        assert_eq!(config.low_stock_threshold, 3);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.report_format, ReportFormat::Json);
    }

    #[test]
    fn negative_threshold_is_rejected() {
        let res = Config::try_parse_from(["stockledger", "--low-stock-threshold", "-1"]);
        assert!(res.is_err());
    }

    #[test]
    fn unknown_report_format_is_rejected() {
        let res = Config::try_parse_from(["stockledger", "--report-format", "xml"]);
        assert!(res.is_err());
    }
}
