use std::io;

use anyhow::Context;
use clap::Parser;

use stockledger_shell::{AppContext, Config, Shell};

fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    stockledger_observability::init(&config.log_level);

    let ctx = AppContext::from_config(&config).context("invalid configuration")?;
    tracing::info!(
        low_stock_threshold = config.low_stock_threshold,
        report_format = ?config.report_format,
        "starting stock ledger"
    );

    let stdin = io::stdin();
    let mut shell = Shell::new(ctx, stdin.lock(), io::stdout().lock());
    shell.run().context("stock ledger session failed")?;
    Ok(())
}
