mod planner;

use anyhow::Result;
use tracing_subscriber::{fmt, EnvFilter};

use fx_trade_planner::config::Config;

use crate::planner::{Command, Planner, USAGE};

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = Config::from_env();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if matches!(args.first().map(String::as_str), Some("help" | "-h" | "--help")) {
        println!("{}", USAGE);
        return Ok(());
    }

    let command = Command::parse(&args)?;
    let mut planner = Planner::open(cfg)?;
    planner.execute(command).await?;

    Ok(())
}
