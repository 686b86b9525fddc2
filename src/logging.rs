use anyhow::Result;
use tracing_subscriber::fmt::Layer;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Registry;

/// Environment variable holding the log filter, e.g. `YOUGILE_LOG=debug`.
pub const LOG_ENV: &str = "YOUGILE_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Installs the global subscriber. Logs go to stderr so prompts stay clean.
pub fn init(verbose: bool) -> Result<()> {
    let fmt_layer = Layer::new()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let subscriber = Registry::default().with(fmt_layer).with(filter(verbose));
    tracing::subscriber::set_global_default(subscriber)?;

    tracing::debug!("tracing set up");
    Ok(())
}

fn filter(verbose: bool) -> EnvFilter {
    if verbose {
        return EnvFilter::new("debug");
    }
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}
