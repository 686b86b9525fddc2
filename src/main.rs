use anyhow::Result;
use clap::Parser;

use yougile::cli::Cli;
use yougile::logging;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;
    cli.run().await
}
