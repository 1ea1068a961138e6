use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tui_snake::game::{GameConfig, Variant};
use tui_snake::logging;
use tui_snake::modes::HumanMode;

#[derive(Parser)]
#[command(name = "tui_snake")]
#[command(version, about = "Snake in the terminal")]
struct Cli {
    /// Rule set: classic (open field, pausable) or walled (lethal border, big apples)
    #[arg(long, value_enum, default_value = "classic")]
    variant: Variant,

    /// Grid width
    #[arg(long, default_value = "20")]
    width: usize,

    /// Grid height
    #[arg(long, default_value = "10")]
    height: usize,

    /// Seed for apple placement, random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Where to write the log
    #[arg(long, default_value = logging::DEFAULT_LOG_FILE)]
    log_file: PathBuf,

    /// Log at debug level
    #[arg(long)]
    debug: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::setup(&cli.log_file, cli.debug)?;

    let config = GameConfig::new(cli.width, cli.height)
        .with_variant(cli.variant)
        .with_seed(cli.seed);
    config.validate()?;

    log::info!("starting game with {}", serde_json::to_string(&config)?);

    let mut human_mode = HumanMode::new(config);
    human_mode.run().await?;

    Ok(())
}
