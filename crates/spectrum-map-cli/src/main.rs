//! Spectrum Map CLI Entry Point

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use spectrum_map_cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Survey(args) => {
            spectrum_map_cli::survey::execute(args)?;
        }
        Commands::Version => {
            println!("spectrum-map {}", env!("CARGO_PKG_VERSION"));
            println!("estimator library version: {}", spectrum_map::VERSION);
        }
    }

    Ok(())
}
