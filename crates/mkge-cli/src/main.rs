//! mkge-picker - MadKitGroupExtension download picker

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use mkge_cli::cmd;
use mkge_cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so rendered output on stdout stays clean.
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = cli.settings()?;

    match cli.command {
        Commands::Render { output } => cmd::render::render(&config, output.as_deref()),
        Commands::Tree { pretty } => cmd::tree::tree(&config, pretty),
        Commands::List => cmd::list::list(&config),
        Commands::Url(selection) => cmd::url::url(&config, &selection),
    }
}
