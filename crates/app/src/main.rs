mod cli;
mod desktop;
mod settings;
mod simulate;

use std::sync::Arc;

use clap::Parser;
use services::{Clock, WalkthroughService};

use crate::cli::{Cli, Command};

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let catalog = settings::load_catalog(&cli.route_files)?;

    match cli.command() {
        Command::Routes => {
            simulate::print_routes(&catalog);
            Ok(())
        }
        Command::Simulate(args) => {
            let timing = settings::resolve_settings(cli.config.as_deref(), &cli.timing)?;
            let service = WalkthroughService::new(Clock::system(), Arc::new(catalog), timing);
            simulate::run(service, &args.route, args.speed).await
        }
        Command::Ui(args) => {
            let timing = settings::resolve_settings(cli.config.as_deref(), &cli.timing)?;
            let service = WalkthroughService::new(Clock::system(), Arc::new(catalog), timing);
            desktop::launch(service, &args)
        }
    }
}

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        // Printed once here; nothing below the binary prints errors.
        eprintln!("error: {err:#}");
        std::process::exit(2);
    }
}
