pub mod chart;

use std::net::SocketAddr;

use anyhow::Result;
use clap::{Parser, Subcommand};
use chart::{process_chart_command, ChartCommand};
use tokio_util::sync::CancellationToken;
use tracing::level_filters::LevelFilter;

use crate::{
    config::ProviderConfig,
    server::{serve, shutdown::detect_shutdown},
    utils::{
        dir::logs_dir,
        logging::{enable_logging, CLI_PREFIX, SERVER_PREFIX},
    },
};

#[derive(Parser, Debug)]
#[command(name = "Wakachart", version, long_about = None)]
#[command(about = "Pie charts of your last 7 days of WakaTime stats", long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[arg(long, global = true, help = "Print logs to the console")]
    log: bool,
}

#[derive(Subcommand, Debug)]
#[command(version, about, long_about = None)]
enum Commands {
    #[command(about = "Build a single chart and print its entries")]
    Chart {
        #[command(flatten)]
        command: ChartCommand,
    },
    #[command(about = "Serve charts over HTTP")]
    Serve {
        #[arg(long, default_value = "127.0.0.1:8000", help = "Address to listen on")]
        addr: SocketAddr,
        #[command(flatten)]
        providers: ProviderConfig,
    },
}

pub async fn run_cli() -> Result<()> {
    let args = Args::parse();

    let logging_level = if args.log {
        Some(LevelFilter::TRACE)
    } else {
        None
    };

    match args.commands {
        Commands::Chart { command } => {
            let app_dir = command.providers.application_dir()?;
            enable_logging(CLI_PREFIX, &logs_dir(&app_dir), logging_level, args.log)?;
            process_chart_command(command).await
        }
        Commands::Serve { addr, providers } => {
            let app_dir = providers.application_dir()?;
            enable_logging(SERVER_PREFIX, &logs_dir(&app_dir), logging_level, args.log)?;

            let service = providers.build_service()?;
            let shutdown_token = CancellationToken::new();
            tokio::spawn(detect_shutdown(shutdown_token.clone()));
            serve(addr, service, shutdown_token).await
        }
    }
}
