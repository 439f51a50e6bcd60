//! ELD Trip Planner - HTTP service entry point.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use eld_trip_planner::services::geocoding::create_geocoder;
use eld_trip_planner::services::routing::create_router;
use eld_trip_planner::services::trip::TripService;
use eld_trip_planner::{cli, config, handlers};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    dotenvy::dotenv().ok();

    let mut config = config::Config::from_env();

    match cli.command {
        Some(cli::Command::Serve { bind }) => {
            if let Some(bind) = bind {
                config.bind_addr = bind;
            }
            run_server(config).await
        }
        None => run_server(config).await,
    }
}

async fn run_server(config: config::Config) -> Result<()> {
    let logs_dir = std::env::var("LOGS_DIR").unwrap_or_else(|_| "./logs".to_string());
    std::fs::create_dir_all(&logs_dir).ok();

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &logs_dir, "planner.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,eld_trip_planner=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    info!("Starting ELD Trip Planner...");

    let geocoder = create_geocoder(&config);
    let router = create_router(&config);

    let state = Arc::new(handlers::AppState {
        trips: TripService::new(geocoder, router),
    });

    let addr: std::net::SocketAddr = config
        .bind_addr
        .parse()
        .with_context(|| format!("Invalid bind address {}", config.bind_addr))?;

    handlers::serve(state, addr).await
}
