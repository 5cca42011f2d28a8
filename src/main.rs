use std::path::PathBuf;

use clap::Parser;

use employee_service::config::validation::validate_config;
use employee_service::config::{read_config, ConfigError, ServiceConfig};
use employee_service::lifecycle::{bootstrap, wait_for_termination, Shutdown};
use employee_service::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "employee-service")]
#[command(about = "Employee records over HTTP with bounded store calls", long_about = None)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address
    #[arg(long)]
    bind: Option<String>,

    /// Override database.url
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => read_config(path)?,
        None => ServiceConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }
    if let Some(url) = args.database_url {
        config.database.url = url;
    }
    validate_config(&config).map_err(ConfigError::Validation)?;

    logging::init_logging(&config.observability)?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "employee-service starting");

    tracing::info!(
        bind_address = %config.listener.bind_address,
        database_url = %config.database.url,
        operation_timeout_ms = config.timeouts.operation_ms,
        on_timeout = ?config.timeouts.on_timeout,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let service = bootstrap(config).await?;
    tracing::info!(address = %service.listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let stopped = shutdown.subscribe();
    let mut server = tokio::spawn(service.server.run(service.listener, stopped));

    tokio::select! {
        _ = wait_for_termination() => {
            shutdown.trigger();
        }
        result = &mut server => {
            // Server exited on its own
            result??;
            service.store.pool().close().await;
            return Ok(());
        }
    }

    server.await??;
    service.store.pool().close().await;

    tracing::info!("Shutdown complete");
    Ok(())
}
