//! docker-hosts binary entry point.

use clap::Parser;
use docker_hosts::{telemetry, Config, HostsDaemon};
use std::path::PathBuf;
use tracing::{error, info};

/// Keep a hosts file in sync with running Docker containers.
#[derive(Parser, Debug)]
#[command(name = "docker-hosts")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file (TOML). Missing file means defaults.
    #[arg(short, long, default_value = "docker-hosts.toml")]
    config: PathBuf,
}

/// Resolves on SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration
    let config: Config = config::Config::builder()
        .add_source(config::File::from(args.config.clone()).required(false))
        .add_source(
            config::Environment::with_prefix("DOCKER_HOSTS")
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()?;

    telemetry::init(&config.telemetry).map_err(|e| e as Box<dyn std::error::Error>)?;

    info!(
        config_file = %args.config.display(),
        hosts_file = %config.hosts.target_path.display(),
        docker_socket = ?config.docker.socket,
        "Starting docker-hosts"
    );

    let daemon = HostsDaemon::new(config);
    let result = daemon.run(shutdown_signal()).await;

    if let Err(e) = result {
        error!("docker-hosts stopped: {}", e);
        return Err(e.into());
    }

    info!("docker-hosts shutdown complete");
    Ok(())
}
