//! Daemon setup and lifecycle management.

use chrono::Local;
use std::future::Future;
use tracing::info;

use crate::backup;
use crate::config::{Config, HostsConfig};
use crate::docker::DockerRuntime;
use crate::engine::HostsEngine;
use crate::error::HostsError;
use crate::overlay::StaticOverlay;
use crate::render::HostsWriter;
use crate::runtime::ContainerRuntime;

/// Keeps the hosts file in sync with running Docker containers.
pub struct HostsDaemon {
    config: Config,
}

impl HostsDaemon {
    /// Create a daemon with the given configuration.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Connect to Docker and run until `shutdown` resolves or a fatal error occurs.
    pub async fn run(self, shutdown: impl Future<Output = ()>) -> Result<(), HostsError> {
        let runtime = DockerRuntime::connect(&self.config.docker)?;
        run_with_runtime(&self.config.hosts, runtime, shutdown).await
    }
}

/// Run the full startup sequence and event loop against any runtime.
///
/// Order: subscribe, back up the target, load the overlay, add running
/// containers, then consume events. Subscribing first buffers events that
/// arrive during startup.
pub async fn run_with_runtime<R: ContainerRuntime>(
    hosts: &HostsConfig,
    runtime: R,
    shutdown: impl Future<Output = ()>,
) -> Result<(), HostsError> {
    info!(
        hosts_file = %hosts.target_path.display(),
        overlay = %hosts.overlay_path.display(),
        backup_dir = %hosts.backup_dir.display(),
        "Starting hosts sync"
    );

    let mut events = runtime.subscribe().await?;

    backup::snapshot(
        &hosts.target_path,
        &hosts.backup_dir,
        Local::now().date_naive(),
    )?;

    let overlay = StaticOverlay::load(&hosts.overlay_path);
    let writer = HostsWriter::new(hosts.target_path.clone());
    let mut engine = HostsEngine::new(runtime, overlay, writer);

    engine.sync_running().await?;
    info!(
        containers = engine.registry().len(),
        "Initial sync complete, watching container events"
    );

    tokio::select! {
        _ = shutdown => {
            info!("Shutdown requested");
            Ok(())
        }
        result = engine.run(&mut events) => result,
    }
}
