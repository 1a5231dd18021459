//! Reconciliation of runtime lifecycle events into the hosts file.
//!
//! Each container moves `absent -> present` on a successfully inspected
//! start (or initial scan) and `present -> absent` on die. Every mutation,
//! including a no-op removal, is followed by a render.

use tracing::{debug, info, warn};

use crate::error::HostsError;
use crate::metrics::{self, EventKind};
use crate::overlay::StaticOverlay;
use crate::registry::{HostEntry, Registry};
use crate::render::HostsWriter;
use crate::runtime::{ContainerRuntime, EventReceiver, LifecycleEvent};

/// Status reported when a container starts.
pub const STATUS_START: &str = "start";
/// Status reported when a container dies.
pub const STATUS_DIE: &str = "die";

/// Classify a lifecycle status.
pub fn classify(status: &str) -> EventKind {
    match status {
        STATUS_START => EventKind::Start,
        STATUS_DIE => EventKind::Die,
        _ => EventKind::Ignored,
    }
}

/// Owns the registry and keeps the hosts file in step with it.
pub struct HostsEngine<R> {
    runtime: R,
    registry: Registry,
    overlay: StaticOverlay,
    writer: HostsWriter,
}

impl<R: ContainerRuntime> HostsEngine<R> {
    /// Create an engine with an empty registry.
    pub fn new(runtime: R, overlay: StaticOverlay, writer: HostsWriter) -> Self {
        Self {
            runtime,
            registry: Registry::new(),
            overlay,
            writer,
        }
    }

    /// Current registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Loaded overlay.
    pub fn overlay(&self) -> &StaticOverlay {
        &self.overlay
    }

    /// Inspect a container and record it.
    ///
    /// An inspection failure is logged and the event dropped: the registry is
    /// left untouched and nothing is rendered. Only a render failure is returned.
    pub async fn add_container(&mut self, id: &str) -> Result<(), HostsError> {
        let details = match self.runtime.inspect(id).await {
            Ok(details) => details,
            Err(e) => {
                warn!(container_id = id, error = %e, "inspect failed, dropping event");
                metrics::record_inspect_failure();
                return Ok(());
            }
        };

        let entry = HostEntry::from_runtime(&details.name, &details.address);
        info!(
            container_id = id,
            name = %entry.name,
            address = %entry.address,
            "added container"
        );
        self.registry.upsert(id, entry);
        self.render()
    }

    /// Forget a container, then render. Unknown ids are a no-op apart from the render.
    pub fn remove_container(&mut self, id: &str) -> Result<(), HostsError> {
        if let Some(entry) = self.registry.remove(id) {
            info!(container_id = id, name = %entry.name, "removed container");
        } else {
            debug!(container_id = id, "die for unknown container");
        }
        self.render()
    }

    /// Add every container the runtime currently reports as running.
    pub async fn sync_running(&mut self) -> Result<(), HostsError> {
        let ids = self.runtime.list_running().await?;
        info!(count = ids.len(), "found running containers");
        for id in ids {
            self.add_container(&id).await?;
        }
        Ok(())
    }

    /// Apply a single lifecycle event.
    pub async fn handle_event(&mut self, event: &LifecycleEvent) -> Result<(), HostsError> {
        let kind = classify(&event.status);
        metrics::record_event(kind);
        match kind {
            EventKind::Start => self.add_container(&event.id).await,
            EventKind::Die => self.remove_container(&event.id),
            EventKind::Ignored => {
                debug!(container_id = %event.id, status = %event.status, "ignoring event");
                Ok(())
            }
        }
    }

    /// Consume events until the queue closes.
    ///
    /// Never returns `Ok`: a closed event source is reported as
    /// [`HostsError::EventSourceClosed`], any render failure is returned as is.
    pub async fn run(&mut self, events: &mut EventReceiver) -> Result<(), HostsError> {
        while let Some(event) = events.recv().await {
            self.handle_event(&event).await?;
        }
        Err(HostsError::EventSourceClosed)
    }

    fn render(&self) -> Result<(), HostsError> {
        self.writer.write(&self.overlay, &self.registry)
    }
}
