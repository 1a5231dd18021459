//! Interface to the container runtime.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::HostsError;

/// Receiving end of the lifecycle event queue.
/// The queue closes when the runtime's event source ends.
pub type EventReceiver = mpsc::Receiver<LifecycleEvent>;

/// A change in a container's running state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleEvent {
    /// Runtime-assigned container id.
    pub id: String,
    /// Free-form status; only `start` and `die` are acted on.
    pub status: String,
}

impl LifecycleEvent {
    /// Create an event.
    pub fn new(id: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            status: status.into(),
        }
    }
}

/// What inspection reports about a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerDetails {
    /// Name as reported by the runtime, e.g. `/web`.
    pub name: String,
    /// Primary network address; empty when none is assigned.
    pub address: String,
}

/// Operations the engine needs from a container runtime.
#[async_trait]
pub trait ContainerRuntime: Send + Sync {
    /// Ids of currently running containers.
    async fn list_running(&self) -> Result<Vec<String>, HostsError>;

    /// Inspect a single container.
    async fn inspect(&self, id: &str) -> Result<ContainerDetails, HostsError>;

    /// Start receiving lifecycle events.
    async fn subscribe(&self) -> Result<EventReceiver, HostsError>;
}
