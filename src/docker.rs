//! Docker implementation of [`ContainerRuntime`] backed by bollard.

use async_trait::async_trait;
use bollard::container::{InspectContainerOptions, ListContainersOptions};
use bollard::models::EventMessage;
use bollard::system::EventsOptions;
use bollard::{Docker, API_DEFAULT_VERSION};
use futures::StreamExt;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::config::DockerConfig;
use crate::error::HostsError;
use crate::runtime::{ContainerDetails, ContainerRuntime, EventReceiver, LifecycleEvent};

/// Docker daemon client.
#[derive(Debug, Clone)]
pub struct DockerRuntime {
    docker: Docker,
    event_buffer: usize,
}

impl DockerRuntime {
    /// Connect according to `config`.
    pub fn connect(config: &DockerConfig) -> Result<Self, HostsError> {
        if config.event_buffer == 0 {
            return Err(HostsError::Config(
                "docker.event_buffer must be greater than zero".to_string(),
            ));
        }

        let docker = match config.socket.as_deref() {
            Some(socket) if socket.starts_with("tcp://") || socket.starts_with("http://") => {
                Docker::connect_with_http(socket, config.timeout_secs, API_DEFAULT_VERSION)?
            }
            Some(socket) => {
                Docker::connect_with_unix(socket, config.timeout_secs, API_DEFAULT_VERSION)?
            }
            None => Docker::connect_with_local_defaults()?.with_timeout(
                std::time::Duration::from_secs(config.timeout_secs),
            ),
        };

        info!(socket = ?config.socket, "connected to Docker");

        Ok(Self {
            docker,
            event_buffer: config.event_buffer,
        })
    }
}

/// Map a Docker event to a lifecycle event. Events without an actor id are skipped.
fn to_lifecycle_event(message: EventMessage) -> Option<LifecycleEvent> {
    let id = message.actor.and_then(|actor| actor.id)?;
    let status = message.action.unwrap_or_default();
    Some(LifecycleEvent { id, status })
}

#[async_trait]
impl ContainerRuntime for DockerRuntime {
    async fn list_running(&self) -> Result<Vec<String>, HostsError> {
        let options = ListContainersOptions::<String> {
            all: false,
            ..Default::default()
        };
        let containers = self.docker.list_containers(Some(options)).await?;
        Ok(containers.into_iter().filter_map(|c| c.id).collect())
    }

    async fn inspect(&self, id: &str) -> Result<ContainerDetails, HostsError> {
        let response = self
            .docker
            .inspect_container(id, None::<InspectContainerOptions>)
            .await?;

        let name = response.name.ok_or_else(|| HostsError::Inspect {
            id: id.to_string(),
            reason: "container has no name".to_string(),
        })?;
        let address = response
            .network_settings
            .and_then(|settings| settings.ip_address)
            .unwrap_or_default();

        Ok(ContainerDetails { name, address })
    }

    async fn subscribe(&self) -> Result<EventReceiver, HostsError> {
        let mut filters = HashMap::new();
        filters.insert("type".to_string(), vec!["container".to_string()]);
        let options = EventsOptions::<String> {
            since: None,
            until: None,
            filters,
        };

        let mut stream = Box::pin(self.docker.events(Some(options)));
        let (tx, rx) = mpsc::channel(self.event_buffer);

        tokio::spawn(async move {
            while let Some(result) = stream.next().await {
                match result {
                    Ok(message) => {
                        let Some(event) = to_lifecycle_event(message) else {
                            debug!("skipping Docker event without actor id");
                            continue;
                        };
                        if tx.send(event).await.is_err() {
                            debug!("event receiver dropped, stopping Docker event forwarder");
                            return;
                        }
                    }
                    Err(e) => {
                        error!("Docker event stream error: {}", e);
                        return;
                    }
                }
            }
            warn!("Docker event stream ended");
        });

        info!("subscribed to Docker container events");
        Ok(rx)
    }
}
