//! Configuration types for docker-hosts.
//!
//! Every field has a default, so the daemon runs without a config file.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Managed file locations.
    #[serde(default)]
    pub hosts: HostsConfig,

    /// Docker connection settings.
    #[serde(default)]
    pub docker: DockerConfig,

    /// Telemetry configuration.
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Paths of the files the daemon reads and writes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostsConfig {
    /// Hosts file kept in sync with running containers.
    #[serde(default = "default_target_path")]
    pub target_path: PathBuf,

    /// User-maintained overrides prepended to every render.
    #[serde(default = "default_overlay_path")]
    pub overlay_path: PathBuf,

    /// Directory receiving the startup backup of the hosts file.
    #[serde(default = "default_backup_dir")]
    pub backup_dir: PathBuf,
}

impl Default for HostsConfig {
    fn default() -> Self {
        Self {
            target_path: default_target_path(),
            overlay_path: default_overlay_path(),
            backup_dir: default_backup_dir(),
        }
    }
}

/// Docker daemon connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DockerConfig {
    /// Socket to connect to (e.g., "unix:///var/run/docker.sock").
    /// When unset, the local defaults (including `DOCKER_HOST`) are used.
    #[serde(default)]
    pub socket: Option<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Number of lifecycle events buffered between the Docker stream and the engine.
    #[serde(default = "default_event_buffer")]
    pub event_buffer: usize,
}

impl Default for DockerConfig {
    fn default() -> Self {
        Self {
            socket: None,
            timeout_secs: default_timeout_secs(),
            event_buffer: default_event_buffer(),
        }
    }
}

/// Telemetry configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Log level filter (e.g., "info", "debug", "docker_hosts=debug,warn").
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Prometheus metrics exporter address.
    #[serde(default)]
    pub prometheus_addr: Option<SocketAddr>,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            prometheus_addr: None,
        }
    }
}

fn default_target_path() -> PathBuf {
    PathBuf::from("/etc/hosts")
}

fn default_overlay_path() -> PathBuf {
    PathBuf::from("./myhosts")
}

fn default_backup_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_event_buffer() -> usize {
    64
}

fn default_log_level() -> String {
    "info".to_string()
}
