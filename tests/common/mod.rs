//! Shared test infrastructure for docker-hosts integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tempfile::TempDir;
use tokio::sync::mpsc;

use docker_hosts::config::HostsConfig;
use docker_hosts::error::HostsError;
use docker_hosts::runtime::{ContainerDetails, ContainerRuntime, EventReceiver, LifecycleEvent};

// --- FakeRuntime ---

#[derive(Default)]
struct FakeState {
    containers: HashMap<String, ContainerDetails>,
    running: Vec<String>,
}

/// Scripted container runtime.
///
/// Containers registered with [`FakeRuntime::add`] inspect successfully; any
/// other id fails inspection. Events are pushed through the sender returned
/// by [`FakeRuntime::new`].
#[derive(Clone)]
pub struct FakeRuntime {
    state: Arc<Mutex<FakeState>>,
    events: Arc<Mutex<Option<EventReceiver>>>,
}

impl FakeRuntime {
    pub fn new() -> (Self, mpsc::Sender<LifecycleEvent>) {
        let (tx, rx) = mpsc::channel(64);
        let runtime = Self {
            state: Arc::new(Mutex::new(FakeState::default())),
            events: Arc::new(Mutex::new(Some(rx))),
        };
        (runtime, tx)
    }

    /// Make a container inspectable.
    pub fn add(&self, id: &str, name: &str, address: &str) {
        self.state.lock().unwrap().containers.insert(
            id.to_string(),
            ContainerDetails {
                name: name.to_string(),
                address: address.to_string(),
            },
        );
    }

    /// Make a container inspectable and report it as running at startup.
    pub fn add_running(&self, id: &str, name: &str, address: &str) {
        self.add(id, name, address);
        self.state.lock().unwrap().running.push(id.to_string());
    }

    /// Make a container fail inspection from now on.
    pub fn forget(&self, id: &str) {
        self.state.lock().unwrap().containers.remove(id);
    }
}

#[async_trait]
impl ContainerRuntime for FakeRuntime {
    async fn list_running(&self) -> Result<Vec<String>, HostsError> {
        Ok(self.state.lock().unwrap().running.clone())
    }

    async fn inspect(&self, id: &str) -> Result<ContainerDetails, HostsError> {
        self.state
            .lock()
            .unwrap()
            .containers
            .get(id)
            .cloned()
            .ok_or_else(|| HostsError::Inspect {
                id: id.to_string(),
                reason: "No such container".to_string(),
            })
    }

    async fn subscribe(&self) -> Result<EventReceiver, HostsError> {
        self.events
            .lock()
            .unwrap()
            .take()
            .ok_or_else(|| HostsError::Config("already subscribed".to_string()))
    }
}

// --- Filesystem fixtures ---

pub const ORIGINAL_HOSTS: &str = "127.0.0.1 localhost\n::1 localhost ip6-localhost\n";

/// Temp directory laid out like a host: `hosts`, `myhosts`, and a `backups/` dir.
pub struct HostsFixture {
    pub dir: TempDir,
}

impl HostsFixture {
    /// Fixture with an existing hosts file and no overlay.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("hosts"), ORIGINAL_HOSTS).unwrap();
        fs::create_dir(dir.path().join("backups")).unwrap();
        Self { dir }
    }

    pub fn with_overlay(self, text: &str) -> Self {
        fs::write(self.overlay_path(), text).unwrap();
        self
    }

    pub fn target_path(&self) -> PathBuf {
        self.dir.path().join("hosts")
    }

    pub fn overlay_path(&self) -> PathBuf {
        self.dir.path().join("myhosts")
    }

    pub fn backup_dir(&self) -> PathBuf {
        self.dir.path().join("backups")
    }

    pub fn config(&self) -> HostsConfig {
        HostsConfig {
            target_path: self.target_path(),
            overlay_path: self.overlay_path(),
            backup_dir: self.backup_dir(),
        }
    }

    pub fn hosts(&self) -> String {
        fs::read_to_string(self.target_path()).unwrap()
    }

    /// Names of files in the backup directory.
    pub fn backups(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.backup_dir())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

/// Poll `path` until it holds `expected`, failing after a few seconds.
pub async fn wait_for_contents(path: &Path, expected: &str) {
    for _ in 0..200 {
        if fs::read_to_string(path).map(|s| s == expected).unwrap_or(false) {
            return;
        }
        tokio::time::sleep(Duration::from_millis(25)).await;
    }
    panic!(
        "hosts file never reached expected contents.\nexpected: {:?}\nactual:   {:?}",
        expected,
        fs::read_to_string(path).ok()
    );
}

/// Entry lines of a rendered file (everything after the separator).
pub fn entry_lines<'a>(rendered: &'a str, overlay: &str) -> Vec<&'a str> {
    let rest = rendered
        .strip_prefix(overlay)
        .expect("render does not start with overlay");
    let rest = if !overlay.is_empty() && !overlay.ends_with('\n') {
        rest.strip_prefix('\n').expect("overlay not terminated")
    } else {
        rest
    };
    rest.strip_prefix("\n\n\n")
        .expect("missing three blank line separator")
        .lines()
        .collect()
}
