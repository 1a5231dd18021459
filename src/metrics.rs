//! Metrics instrumentation for docker-hosts.
//!
//! All metrics are prefixed with `docker_hosts.`

use metrics::{counter, gauge, histogram};
use std::time::{Duration, Instant};

/// Record a lifecycle event received from the runtime.
pub fn record_event(kind: EventKind) {
    let kind_str = match kind {
        EventKind::Start => "start",
        EventKind::Die => "die",
        EventKind::Ignored => "ignored",
    };

    counter!("docker_hosts.event.count", "kind" => kind_str).increment(1);
}

/// How the engine classified a lifecycle event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Container started.
    Start,
    /// Container died.
    Die,
    /// Any other status.
    Ignored,
}

/// Record a container inspection that failed and was dropped.
pub fn record_inspect_failure() {
    counter!("docker_hosts.inspect.failure.count").increment(1);
}

/// Record a successful hosts file render.
pub fn record_render(entries: usize, duration: Duration) {
    counter!("docker_hosts.render.count").increment(1);
    histogram!("docker_hosts.render.duration.seconds").record(duration.as_secs_f64());
    gauge!("docker_hosts.registry.entries").set(entries as f64);
}

/// Helper for timing operations.
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Start a new timer.
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Get elapsed duration since timer start.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}
