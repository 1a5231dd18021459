//! Docker hosts - keeps a hosts file in sync with running containers.
//!
//! As containers start and die, their runtime-assigned addresses are added to
//! or removed from a hosts-style file, placed after a static block of user
//! overrides.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         docker-hosts                         │
//! │                                                              │
//! │  ┌──────────────────┐  events   ┌──────────────────┐         │
//! │  │  Docker (bollard)│──────────▶│   HostsEngine    │         │
//! │  │  list / inspect  │◀──────────│   (Registry)     │         │
//! │  └──────────────────┘  inspect  └────────┬─────────┘         │
//! │                                          │ every mutation    │
//! │  ┌──────────────────┐                    ▼                   │
//! │  │  myhosts overlay │──────────▶┌──────────────────┐         │
//! │  └──────────────────┘           │   HostsWriter    │──▶ /etc/hosts
//! │                                 └──────────────────┘         │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Startup
//!
//! 1. Subscribe to container events (buffered until the loop starts).
//! 2. Copy the existing hosts file to `hosts.<YYYYMMDD>[.<N>]`.
//! 3. Load the overlay file once; missing is fine.
//! 4. Add every running container, rendering after each.
//! 5. Apply `start` / `die` events until the event stream ends.
//!
//! ## Output format
//!
//! ```text
//! <overlay text>
//!
//!
//!
//! 10.0.0.5 web
//! 10.0.0.6 db
//! ```
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use docker_hosts::{Config, HostsDaemon};
//!
//! #[tokio::main]
//! async fn main() {
//!     let daemon = HostsDaemon::new(Config::default());
//!     daemon
//!         .run(async { tokio::signal::ctrl_c().await.unwrap() })
//!         .await
//!         .unwrap();
//! }
//! ```

#![warn(missing_docs)]

pub mod backup;
pub mod config;
pub mod daemon;
pub mod docker;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod overlay;
pub mod registry;
pub mod render;
pub mod runtime;
pub mod telemetry;

// Re-export main types
pub use config::{Config, DockerConfig, HostsConfig, TelemetryConfig};
pub use daemon::HostsDaemon;
pub use engine::HostsEngine;
pub use error::HostsError;
pub use overlay::StaticOverlay;
pub use registry::{HostEntry, Registry};
pub use runtime::{ContainerDetails, ContainerRuntime, EventReceiver, LifecycleEvent};
