// fortiswitch-api: Async Rust client for FortiSwitchOS monitor telemetry

pub mod auth;
pub mod client;
pub mod enrich;
pub mod error;
pub mod monitor;
pub mod operation;
mod request;
pub mod session;
pub mod telemetry;
pub mod transport;

pub use auth::{Credentials, DeviceEndpoint};
pub use client::FortiSwitch;
pub use enrich::{Enrichment, SerialKey};
pub use error::{Error, ErrorKind};
pub use monitor::MonitorEndpoint;
pub use operation::Operation;
pub use session::Session;
pub use telemetry::{Identity, Record, Telemetry};
pub use transport::{TransportConfig, parse_verify_flag};
