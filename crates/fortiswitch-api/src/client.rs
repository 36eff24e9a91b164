// FortiSwitch monitor client
//
// Holds the device endpoint, credentials and transport settings. Every
// operation runs its own session: login, one GET, logout. Endpoint
// accessors live in `monitor/` as inherent methods on this type.

use serde_json::Value;
use tokio::sync::OnceCell;
use tracing::debug;

use crate::auth::{Credentials, DeviceEndpoint};
use crate::error::Error;
use crate::monitor::MonitorEndpoint;
use crate::session::Session;
use crate::telemetry::Identity;
use crate::transport::{TransportConfig, parse_verify_flag};

/// Client for one FortiSwitch.
///
/// Not meant to be shared between threads; poll several switches with one
/// client each. Clients share no state.
pub struct FortiSwitch {
    endpoint: DeviceEndpoint,
    credentials: Credentials,
    transport: TransportConfig,
    /// `hostname` / `serial_number` from `system/status`, fetched on first
    /// use and kept for the lifetime of this client.
    identity: OnceCell<Identity>,
}

impl FortiSwitch {
    /// Client with default transport settings (TLS verified, 30 s timeout).
    pub fn new(endpoint: DeviceEndpoint, credentials: Credentials) -> Self {
        Self::with_transport(endpoint, credentials, TransportConfig::default())
    }

    pub fn with_transport(
        endpoint: DeviceEndpoint,
        credentials: Credentials,
        transport: TransportConfig,
    ) -> Self {
        Self {
            endpoint,
            credentials,
            transport,
            identity: OnceCell::new(),
        }
    }

    pub fn endpoint(&self) -> &DeviceEndpoint {
        &self.endpoint
    }

    pub fn transport(&self) -> &TransportConfig {
        &self.transport
    }

    pub fn verify_tls(&self) -> bool {
        self.transport.verify_tls
    }

    /// Toggle TLS certificate verification for later operations.
    pub fn set_verify_tls(&mut self, verify: bool) {
        self.transport.verify_tls = verify;
    }

    /// Toggle TLS verification from a textual flag (`"true"`, `"no"`, ...).
    ///
    /// Non-boolean values fail with [`Error::Configuration`] and leave the
    /// current setting untouched.
    pub fn set_verify_tls_str(&mut self, value: &str) -> Result<(), Error> {
        self.transport.verify_tls = parse_verify_flag(value)?;
        Ok(())
    }

    /// Fetch one monitor document without reshaping it.
    ///
    /// Opens a session, issues the GET and always logs out afterwards,
    /// whether the GET succeeded or not. A failed login returns at once;
    /// there is nothing to close.
    pub async fn fetch_raw(&self, endpoint: MonitorEndpoint) -> Result<Value, Error> {
        debug!(endpoint = endpoint.name(), "fetching");
        let session = Session::open(&self.endpoint, &self.credentials, &self.transport).await?;
        let result = session.get(&endpoint.path()).await;
        session.close().await;
        result
    }

    /// Hostname and serial number of the switch.
    ///
    /// The first call fetches `system/status`; later calls on the same
    /// client return the cached value. A failed fetch is not cached.
    pub async fn identity(&self) -> Result<&Identity, Error> {
        self.identity
            .get_or_try_init(|| async {
                let status = self.system_status().await?;
                crate::monitor::system::identity_from_status(&status)
            })
            .await
    }

    pub async fn hostname(&self) -> Result<&str, Error> {
        Ok(&self.identity().await?.hostname)
    }

    pub async fn serial_number(&self) -> Result<&str, Error> {
        Ok(&self.identity().await?.serial_number)
    }
}
