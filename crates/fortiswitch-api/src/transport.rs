// Shared transport configuration for building reqwest::Client instances.
//
// Every session builds its own client (and cookie jar) from this config,
// so TLS, timeout and redirect settings live in one place.

use std::sync::{Arc, Once};
use std::time::Duration;

use reqwest::cookie::Jar;
use reqwest::redirect::Policy;
use tracing::warn;

use crate::error::Error;

const USER_AGENT: &str = concat!("fortiswitch-api/", env!("CARGO_PKG_VERSION"));

static INSECURE_WARNING: Once = Once::new();

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Verify the switch's TLS certificate.
    pub verify_tls: bool,
    /// Overall per-request timeout (login, GET, logout each).
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub cookie_jar: Option<Arc<Jar>>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            verify_tls: true,
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            cookie_jar: None,
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    ///
    /// Redirects are not followed: the login endpoint answers 3xx on
    /// success and that status must stay visible to the caller.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .connect_timeout(self.connect_timeout)
            .user_agent(USER_AGENT)
            .redirect(Policy::none());

        if !self.verify_tls {
            acknowledge_insecure_transport();
            builder = builder.danger_accept_invalid_certs(true);
        }

        if let Some(ref jar) = self.cookie_jar {
            builder = builder.cookie_provider(Arc::clone(jar));
        }

        builder.build().map_err(|e| Error::Configuration {
            message: format!("failed to build HTTP client: {e}"),
        })
    }

    /// Create a config with a fresh cookie jar (for session auth).
    pub fn with_cookie_jar(mut self) -> Self {
        self.cookie_jar = Some(Arc::new(Jar::default()));
        self
    }
}

/// Log the insecure-transport warning once per process.
fn acknowledge_insecure_transport() {
    INSECURE_WARNING.call_once(|| {
        warn!(
            message_type = "insecure_transport",
            "TLS certificate verification is disabled; the switch identity is not checked"
        );
    });
}

/// Parse a textual TLS-verification flag.
///
/// Accepts the usual boolean spellings (`true`/`false`, `yes`/`no`,
/// `on`/`off`, `1`/`0`), case-insensitive. Anything else is a
/// configuration error.
pub fn parse_verify_flag(value: &str) -> Result<bool, Error> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        other => Err(Error::Configuration {
            message: format!("TLS verification flag must be a boolean, got '{other}'"),
        }),
    }
}
