use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::error::Error;

/// Username/password pair for the switch's web login.
///
/// Held in memory only. The password is wrapped in [`SecretString`] so it
/// never shows up in `Debug` output or logs.
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: SecretString,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<SecretString>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &SecretString {
        &self.password
    }

    /// Form body for `POST /login`.
    pub(crate) fn form(&self) -> [(&'static str, &str); 2] {
        [
            ("username", self.username.as_str()),
            ("password", self.password.expose_secret()),
        ]
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// The switch's management API address.
///
/// Scheme defaults to `https`; `http` exists for lab setups and test
/// servers only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceEndpoint {
    scheme: String,
    host: String,
    port: u16,
}

impl DeviceEndpoint {
    pub const DEFAULT_PORT: u16 = 443;

    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            scheme: "https".into(),
            host: host.into(),
            port,
        }
    }

    /// Build an endpoint from a base URL such as `https://10.0.0.2:8443`.
    pub fn from_url(url: &Url) -> Result<Self, Error> {
        let scheme = url.scheme();
        if scheme != "https" && scheme != "http" {
            return Err(Error::Configuration {
                message: format!("unsupported URL scheme '{scheme}'"),
            });
        }
        let host = url.host_str().ok_or_else(|| Error::Configuration {
            message: format!("URL '{url}' has no host"),
        })?;
        let port = url.port_or_known_default().unwrap_or(Self::DEFAULT_PORT);
        Ok(Self {
            scheme: scheme.to_owned(),
            host: host.to_owned(),
            port,
        })
    }

    /// Override the URL scheme (`https` or `http`).
    pub fn with_scheme(mut self, scheme: &str) -> Result<Self, Error> {
        match scheme {
            "https" | "http" => {
                scheme.clone_into(&mut self.scheme);
                Ok(self)
            }
            other => Err(Error::Configuration {
                message: format!("unsupported URL scheme '{other}'"),
            }),
        }
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// `{scheme}://{host}:{port}/`
    pub fn base_url(&self) -> Result<Url, Error> {
        let host = if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]", self.host)
        } else {
            self.host.clone()
        };
        Ok(Url::parse(&format!("{}://{host}:{}/", self.scheme, self.port))?)
    }

    /// Join a path (no leading slash needed) onto the base URL.
    pub fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url()?.join(path.trim_start_matches('/'))?)
    }
}
