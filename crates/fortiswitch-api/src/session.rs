// Session lifecycle
//
// Cookie-based login/logout against the switch's web interface. A session
// owns its own `reqwest::Client` and cookie jar; the login response sets
// the session cookie and every later request on that client carries it.

use std::time::Duration;

use reqwest::StatusCode;
use tracing::{debug, info, warn};

use crate::auth::{Credentials, DeviceEndpoint};
use crate::error::Error;
use crate::transport::TransportConfig;

const LOGIN_PATH: &str = "login";
const LOGOUT_PATH: &str = "logout";

/// An authenticated handle bound to one switch.
///
/// Created by [`Session::open`], destroyed by [`Session::close`]. Never
/// shared between operations.
pub struct Session {
    http: reqwest::Client,
    endpoint: DeviceEndpoint,
    timeout: Duration,
}

impl Session {
    /// Log in and return the open session.
    ///
    /// `POST {scheme}://{host}:{port}/login` with form fields `username`
    /// and `password`. Any status outside 2xx/3xx is an
    /// [`Error::Authentication`].
    pub async fn open(
        endpoint: &DeviceEndpoint,
        credentials: &Credentials,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let config = transport.clone().with_cookie_jar();
        let http = config.build_client()?;
        let session = Self {
            http,
            endpoint: endpoint.clone(),
            timeout: transport.timeout,
        };
        session.login(credentials).await?;
        Ok(session)
    }

    async fn login(&self, credentials: &Credentials) -> Result<(), Error> {
        let url = self.endpoint.url(LOGIN_PATH)?;
        debug!(username = credentials.username(), "logging in at {}", url);

        let resp = self
            .http
            .post(url.clone())
            .form(&credentials.form())
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = resp.status();
        log_response("http post", url.as_str(), status);

        if !(status.is_success() || status.is_redirection()) {
            return Err(Error::Authentication {
                message: format!("login rejected (HTTP {status}) at {url}"),
                status: Some(status.as_u16()),
            });
        }

        debug!("login successful");
        Ok(())
    }

    /// End the session on the switch.
    ///
    /// `POST {scheme}://{host}:{port}/logout`. The status is logged but
    /// not checked; only transport failures are returned.
    pub async fn logout(&self) -> Result<(), Error> {
        let url = self.endpoint.url(LOGOUT_PATH)?;
        debug!("logging out at {}", url);

        let resp = self
            .http
            .post(url.clone())
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        log_response("http post", url.as_str(), resp.status());
        debug!("logout complete");
        Ok(())
    }

    /// Consume the session, logging out on a best-effort basis.
    ///
    /// A failed logout is logged and swallowed: data already fetched with
    /// this session is still valid.
    pub async fn close(self) {
        if let Err(err) = self.logout().await {
            warn!(
                message_type = "logout",
                error = %err,
                host = self.endpoint.host(),
                "logout failed"
            );
        }
    }

    pub fn endpoint(&self) -> &DeviceEndpoint {
        &self.endpoint
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Map a reqwest failure, splitting timer expiry from other transport errors.
    pub(crate) fn transport_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                timeout: self.timeout,
            }
        } else {
            Error::Transport(err)
        }
    }
}

/// Structured per-request log line: info on success, warn otherwise.
pub(crate) fn log_response(message_type: &str, url: &str, status: StatusCode) {
    let reason = status.canonical_reason().unwrap_or("");
    if status.is_success() || status.is_redirection() {
        info!(
            message_type,
            url,
            status_code = status.as_u16(),
            "{reason}"
        );
    } else {
        warn!(
            message_type,
            url,
            status_code = status.as_u16(),
            "{reason}"
        );
    }
}
