// Authenticated GET against an open session.

use reqwest::header::ACCEPT;
use serde_json::Value;
use tracing::debug;

use crate::error::Error;
use crate::session::{Session, log_response};

impl Session {
    /// Issue one authenticated GET and parse the JSON body.
    ///
    /// Single attempt: non-2xx is [`Error::Request`], network failure is
    /// [`Error::Transport`] or [`Error::Timeout`], a non-JSON body is
    /// [`Error::Deserialization`].
    pub async fn get(&self, path: &str) -> Result<Value, Error> {
        let url = self.endpoint().url(path)?;
        debug!("GET {}", url);

        let resp = self
            .http()
            .get(url.clone())
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = resp.status();
        log_response("http get", url.as_str(), status);

        if !status.is_success() {
            return Err(Error::Request {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("unknown").to_owned(),
                url: url.to_string(),
            });
        }

        let body = resp.text().await.map_err(|e| self.transport_error(e))?;
        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })
    }
}
