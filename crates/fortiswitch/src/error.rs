//! CLI error types with miette diagnostics.
//!
//! Maps `fortiswitch_api::Error` variants into user-facing errors with
//! help text and a process exit code.

use miette::Diagnostic;
use thiserror::Error;

use fortiswitch_api::ErrorKind;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const REQUEST: i32 = 4;
    pub const RESPONSE: i32 = 5;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Settings ─────────────────────────────────────────────────────
    #[error("Missing required settings: {}", .fields.join(", "))]
    #[diagnostic(
        code(fortiswitch::missing_settings),
        help(
            "Pass --host, --username and --password, set FORTISWITCH_HOST,\n\
             FORTISWITCH_USER and FORTISWITCH_PASS, or add them to the config file."
        )
    )]
    MissingSettings { fields: Vec<&'static str> },

    #[error("Unsupported operation '{given}'")]
    #[diagnostic(
        code(fortiswitch::unsupported_operation),
        help("Supported operations: {supported}")
    )]
    UnsupportedOperation {
        given: String,
        supported: String,
    },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(fortiswitch::configuration))]
    Configuration { message: String },

    #[error(transparent)]
    #[diagnostic(code(fortiswitch::config))]
    Config(Box<figment::Error>),

    #[error("Could not install logger: {message}")]
    #[diagnostic(code(fortiswitch::logging))]
    Logging { message: String },

    // ── Switch ───────────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(
        code(fortiswitch::auth_failed),
        help("Check the username and password for the switch's management API.")
    )]
    Auth(fortiswitch_api::Error),

    #[error(transparent)]
    #[diagnostic(
        code(fortiswitch::connection_failed),
        help(
            "Check that the switch is reachable on the management port.\n\
             For self-signed certificates use --insecure (-k)."
        )
    )]
    Connection(fortiswitch_api::Error),

    #[error(transparent)]
    #[diagnostic(
        code(fortiswitch::timeout),
        help("Increase the timeout with --timeout or check switch responsiveness.")
    )]
    Timeout(fortiswitch_api::Error),

    #[error(transparent)]
    #[diagnostic(code(fortiswitch::request_failed))]
    Request(fortiswitch_api::Error),

    #[error(transparent)]
    #[diagnostic(
        code(fortiswitch::unexpected_response),
        help("The firmware may expose a different payload layout; try --raw.")
    )]
    Response(fortiswitch_api::Error),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Could not encode output as JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Could not encode output as YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl From<fortiswitch_api::Error> for CliError {
    fn from(err: fortiswitch_api::Error) -> Self {
        use fortiswitch_api::Error as E;

        match err {
            E::Configuration { message } => Self::Configuration { message },
            E::InvalidUrl(e) => Self::Configuration {
                message: e.to_string(),
            },
            e @ E::Authentication { .. } => Self::Auth(e),
            e @ E::Timeout { .. } => Self::Timeout(e),
            E::Transport(e) if e.is_timeout() => Self::Timeout(E::Transport(e)),
            e @ E::Transport(_) => Self::Connection(e),
            e @ E::Request { .. } => Self::Request(e),
            e @ (E::ResponseShape { .. } | E::Deserialization { .. }) => Self::Response(e),
        }
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::UnsupportedOperation { .. } | Self::Configuration { .. } | Self::Config(_) => {
                exit_code::USAGE
            }
            Self::MissingSettings { .. } | Self::Auth(_) => exit_code::AUTH,
            Self::Request(_) => exit_code::REQUEST,
            Self::Response(_) => exit_code::RESPONSE,
            Self::Connection(_) => exit_code::CONNECTION,
            Self::Timeout(_) => exit_code::TIMEOUT,
            _ => exit_code::GENERAL,
        }
    }

    /// Error class reported in the `error_type` field of the error log.
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::MissingSettings { .. }
            | Self::UnsupportedOperation { .. }
            | Self::Configuration { .. }
            | Self::Config(_)
            | Self::Logging { .. } => ErrorKind::Configuration.as_str(),
            Self::Auth(e)
            | Self::Connection(e)
            | Self::Timeout(e)
            | Self::Request(e)
            | Self::Response(e) => e.kind().as_str(),
            Self::Io(_) => "IoError",
            Self::Json(_) | Self::Yaml(_) => "SerializationError",
        }
    }

    /// Emit this error as one structured `error` event.
    pub fn log(&self) {
        match self {
            Self::MissingSettings { fields } => tracing::error!(
                error_type = self.error_type(),
                missing = ?fields,
                "{}", self
            ),
            Self::UnsupportedOperation { supported, .. } => tracing::error!(
                error_type = self.error_type(),
                supported = %supported,
                "{}", self
            ),
            Self::Auth(e) | Self::Request(e) => tracing::error!(
                error_type = self.error_type(),
                status_code = e.status(),
                "{}", self
            ),
            _ => tracing::error!(error_type = self.error_type(), "{}", self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn library_errors_map_to_exit_codes() {
        let auth: CliError = fortiswitch_api::Error::Authentication {
            message: "rejected".into(),
            status: Some(401),
        }
        .into();
        assert_eq!(auth.exit_code(), exit_code::AUTH);
        assert_eq!(auth.error_type(), "AuthenticationError");

        let request: CliError = fortiswitch_api::Error::Request {
            status: 500,
            reason: "Internal Server Error".into(),
            url: "https://sw/api/v2/monitor/system/status".into(),
        }
        .into();
        assert_eq!(request.exit_code(), exit_code::REQUEST);

        let timeout: CliError = fortiswitch_api::Error::Timeout {
            timeout: std::time::Duration::from_millis(500),
        }
        .into();
        assert_eq!(timeout.to_string(), "Request timed out after 500ms");
        assert_eq!(timeout.exit_code(), exit_code::TIMEOUT);
        assert_eq!(timeout.error_type(), "TransportError");

        let shape: CliError = fortiswitch_api::Error::ResponseShape {
            endpoint: "system/status".into(),
            key: "results".into(),
        }
        .into();
        assert_eq!(shape.exit_code(), exit_code::RESPONSE);
        assert_eq!(shape.error_type(), "ResponseShapeError");
    }

    #[test]
    fn bad_config_value_is_a_usage_error() {
        use figment::{Figment, providers::Serialized};

        let err: CliError = Figment::from(Serialized::default("shape", "bogus"))
            .extract_inner::<crate::output::Shape>("shape")
            .unwrap_err()
            .into();
        assert!(matches!(err, CliError::Config(_)));
        assert_eq!(err.exit_code(), exit_code::USAGE);
        assert_eq!(err.error_type(), "ConfigurationError");
    }

    #[test]
    fn bad_flag_is_a_usage_error() {
        let err: CliError = fortiswitch_api::Error::Configuration {
            message: "verify_tls must be a boolean, got 'maybe'".into(),
        }
        .into();
        assert_eq!(err.exit_code(), exit_code::USAGE);
        assert_eq!(err.error_type(), "ConfigurationError");
    }

    #[test]
    fn missing_settings_names_every_field() {
        let err = CliError::MissingSettings {
            fields: vec!["host", "password"],
        };
        assert_eq!(err.exit_code(), exit_code::AUTH);
        assert_eq!(err.to_string(), "Missing required settings: host, password");
    }
}
