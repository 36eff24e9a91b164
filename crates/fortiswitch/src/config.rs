//! CLI-owned configuration: TOML file, environment and flags merged into
//! `Settings`, then translated to a `fortiswitch_api::FortiSwitch`.
//!
//! The library never sees these types.

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use fortiswitch_api::{Credentials, DeviceEndpoint, FortiSwitch, TransportConfig, parse_verify_flag};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::logging::{LogConfig, LogFormat, LogLevel, LogSink};
use crate::output::{OutputFormat, Shape};

/// `FORTISWITCH_*` variables read through figment. Host, credentials, port
/// and timeout are read by clap.
const ENV_KEYS: &[&str] = &[
    "verify_tls",
    "log_sink",
    "log_file",
    "log_format",
    "shape",
    "output",
];

// ── Settings ─────────────────────────────────────────────────────────

/// TLS flag as written by the user: a TOML boolean, or text such as
/// `"no"` from the environment or the command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VerifyFlag {
    Bool(bool),
    Number(i64),
    Text(String),
}

impl VerifyFlag {
    pub fn resolve(&self) -> Result<bool, CliError> {
        let verify = match self {
            Self::Bool(b) => *b,
            Self::Number(n) => parse_verify_flag(&n.to_string())?,
            Self::Text(s) => parse_verify_flag(s)?,
        };
        Ok(verify)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    pub port: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing)]
    pub password: Option<SecretString>,
    pub verify_tls: VerifyFlag,
    /// Seconds.
    pub timeout: u64,
    pub scheme: String,
    pub shape: Shape,
    pub output: OutputFormat,
    pub log_level: LogLevel,
    pub log_sink: LogSink,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
    pub log_format: LogFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: None,
            port: DeviceEndpoint::DEFAULT_PORT,
            username: None,
            password: None,
            verify_tls: VerifyFlag::Bool(true),
            timeout: 30,
            scheme: "https".into(),
            shape: Shape::default(),
            output: OutputFormat::default(),
            log_level: LogLevel::default(),
            log_sink: LogSink::default(),
            log_file: None,
            log_format: LogFormat::default(),
        }
    }
}

// ── Loading ──────────────────────────────────────────────────────────

/// Default config file location, e.g. `~/.config/fortiswitch/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "fortiswitch", "fortiswitch")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Merge defaults, the config file, environment and flags.
///
/// An explicit `--config` must exist; the default location is optional.
pub fn load(global: &GlobalOpts) -> Result<Settings, CliError> {
    let path = match &global.config {
        Some(path) if !path.is_file() => {
            return Err(CliError::Configuration {
                message: format!("config file '{}' not found", path.display()),
            });
        }
        Some(path) => Some(path.clone()),
        None => config_path(),
    };

    let mut figment = Figment::new().merge(Serialized::defaults(Settings::default()));
    if let Some(path) = path {
        figment = figment.merge(Toml::file(path));
    }
    let mut settings: Settings = figment
        .merge(Env::prefixed("FORTISWITCH_").only(ENV_KEYS))
        .extract()?;

    settings.apply_overrides(global);
    Ok(settings)
}

impl Settings {
    /// Apply command-line flags (and the variables clap reads) on top.
    pub fn apply_overrides(&mut self, global: &GlobalOpts) {
        if let Some(ref host) = global.host {
            self.host = Some(host.clone());
        }
        if let Some(port) = global.port {
            self.port = port;
        }
        if let Some(ref username) = global.username {
            self.username = Some(username.clone());
        }
        if let Some(ref password) = global.password {
            self.password = Some(SecretString::from(password.clone()));
        }
        if let Some(ref verify) = global.verify_tls {
            self.verify_tls = VerifyFlag::Text(verify.clone());
        }
        if global.insecure {
            self.verify_tls = VerifyFlag::Bool(false);
        }
        if let Some(timeout) = global.timeout {
            self.timeout = timeout;
        }
        if let Some(ref scheme) = global.scheme {
            self.scheme = scheme.clone();
        }
        if let Some(shape) = global.shape {
            self.shape = shape;
        }
        if let Some(output) = global.output {
            self.output = output;
        }
        if let Some(level) = global.log_level {
            self.log_level = level;
        }
        if let Some(level) = LogLevel::from_verbosity(global.verbose) {
            self.log_level = level;
        }
        if let Some(sink) = global.log_sink {
            self.log_sink = sink;
        }
        if let Some(ref file) = global.log_file {
            self.log_file = Some(file.clone());
        }
        if let Some(format) = global.log_format {
            self.log_format = format;
        }
    }

    pub fn log_config(&self) -> LogConfig {
        LogConfig {
            level: self.log_level,
            sink: self.log_sink,
            file: self.log_file.clone(),
            format: self.log_format,
        }
    }

    /// Names of required settings that are unset or empty.
    pub fn missing(&self) -> Vec<&'static str> {
        [
            ("host", self.host.as_deref()),
            ("username", self.username.as_deref()),
            ("password", self.password.as_ref().map(|p| p.expose_secret())),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_none_or(str::is_empty))
        .map(|(name, _)| name)
        .collect()
    }

    /// Build the switch client these settings describe.
    pub fn connection(&self) -> Result<FortiSwitch, CliError> {
        let (Some(host), Some(username), Some(password)) =
            (&self.host, &self.username, &self.password)
        else {
            return Err(CliError::MissingSettings {
                fields: self.missing(),
            });
        };
        let missing = self.missing();
        if !missing.is_empty() {
            return Err(CliError::MissingSettings { fields: missing });
        }

        let endpoint = DeviceEndpoint::new(host.clone(), self.port).with_scheme(&self.scheme)?;
        let credentials = Credentials::new(username.clone(), password.clone());
        let transport = TransportConfig {
            verify_tls: self.verify_tls.resolve()?,
            timeout: Duration::from_secs(self.timeout),
            ..TransportConfig::default()
        };

        Ok(FortiSwitch::with_transport(endpoint, credentials, transport))
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use figment::Jail;

    use super::*;
    use crate::cli::Cli;

    fn global(args: &[&str]) -> GlobalOpts {
        let argv = ["fortiswitch"].iter().chain(args).chain(&["operations"]);
        Cli::try_parse_from(argv)
            .map(|cli| cli.global)
            .unwrap_or_else(|e| panic!("{e}"))
    }

    fn load_in_jail(args: &[&str]) -> Result<Settings, figment::Error> {
        load(&global(args)).map_err(|e| figment::Error::from(e.to_string()))
    }

    #[test]
    fn defaults_apply_without_a_file() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            let settings = load_in_jail(&[])?;
            assert_eq!(settings.port, 443);
            assert_eq!(settings.timeout, 30);
            assert_eq!(settings.verify_tls, VerifyFlag::Bool(true));
            assert_eq!(settings.shape, Shape::Cli);
            assert_eq!(settings.missing(), vec!["host", "username", "password"]);
            Ok(())
        });
    }

    #[test]
    fn file_then_env_then_flags() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.create_file(
                "fortiswitch.toml",
                r#"
                    host = "10.0.0.2"
                    port = 8443
                    username = "monitor"
                    password = "from-file"
                    verify_tls = false
                    shape = "telegraf"
                "#,
            )?;
            jail.set_env("FORTISWITCH_SHAPE", "none");
            jail.set_env("FORTISWITCH_PASS", "from-env");

            let settings = load_in_jail(&["--config", "fortiswitch.toml", "--port", "9443"])?;
            assert_eq!(settings.host.as_deref(), Some("10.0.0.2"));
            assert_eq!(settings.port, 9443);
            assert_eq!(
                settings.password.as_ref().map(|p| p.expose_secret()),
                Some("from-env")
            );
            assert!(!format!("{settings:?}").contains("from-env"));
            assert_eq!(settings.shape, Shape::None);
            assert_eq!(settings.verify_tls, VerifyFlag::Bool(false));
            assert!(settings.missing().is_empty());
            Ok(())
        });
    }

    #[test]
    fn verify_flag_accepts_text_from_env() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.set_env("FORTISWITCH_VERIFY_TLS", "no");
            let settings = load_in_jail(&[])?;
            assert!(matches!(settings.verify_tls.resolve(), Ok(false)));
            Ok(())
        });
    }

    #[test]
    fn insecure_wins_over_verify_flag() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            let settings = load_in_jail(&["--verify-tls", "true", "-k"])?;
            assert_eq!(settings.verify_tls, VerifyFlag::Bool(false));
            Ok(())
        });
    }

    #[test]
    fn explicit_config_must_exist() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            let err = load(&global(&["--config", "absent.toml"]));
            assert!(matches!(err, Err(CliError::Configuration { .. })));
            Ok(())
        });
    }

    #[test]
    fn verbosity_raises_log_level() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            let settings = load_in_jail(&["-vv"])?;
            assert_eq!(settings.log_config().level, LogLevel::Debug);
            Ok(())
        });
    }

    #[test]
    fn connection_reports_every_missing_field() {
        let settings = Settings {
            username: Some("monitor".into()),
            password: Some(SecretString::from("")),
            ..Settings::default()
        };
        match settings.connection() {
            Err(CliError::MissingSettings { fields }) => {
                assert_eq!(fields, vec!["host", "password"]);
            }
            other => panic!("expected MissingSettings, got {:?}", other.err()),
        }
    }

    #[test]
    fn connection_rejects_non_boolean_verify_flag() {
        let settings = Settings {
            host: Some("10.0.0.2".into()),
            username: Some("monitor".into()),
            password: Some("secret".into()),
            verify_tls: VerifyFlag::Text("maybe".into()),
            ..Settings::default()
        };
        assert!(matches!(
            settings.connection(),
            Err(CliError::Configuration { .. })
        ));
    }

    #[test]
    fn connection_builds_client() {
        let settings = Settings {
            host: Some("10.0.0.2".into()),
            port: 8443,
            username: Some("monitor".into()),
            password: Some("secret".into()),
            verify_tls: VerifyFlag::Text("off".into()),
            timeout: 5,
            ..Settings::default()
        };
        let switch = settings.connection().unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(switch.endpoint().port(), 8443);
        assert!(!switch.verify_tls());
        assert_eq!(switch.transport().timeout, Duration::from_secs(5));
    }
}
