//! Configuration management for the Ballpark admin console

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use validator::Validate;

/// Name of the optional configuration file looked up in the working directory
pub const DEFAULT_CONFIG_NAME: &str = "ballpark";

/// Prefix of environment variables that override configuration values
pub const ENV_PREFIX: &str = "BALLPARK";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Config {
    /// Backend API configuration
    #[validate(nested)]
    pub api: ApiConfig,

    /// Display and listing configuration
    #[validate(nested)]
    pub display: DisplayConfig,

    /// Console behaviour
    pub console: ConsoleConfig,

    /// Board id to display name table
    pub boards: BTreeMap<String, String>,

    /// Logging configuration
    #[validate(nested)]
    pub logging: LoggingConfig,
}

/// Backend API configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ApiConfig {
    /// Origin of the backend, e.g. `http://localhost:8090`
    #[validate(url)]
    pub base_url: String,

    /// Request timeout in seconds
    #[validate(range(min = 1, max = 600))]
    pub timeout_seconds: u64,

    /// Maximum requests in flight during a fan-out (0 = unbounded)
    pub max_concurrency: usize,

    /// Session cookie sent with every request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_cookie: Option<String>,
}

/// Display and listing configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct DisplayConfig {
    /// Rows per page when a screen opens
    #[validate(range(min = 1, max = 1000))]
    pub page_size: usize,

    /// Page sizes offered by the page-size selector
    #[validate(length(min = 1))]
    pub page_size_options: Vec<usize>,

    /// Number of page links shown together
    #[validate(range(min = 1, max = 50))]
    pub page_group_size: usize,

    /// Characters kept when truncating comment content in tables
    #[validate(range(min = 1))]
    pub truncate_length: usize,

    /// Placeholder for a missing author
    pub no_author: String,

    /// Placeholder for missing content
    pub no_content: String,

    /// Placeholder for a missing title
    pub no_title: String,

    /// Placeholder for optional profile fields
    pub none: String,

    /// Image shown when an inline attachment fails to load
    pub fallback_image: String,
}

/// How screens reconcile local state after a successful mutation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ResyncPolicy {
    /// Apply the known delta, then fetch the list again
    #[default]
    Refetch,
    /// Apply the known delta only
    Patch,
}

/// Console behaviour
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Resync policy shared by every mutation
    pub resync: ResyncPolicy,

    /// Answer every confirmation with yes
    pub assume_yes: bool,
}

/// Log output format
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable multi-line output
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level or `EnvFilter` directive
    #[validate(length(min = 1))]
    pub level: String,

    /// Log format
    pub format: LogFormat,

    /// Log to file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

fn default_boards() -> BTreeMap<String, String> {
    [
        ("1", "KIA Tigers"),
        ("2", "Samsung Lions"),
        ("3", "LG Twins"),
        ("4", "Doosan Bears"),
        ("5", "KT Wiz"),
        ("6", "SSG Landers"),
        ("7", "Lotte Giants"),
        ("8", "Hanwha Eagles"),
        ("9", "NC Dinos"),
        ("10", "Kiwoom Heroes"),
    ]
    .into_iter()
    .map(|(id, name)| (id.to_string(), name.to_string()))
    .collect()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8090".to_string(),
            timeout_seconds: 30,
            max_concurrency: 8,
            session_cookie: None,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            page_size_options: vec![10, 20, 30, 50],
            page_group_size: 5,
            truncate_length: 10,
            no_author: "No author".to_string(),
            no_content: "No content".to_string(),
            no_title: "No title".to_string(),
            none: "None".to_string(),
            fallback_image: "/path_to_default_image/default.png".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            file: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            display: DisplayConfig::default(),
            console: ConsoleConfig::default(),
            boards: default_boards(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from `ballpark.*` in the working directory and the environment
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded, parsed or validated.
    pub fn load() -> crate::Result<Self> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name(DEFAULT_CONFIG_NAME).required(false));
        Self::finish(builder)
    }

    /// Load configuration from an explicit file, still honouring the environment
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, cannot be parsed, or fails validation.
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        debug!(path = %path.display(), "loading configuration file");
        let builder = config::Config::builder().add_source(config::File::from(path));
        Self::finish(builder)
    }

    fn finish(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> crate::Result<Self> {
        let config: Self = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        if let Err(e) = config.check() {
            warn!(error = %e, "configuration rejected");
            return Err(e);
        }
        debug!(
            base_url = %config.api.base_url,
            page_size = config.display.page_size,
            resync = ?config.console.resync,
            "configuration loaded"
        );
        Ok(config)
    }

    /// Validate field ranges and cross-field constraints
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Configuration`] describing every violated constraint.
    pub fn check(&self) -> crate::Result<()> {
        self.validate()
            .map_err(|e| crate::Error::configuration(e.to_string()))?;

        if self.display.page_size_options.contains(&0) {
            return Err(crate::Error::validation(
                "display.page_size_options",
                "page sizes must be positive",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::uninlined_format_args)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_config_default() {
        let config = Config::default();

        assert_eq!(config.api.base_url, "http://localhost:8090");
        assert_eq!(config.api.timeout_seconds, 30);
        assert_eq!(config.api.max_concurrency, 8);
        assert!(config.api.session_cookie.is_none());

        assert_eq!(config.display.page_size, 10);
        assert_eq!(config.display.page_size_options, vec![10, 20, 30, 50]);
        assert_eq!(config.display.page_group_size, 5);
        assert_eq!(config.display.truncate_length, 10);

        assert_eq!(config.console.resync, ResyncPolicy::Refetch);
        assert!(!config.console.assume_yes);

        assert_eq!(config.boards.len(), 10);
        assert_eq!(config.boards.get("3").map(String::as_str), Some("LG Twins"));

        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert!(config.check().is_ok());
    }

    #[test]
    fn test_partial_config_deserialization() {
        let config: Config = toml::from_str(
            r#"
            [api]
            base_url = "https://admin.example.com"

            [console]
            resync = "patch"
            "#,
        )
        .unwrap();

        assert_eq!(config.api.base_url, "https://admin.example.com");
        assert_eq!(config.api.timeout_seconds, 30);
        assert_eq!(config.console.resync, ResyncPolicy::Patch);
        assert_eq!(config.display.page_size, 10);
        assert_eq!(config.boards.len(), 10);
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let mut config = Config::default();
        config.api.base_url = "not a url".to_string();

        let error = config.check().unwrap_err();
        assert!(format!("{}", error).contains("base_url"));
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let mut config = Config::default();
        config.display.page_size = 0;
        assert!(config.check().is_err());

        let mut config = Config::default();
        config.display.page_size_options = vec![10, 0];
        assert!(config.check().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
            [api]
            base_url = "http://127.0.0.1:9000"
            max_concurrency = 2

            [display]
            page_size = 20
            no_author = "(anonymous)"

            [boards]
            "99" = "Free Board"

            [logging]
            format = "json"
            "#
        )
        .unwrap();

        let config = Config::load_from(file.path()).unwrap();

        assert_eq!(config.api.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.api.max_concurrency, 2);
        assert_eq!(config.display.page_size, 20);
        assert_eq!(config.display.no_author, "(anonymous)");
        assert_eq!(config.boards.get("99").map(String::as_str), Some("Free Board"));
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_load_from_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load_from(&dir.path().join("absent.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_config_serialization_skips_absent_optionals() {
        let config = Config::default();
        let serialized = serde_json::to_string(&config).unwrap();

        assert!(!serialized.contains("session_cookie"));
        assert!(serialized.contains("\"resync\":\"refetch\""));

        let deserialized: Config = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized.api.base_url, config.api.base_url);
        assert_eq!(deserialized.boards, config.boards);
    }

    #[derive(Clone)]
    struct LogSink(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogSink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_rejected_file_is_logged() {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let sink = LogSink(Arc::clone(&buffer));
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || sink.clone())
            .finish();
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[display]\npage_size = 0").unwrap();

        let result =
            tracing::subscriber::with_default(subscriber, || Config::load_from(file.path()));

        assert!(result.is_err());
        let logs = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        assert!(logs.contains("loading configuration file"));
        assert!(logs.contains("configuration rejected"));
    }
}
