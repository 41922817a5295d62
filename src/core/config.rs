use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub capture: CaptureConfig,
    #[serde(default)]
    pub classifier: ClassifierConfig,
    #[serde(default)]
    pub recommend: RecommendConfig,
    #[serde(default)]
    pub browser: BrowserConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_num_threads")]
    pub num_threads: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Flat file holding one `username,password,language,singer` record per line
    #[serde(default = "default_user_data_file")]
    pub user_data_file: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Seconds a login stays valid, counted from the login itself
    #[serde(default = "default_session_ttl")]
    pub ttl_secs: i64,
    /// How often expired sessions are swept from memory
    #[serde(default = "default_session_cleanup_interval")]
    pub cleanup_interval_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CaptureConfig {
    /// Program that writes exactly one encoded frame to stdout
    #[serde(default = "default_capture_program")]
    pub program: String,
    #[serde(default = "default_capture_args")]
    pub args: Vec<String>,
    #[serde(default = "default_capture_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierConfig {
    /// Base URL of a DeepFace-compatible analysis API
    #[serde(default = "default_classifier_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_detector_backend")]
    pub detector_backend: String,
    #[serde(default)]
    pub enforce_detection: bool,
    #[serde(default = "default_classifier_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendConfig {
    #[serde(default = "default_search_base_url")]
    pub search_base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BrowserConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_browser_program")]
    pub program: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default = "default_console")]
    pub console: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            bind_address: default_bind_address(),
            num_threads: default_num_threads(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            user_data_file: default_user_data_file(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_session_ttl(),
            cleanup_interval_secs: default_session_cleanup_interval(),
        }
    }
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            program: default_capture_program(),
            args: default_capture_args(),
            timeout_secs: default_capture_timeout(),
        }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            endpoint: default_classifier_endpoint(),
            detector_backend: default_detector_backend(),
            enforce_detection: false,
            timeout_secs: default_classifier_timeout(),
        }
    }
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            search_base_url: default_search_base_url(),
        }
    }
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            program: default_browser_program(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            console: default_console(),
        }
    }
}

// Default value functions
fn default_port() -> u16 {
    8501
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_num_threads() -> usize {
    num_cpus::get()
}

fn default_user_data_file() -> PathBuf {
    PathBuf::from("user_data.txt")
}

fn default_session_ttl() -> i64 {
    86400
}

fn default_session_cleanup_interval() -> u64 {
    300
}

fn default_capture_program() -> String {
    "ffmpeg".to_string()
}

fn default_capture_args() -> Vec<String> {
    [
        "-loglevel", "error",
        "-f", "v4l2",
        "-i", "/dev/video0",
        "-frames:v", "1",
        "-f", "image2pipe",
        "-vcodec", "mjpeg",
        "-",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_capture_timeout() -> u64 {
    10
}

fn default_classifier_endpoint() -> String {
    "http://127.0.0.1:5005".to_string()
}

fn default_detector_backend() -> String {
    "opencv".to_string()
}

fn default_classifier_timeout() -> u64 {
    30
}

fn default_search_base_url() -> String {
    "https://www.youtube.com/results".to_string()
}

fn default_browser_program() -> String {
    "xdg-open".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

fn default_console() -> bool {
    false
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&content)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .context("Failed to parse config file")?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        // Validate server config
        if self.server.port == 0 {
            bail!("Server port must be greater than 0");
        }

        if self.server.bind_address.is_empty() {
            bail!("bind_address must not be empty");
        }

        if self.server.num_threads == 0 {
            bail!("num_threads must be greater than 0");
        }

        // Validate storage config
        if self.storage.user_data_file.as_os_str().is_empty() {
            bail!("user_data_file must not be empty");
        }

        // Validate session config
        if self.session.ttl_secs <= 0 {
            bail!("session ttl_secs must be greater than 0");
        }

        if self.session.cleanup_interval_secs == 0 {
            bail!("session cleanup_interval_secs must be greater than 0");
        }

        // Validate capture config
        if self.capture.program.is_empty() {
            bail!("capture program must not be empty");
        }

        if self.capture.timeout_secs == 0 {
            bail!("capture timeout_secs must be greater than 0");
        }

        // Validate classifier config
        if self.classifier.endpoint.is_empty() {
            bail!("classifier endpoint must not be empty");
        }

        if self.classifier.timeout_secs == 0 {
            bail!("classifier timeout_secs must be greater than 0");
        }

        // Validate recommend config
        let base = &self.recommend.search_base_url;
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            bail!(
                "Invalid search_base_url '{}'. Must start with http:// or https://",
                base
            );
        }

        if self.browser.enabled && self.browser.program.is_empty() {
            bail!("browser program must not be empty when the browser is enabled");
        }

        // Validate logging config
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            bail!(
                "Invalid log level '{}'. Must be one of: trace, debug, info, warn, error",
                self.logging.level
            );
        }

        let valid_formats = ["json", "console"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            bail!(
                "Invalid log format '{}'. Must be one of: json, console",
                self.logging.format
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_toml("").expect("Failed to parse empty config");

        assert_eq!(config.server.port, 8501);
        assert_eq!(config.storage.user_data_file, PathBuf::from("user_data.txt"));
        assert_eq!(config.session.ttl_secs, 86400);
        assert_eq!(config.capture.program, "ffmpeg");
        assert!(config.capture.args.contains(&"/dev/video0".to_string()));
        assert!(!config.classifier.enforce_detection);
        assert_eq!(config.recommend.search_base_url, "https://www.youtube.com/results");
        assert!(!config.browser.enabled);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_config_overrides() {
        let config = Config::from_toml(
            r#"
            [server]
            port = 9000

            [storage]
            user_data_file = "/var/lib/moodtune/users.txt"

            [browser]
            enabled = true
            program = "open"

            [logging]
            format = "console"
            "#,
        )
        .expect("Failed to parse config");

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.bind_address, "0.0.0.0");
        assert_eq!(
            config.storage.user_data_file,
            PathBuf::from("/var/lib/moodtune/users.txt")
        );
        assert!(config.browser.enabled);
        assert_eq!(config.browser.program, "open");
        assert_eq!(config.logging.format, "console");
    }

    #[test]
    fn test_rejects_zero_port() {
        let result = Config::from_toml("[server]\nport = 0\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_invalid_log_level() {
        let result = Config::from_toml("[logging]\nlevel = \"loud\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_non_http_search_url() {
        let result = Config::from_toml("[recommend]\nsearch_base_url = \"ftp://example.com\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_zero_timeouts() {
        assert!(Config::from_toml("[capture]\ntimeout_secs = 0\n").is_err());
        assert!(Config::from_toml("[classifier]\ntimeout_secs = 0\n").is_err());
    }

    #[test]
    fn test_session_ttl() {
        let config = Config::from_toml("[session]\nttl_secs = 600\n").unwrap();
        assert_eq!(config.session.ttl_secs, 600);

        assert!(Config::from_toml("[session]\nttl_secs = 0\n").is_err());
        assert!(Config::from_toml("[session]\nttl_secs = -5\n").is_err());
        assert!(Config::from_toml("[session]\ncleanup_interval_secs = 0\n").is_err());
    }

    #[test]
    fn test_from_file_missing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.toml");
        assert!(Config::from_file(&path).is_err());
    }

    #[test]
    fn test_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[classifier]\nendpoint = \"http://10.0.0.2:5005\"\n").unwrap();

        let config = Config::from_file(&path).expect("Failed to load config");
        assert_eq!(config.classifier.endpoint, "http://10.0.0.2:5005");
    }
}
