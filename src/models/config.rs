//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::utils::time::parse_timezone;

/// File name looked up by [`Config::locate`].
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Upstream endpoint and HTTP settings
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Pagination and pacing
    #[serde(default)]
    pub search: SearchConfig,

    /// Presentation settings
    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load the given file, or the located `config.toml`, or defaults.
    ///
    /// A file that exists but cannot be read or parsed is an error; only the
    /// absence of any config file falls back to defaults.
    pub fn load_or_locate(path: Option<&Path>) -> Result<Self> {
        match path.map(Path::to_path_buf).or_else(Self::locate) {
            Some(path) => Self::load(&path).map_err(|e| {
                AppError::config(format!("Failed to load {}: {e}", path.display()))
            }),
            None => Ok(Self::default()),
        }
    }

    /// Find `config.toml` in the working directory, then next to the executable.
    pub fn locate() -> Option<PathBuf> {
        let mut candidates = vec![PathBuf::from(CONFIG_FILE_NAME)];
        if let Some(dir) = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
        {
            candidates.push(dir.join(CONFIG_FILE_NAME));
        }
        candidates.into_iter().find(|path| path.is_file())
    }

    /// Apply overrides from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(debug) = lookup("DEBUG") {
            if debug == "true" || debug == "1" {
                self.logging.debug = true;
            }
        }
    }

    /// Effective log filter.
    pub fn log_level(&self) -> &str {
        if self.logging.debug {
            "debug"
        } else {
            &self.logging.level
        }
    }

    /// Parsed display timezone.
    pub fn timezone(&self) -> Result<Tz> {
        parse_timezone(&self.display.timezone)
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.upstream.list_url.trim().is_empty() {
            return Err(AppError::validation("upstream.list_url is empty"));
        }
        url::Url::parse(&self.upstream.list_url)?;
        if !self.upstream.detail_url_template.contains("{id}") {
            return Err(AppError::validation(
                "upstream.detail_url_template must contain {id}",
            ));
        }
        if self.upstream.user_agent.trim().is_empty() {
            return Err(AppError::validation("upstream.user_agent is empty"));
        }
        if self.upstream.timeout_secs == 0 {
            return Err(AppError::validation("upstream.timeout_secs must be > 0"));
        }
        if self.search.keyword_page_size == 0 {
            return Err(AppError::validation("search.keyword_page_size must be > 0"));
        }
        if self.search.catalog_page_size == 0 {
            return Err(AppError::validation("search.catalog_page_size must be > 0"));
        }
        self.timezone()?;
        Ok(())
    }
}

/// Upstream listing endpoint and HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Paginated listing endpoint
    #[serde(default = "defaults::list_url")]
    pub list_url: String,

    /// Detail page template, `{id}` is replaced by the event id
    #[serde(default = "defaults::detail_url_template")]
    pub detail_url_template: String,

    /// Prefix for relative image paths
    #[serde(default = "defaults::cdn_prefix")]
    pub cdn_prefix: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            list_url: defaults::list_url(),
            detail_url_template: defaults::detail_url_template(),
            cdn_prefix: defaults::cdn_prefix(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Pagination and pacing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Page size for keyword searches
    #[serde(default = "defaults::keyword_page_size")]
    pub keyword_page_size: u32,

    /// Page size for the full catalog listing
    #[serde(default = "defaults::catalog_page_size")]
    pub catalog_page_size: u32,

    /// Delay between page requests in milliseconds
    #[serde(default = "defaults::request_delay")]
    pub request_delay_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            keyword_page_size: defaults::keyword_page_size(),
            catalog_page_size: defaults::catalog_page_size(),
            request_delay_ms: defaults::request_delay(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// IANA timezone used for dates and "today"
    #[serde(default = "defaults::timezone")]
    pub timezone: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            timezone: defaults::timezone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "defaults::log_level")]
    pub level: String,

    /// Forces debug logging regardless of `level`
    #[serde(default)]
    pub debug: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
            debug: false,
        }
    }
}

mod defaults {
    pub fn list_url() -> String {
        "https://www.allcpp.cn/allcpp/event/eventMainListV2.do".into()
    }
    pub fn detail_url_template() -> String {
        "https://www.allcpp.cn/allcpp/event/event.do?event={id}".into()
    }
    pub fn cdn_prefix() -> String {
        "https://imagecdn3.allcpp.cn/upload".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/143.0.0.0 Safari/537.36 Edg/143.0.0.0".into()
    }
    pub fn timeout() -> u64 {
        30
    }

    pub fn keyword_page_size() -> u32 {
        10
    }
    pub fn catalog_page_size() -> u32 {
        100
    }
    pub fn request_delay() -> u64 {
        300
    }

    pub fn timezone() -> String {
        "Asia/Shanghai".into()
    }

    pub fn log_level() -> String {
        "info".into()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.upstream.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_page_size() {
        let mut config = Config::default();
        config.search.catalog_page_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_template_without_placeholder() {
        let mut config = Config::default();
        config.upstream.detail_url_template = "https://example.com/event".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_unknown_timezone() {
        let mut config = Config::default();
        config.display.timezone = "Nowhere/Land".to_string();
        assert!(matches!(config.validate(), Err(AppError::Config(_))));
    }

    #[test]
    fn load_partial_file_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[search]\nrequest_delay_ms = 0\n\n[display]\ntimezone = \"UTC\"").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.search.request_delay_ms, 0);
        assert_eq!(config.search.keyword_page_size, 10);
        assert_eq!(config.search.catalog_page_size, 100);
        assert_eq!(config.upstream.timeout_secs, 30);
        assert_eq!(config.timezone().unwrap(), chrono_tz::UTC);
    }

    #[test]
    fn load_or_locate_rejects_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(matches!(
            Config::load_or_locate(Some(&missing)),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn load_or_locate_reads_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[logging]\nlevel = \"warn\"").unwrap();
        let config = Config::load_or_locate(Some(file.path())).unwrap();
        assert_eq!(config.log_level(), "warn");
    }

    #[test]
    fn malformed_file_fails_instead_of_falling_back() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[search\nkeyword_page_size = ").unwrap();

        let err = Config::load_or_locate(Some(file.path()))
            .and_then(|config| config.validate())
            .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
        assert!(err.to_string().contains("Failed to load"));
    }

    #[test]
    fn load_rejects_malformed_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[search\nkeyword_page_size = ").unwrap();
        assert!(matches!(Config::load(file.path()), Err(AppError::Toml(_))));
    }

    #[test]
    fn debug_override_forces_debug_level() {
        let mut config = Config::default();
        config.apply_overrides(|key| (key == "DEBUG").then(|| "1".to_string()));
        assert_eq!(config.log_level(), "debug");

        let mut config = Config::default();
        config.apply_overrides(|key| (key == "DEBUG").then(|| "no".to_string()));
        assert_eq!(config.log_level(), "info");
    }
}
