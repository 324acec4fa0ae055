//! Application configuration
//!
//! Configuration is loaded from:
//! 1. Default values
//! 2. Config file (~/.config/lugat/config.toml)
//! 3. Environment variables (LUGAT_* prefix)
//!
//! Environment variables take precedence over config file values.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::lookup::build_lookup_url;

/// Environment variable prefix
const ENV_PREFIX: &str = "LUGAT";

/// Default history file name
pub const DEFAULT_DATA_FILE: &str = "lugatim_data.json";

/// Default dictionary site
pub const DEFAULT_SITE_URL: &str = "https://lugatim.com";

/// Default path under which the site serves lookups
pub const DEFAULT_LOOKUP_PATH: &str = "/s/";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the history file
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// History file name, relative to `data_dir`
    #[serde(default = "default_data_file")]
    pub data_file: String,

    /// Dictionary site root
    #[serde(default = "default_site_url")]
    pub site_url: String,

    /// Path prefix of lookup pages on the site
    #[serde(default = "default_lookup_path")]
    pub lookup_path: String,

    /// Log file for TUI mode (defaults to {data_dir}/debug.log)
    #[serde(default)]
    pub log_file: Option<PathBuf>,

    /// Create a desktop launcher when the TUI starts
    #[serde(default)]
    pub desktop_shortcut: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            data_file: default_data_file(),
            site_url: default_site_url(),
            lookup_path: default_lookup_path(),
            log_file: None,
            desktop_shortcut: false,
        }
    }
}

impl Config {
    /// Load configuration from default location and environment
    ///
    /// Order of precedence (highest to lowest):
    /// 1. Environment variables (LUGAT_DATA_DIR, LUGAT_DATA_FILE, LUGAT_SITE_URL)
    /// 2. Config file (~/.config/lugat/config.toml or LUGAT_CONFIG)
    /// 3. Default values
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::config_file_path())
    }

    /// Load configuration, preferring a path given on the command line
    pub fn load_with_cli_override(config_path: Option<&PathBuf>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_path(path),
            None => Self::load(),
        }
    }

    /// Load configuration from a specific path
    ///
    /// Environment variables are still applied as overrides.
    /// If the file doesn't exist, defaults are used.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        config.ensure_data_dir()?;
        Ok(config)
    }

    /// Load configuration from a TOML string (useful for testing)
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        let mut config: Config =
            toml::from_str(toml_content).context("Failed to parse config TOML")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        // LUGAT_DATA_DIR
        if let Ok(val) = std::env::var(format!("{}_DATA_DIR", ENV_PREFIX)) {
            self.data_dir = PathBuf::from(val);
        }

        // LUGAT_DATA_FILE
        if let Ok(val) = std::env::var(format!("{}_DATA_FILE", ENV_PREFIX)) {
            if !val.is_empty() {
                self.data_file = val;
            }
        }

        // LUGAT_SITE_URL
        if let Ok(val) = std::env::var(format!("{}_SITE_URL", ENV_PREFIX)) {
            if !val.is_empty() {
                self.site_url = val;
            }
        }
    }

    /// Ensure data directory exists
    fn ensure_data_dir(&self) -> Result<()> {
        if !self.data_dir.exists() {
            std::fs::create_dir_all(&self.data_dir)
                .with_context(|| format!("Failed to create data directory: {:?}", self.data_dir))?;
        }
        Ok(())
    }

    /// Save configuration to the default config file
    pub fn save(&self) -> Result<()> {
        self.save_to_path(&Self::config_file_path())
    }

    /// Save configuration to a specific file
    pub fn save_to_path(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(config_path, content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;
        Ok(())
    }

    /// Get the config file path
    ///
    /// Can be overridden with LUGAT_CONFIG environment variable
    pub fn config_file_path() -> PathBuf {
        if let Ok(path) = std::env::var(format!("{}_CONFIG", ENV_PREFIX)) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("lugat")
            .join("config.toml")
    }

    /// Get the path to the history file
    pub fn data_path(&self) -> PathBuf {
        self.data_dir.join(&self.data_file)
    }

    /// Get the default log file path
    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| self.data_dir.join("debug.log"))
    }

    /// Substring a navigation URL must contain to count as a lookup
    ///
    /// `https://lugatim.com` with `/s/` gives `lugatim.com/s/`.
    pub fn lookup_marker(&self) -> String {
        let host = self
            .site_url
            .split_once("://")
            .map(|(_, rest)| rest)
            .unwrap_or(&self.site_url)
            .trim_end_matches('/');
        format!("{}/{}/", host, self.lookup_path.trim_matches('/'))
    }

    /// Lookup URL for a typed word, `None` for blank input
    pub fn lookup_url(&self, word: &str) -> Option<String> {
        build_lookup_url(&self.site_url, &self.lookup_path, word)
    }

    /// Site home page
    pub fn home_url(&self) -> &str {
        &self.site_url
    }
}

/// Get the default data directory
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("lugat")
}

fn default_data_file() -> String {
    DEFAULT_DATA_FILE.to_string()
}

fn default_site_url() -> String {
    DEFAULT_SITE_URL.to_string()
}

fn default_lookup_path() -> String {
    DEFAULT_LOOKUP_PATH.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to serialize tests that touch environment variables
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Guard that locks env access and saves/restores env vars
    struct EnvGuard<'a> {
        _lock: std::sync::MutexGuard<'a, ()>,
        saved: Vec<(String, Option<String>)>,
    }

    impl<'a> EnvGuard<'a> {
        fn new(vars: &[&str]) -> Self {
            let lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
            let saved = vars
                .iter()
                .map(|&name| (name.to_string(), env::var(name).ok()))
                .collect();
            for name in vars {
                env::remove_var(name);
            }
            Self { _lock: lock, saved }
        }
    }

    impl Drop for EnvGuard<'_> {
        fn drop(&mut self) {
            for (name, value) in &self.saved {
                match value {
                    Some(v) => env::set_var(name, v),
                    None => env::remove_var(name),
                }
            }
        }
    }

    const ENV_VARS: &[&str] = &["LUGAT_DATA_DIR", "LUGAT_DATA_FILE", "LUGAT_SITE_URL"];

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.data_dir.ends_with("lugat"));
        assert_eq!(config.data_file, "lugatim_data.json");
        assert_eq!(config.site_url, "https://lugatim.com");
        assert_eq!(config.lookup_path, "/s/");
        assert!(!config.desktop_shortcut);
    }

    #[test]
    fn test_file_paths() {
        let config = Config::default();
        assert!(config.data_path().ends_with("lugat/lugatim_data.json"));
        assert!(config.log_path().ends_with("debug.log"));

        let config = Config {
            log_file: Some(PathBuf::from("/tmp/lugat.log")),
            ..Config::default()
        };
        assert_eq!(config.log_path(), PathBuf::from("/tmp/lugat.log"));
    }

    #[test]
    fn test_lookup_marker() {
        let config = Config::default();
        assert_eq!(config.lookup_marker(), "lugatim.com/s/");

        let config = Config {
            site_url: "http://localhost:8080/".to_string(),
            lookup_path: "word".to_string(),
            ..Config::default()
        };
        assert_eq!(config.lookup_marker(), "localhost:8080/word/");
    }

    #[test]
    fn test_lookup_url() {
        let config = Config::default();
        assert_eq!(
            config.lookup_url("kalem").unwrap(),
            "https://lugatim.com/s/KALEM"
        );
        assert!(config.lookup_url("").is_none());
        assert!(config.lookup_url("kalem").unwrap().contains(&config.lookup_marker()));
    }

    #[test]
    fn test_env_override_data_dir() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();

        env::set_var("LUGAT_DATA_DIR", "/tmp/lugat-test");
        config.apply_env_overrides();

        assert_eq!(config.data_dir, PathBuf::from("/tmp/lugat-test"));
    }

    #[test]
    fn test_env_override_site_and_file() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();

        env::set_var("LUGAT_SITE_URL", "https://example.org");
        env::set_var("LUGAT_DATA_FILE", "words.json");
        config.apply_env_overrides();
        assert_eq!(config.site_url, "https://example.org");
        assert_eq!(config.data_file, "words.json");

        // Empty values keep the current setting
        env::set_var("LUGAT_SITE_URL", "");
        config.apply_env_overrides();
        assert_eq!(config.site_url, "https://example.org");
    }

    #[test]
    fn test_serialization() {
        let _guard = EnvGuard::new(ENV_VARS);

        let config = Config {
            data_dir: PathBuf::from("/data/lugat"),
            data_file: "history.json".to_string(),
            site_url: "https://lugatim.com".to_string(),
            lookup_path: "/s/".to_string(),
            log_file: None,
            desktop_shortcut: true,
        };

        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("data_dir"));
        assert!(toml_str.contains("site_url"));
        assert!(toml_str.contains("desktop_shortcut"));

        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.data_dir, config.data_dir);
        assert_eq!(parsed.data_file, config.data_file);
        assert!(parsed.desktop_shortcut);
    }

    #[test]
    fn test_load_from_str() {
        let _guard = EnvGuard::new(ENV_VARS);

        let toml = r#"
            data_dir = "/custom/data"
            site_url = "https://example.org"
        "#;

        let config = Config::load_from_str(toml).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/custom/data"));
        assert_eq!(config.site_url, "https://example.org");
        // Unset keys fall back to defaults
        assert_eq!(config.data_file, "lugatim_data.json");
        assert_eq!(config.lookup_path, "/s/");
    }

    #[test]
    fn test_load_from_path_missing_file() {
        let _guard = EnvGuard::new(ENV_VARS);
        let temp_dir = tempfile::TempDir::new().unwrap();
        env::set_var("LUGAT_DATA_DIR", temp_dir.path());

        let path = PathBuf::from("/nonexistent/config.toml");
        let config = Config::load_from_path(&path).unwrap();
        assert_eq!(config.data_dir, temp_dir.path());
        assert_eq!(config.site_url, "https://lugatim.com");
    }

    #[test]
    fn test_save_to_path_round_trip() {
        let _guard = EnvGuard::new(ENV_VARS);
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let config = Config {
            data_dir: temp_dir.path().join("data"),
            desktop_shortcut: true,
            ..Config::default()
        };
        config.save_to_path(&path).unwrap();

        let loaded = Config::load_from_path(&path).unwrap();
        assert_eq!(loaded.data_dir, config.data_dir);
        assert!(loaded.desktop_shortcut);
        assert!(loaded.data_dir.exists());
    }
}
