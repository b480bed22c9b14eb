//! Application configuration
//!
//! Configuration is loaded from:
//! 1. Default values
//! 2. Config file (~/.config/quotebook/config.toml)
//! 3. Environment variables (QUOTEBOOK_* prefix)
//!
//! Environment variables take precedence over config file values.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::sync::ConflictPolicy;

/// Environment variable prefix
const ENV_PREFIX: &str = "QUOTEBOOK";

/// Default seconds between remote sync cycles
pub const DEFAULT_SYNC_INTERVAL_SECS: u64 = 30;

/// Default request timeout for the remote endpoint
pub const DEFAULT_SYNC_TIMEOUT_SECS: u64 = 10;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the durable slots
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Remote quote endpoint (optional)
    #[serde(default)]
    pub sync_url: Option<String>,

    /// Whether remote sync is enabled
    #[serde(default)]
    pub sync_enabled: bool,

    /// Seconds between sync cycles in the shell
    #[serde(default = "default_sync_interval")]
    pub sync_interval_secs: u64,

    /// Request timeout for the remote endpoint
    #[serde(default = "default_sync_timeout")]
    pub sync_timeout_secs: u64,

    /// Which side wins when local and remote text differ
    #[serde(default)]
    pub conflict_policy: ConflictPolicy,

    /// Log file path (optional, defaults to stderr)
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            sync_url: None,
            sync_enabled: false,
            sync_interval_secs: DEFAULT_SYNC_INTERVAL_SECS,
            sync_timeout_secs: DEFAULT_SYNC_TIMEOUT_SECS,
            conflict_policy: ConflictPolicy::default(),
            log_file: None,
        }
    }
}

impl Config {
    /// Load configuration from default location and environment
    ///
    /// Order of precedence (highest to lowest):
    /// 1. Environment variables (QUOTEBOOK_DATA_DIR, QUOTEBOOK_SYNC_URL, ...)
    /// 2. Config file (~/.config/quotebook/config.toml or QUOTEBOOK_CONFIG)
    /// 3. Default values
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::config_file_path())
    }

    /// Load configuration, preferring a path given on the command line
    pub fn load_with_cli_override(path: Option<&PathBuf>) -> Result<Self> {
        match path {
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
        if let Ok(val) = std::env::var(format!("{}_DATA_DIR", ENV_PREFIX)) {
            self.data_dir = PathBuf::from(val);
        }

        if let Ok(val) = std::env::var(format!("{}_SYNC_URL", ENV_PREFIX)) {
            self.sync_url = if val.is_empty() { None } else { Some(val) };
        }

        if let Ok(val) = std::env::var(format!("{}_SYNC_ENABLED", ENV_PREFIX)) {
            self.sync_enabled = val.eq_ignore_ascii_case("true") || val == "1";
        }

        // Unparseable values keep the current setting
        if let Ok(val) = std::env::var(format!("{}_SYNC_INTERVAL", ENV_PREFIX)) {
            if let Ok(secs) = val.parse() {
                self.sync_interval_secs = secs;
            }
        }

        if let Ok(val) = std::env::var(format!("{}_SYNC_TIMEOUT", ENV_PREFIX)) {
            if let Ok(secs) = val.parse() {
                self.sync_timeout_secs = secs;
            }
        }

        if let Ok(val) = std::env::var(format!("{}_CONFLICT_POLICY", ENV_PREFIX)) {
            if let Ok(policy) = val.parse() {
                self.conflict_policy = policy;
            }
        }

        if let Ok(val) = std::env::var(format!("{}_LOG_FILE", ENV_PREFIX)) {
            self.log_file = if val.is_empty() {
                None
            } else {
                Some(PathBuf::from(val))
            };
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

    /// Save configuration to the default file
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
    /// Can be overridden with QUOTEBOOK_CONFIG environment variable
    pub fn config_file_path() -> PathBuf {
        if let Ok(path) = std::env::var(format!("{}_CONFIG", ENV_PREFIX)) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("quotebook")
            .join("config.toml")
    }

    /// Whether sync is switched on and has somewhere to go
    pub fn sync_target(&self) -> Option<&str> {
        if self.sync_enabled {
            self.sync_url.as_deref()
        } else {
            None
        }
    }

    /// Interval between sync cycles (never zero)
    pub fn sync_interval(&self) -> Duration {
        Duration::from_secs(self.sync_interval_secs.max(1))
    }

    /// Request timeout for the remote endpoint
    pub fn sync_timeout(&self) -> Duration {
        Duration::from_secs(self.sync_timeout_secs.max(1))
    }
}

/// Get the default data directory
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("quotebook")
}

fn default_sync_interval() -> u64 {
    DEFAULT_SYNC_INTERVAL_SECS
}

fn default_sync_timeout() -> u64 {
    DEFAULT_SYNC_TIMEOUT_SECS
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

    const ENV_VARS: &[&str] = &[
        "QUOTEBOOK_DATA_DIR",
        "QUOTEBOOK_SYNC_URL",
        "QUOTEBOOK_SYNC_ENABLED",
        "QUOTEBOOK_SYNC_INTERVAL",
        "QUOTEBOOK_SYNC_TIMEOUT",
        "QUOTEBOOK_CONFLICT_POLICY",
        "QUOTEBOOK_LOG_FILE",
    ];

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(!config.sync_enabled);
        assert!(config.sync_url.is_none());
        assert!(config.data_dir.ends_with("quotebook"));
        assert_eq!(config.sync_interval_secs, 30);
        assert_eq!(config.conflict_policy, ConflictPolicy::RemoteWins);
    }

    #[test]
    fn test_sync_target() {
        let mut config = Config::default();
        assert!(config.sync_target().is_none());

        config.sync_url = Some("https://example.com/quotes".to_string());
        assert!(config.sync_target().is_none());

        config.sync_enabled = true;
        assert_eq!(config.sync_target(), Some("https://example.com/quotes"));
    }

    #[test]
    fn test_sync_interval_never_zero() {
        let config = Config {
            sync_interval_secs: 0,
            ..Config::default()
        };
        assert_eq!(config.sync_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_env_override_data_dir() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();

        env::set_var("QUOTEBOOK_DATA_DIR", "/tmp/quotebook-test");
        config.apply_env_overrides();

        assert_eq!(config.data_dir, PathBuf::from("/tmp/quotebook-test"));
    }

    #[test]
    fn test_env_override_sync_enabled() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();
        assert!(!config.sync_enabled);

        env::set_var("QUOTEBOOK_SYNC_ENABLED", "true");
        config.apply_env_overrides();
        assert!(config.sync_enabled);

        env::set_var("QUOTEBOOK_SYNC_ENABLED", "1");
        config.sync_enabled = false;
        config.apply_env_overrides();
        assert!(config.sync_enabled);

        env::set_var("QUOTEBOOK_SYNC_ENABLED", "false");
        config.apply_env_overrides();
        assert!(!config.sync_enabled);
    }

    #[test]
    fn test_env_override_sync_url() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();

        env::set_var("QUOTEBOOK_SYNC_URL", "https://example.com/posts");
        config.apply_env_overrides();
        assert_eq!(
            config.sync_url,
            Some("https://example.com/posts".to_string())
        );

        // Empty string clears it
        env::set_var("QUOTEBOOK_SYNC_URL", "");
        config.apply_env_overrides();
        assert!(config.sync_url.is_none());
    }

    #[test]
    fn test_env_override_sync_interval() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();

        env::set_var("QUOTEBOOK_SYNC_INTERVAL", "5");
        config.apply_env_overrides();
        assert_eq!(config.sync_interval_secs, 5);

        env::set_var("QUOTEBOOK_SYNC_INTERVAL", "soon");
        config.apply_env_overrides();
        assert_eq!(config.sync_interval_secs, 5);
    }

    #[test]
    fn test_env_override_sync_timeout() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();

        env::set_var("QUOTEBOOK_SYNC_TIMEOUT", "3");
        config.apply_env_overrides();
        assert_eq!(config.sync_timeout_secs, 3);

        env::set_var("QUOTEBOOK_SYNC_TIMEOUT", "-1");
        config.apply_env_overrides();
        assert_eq!(config.sync_timeout_secs, 3);
    }

    #[test]
    fn test_env_override_conflict_policy() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();

        env::set_var("QUOTEBOOK_CONFLICT_POLICY", "local-wins");
        config.apply_env_overrides();
        assert_eq!(config.conflict_policy, ConflictPolicy::LocalWins);

        env::set_var("QUOTEBOOK_CONFLICT_POLICY", "coin-flip");
        config.apply_env_overrides();
        assert_eq!(config.conflict_policy, ConflictPolicy::LocalWins);
    }

    #[test]
    fn test_env_override_log_file() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();

        env::set_var("QUOTEBOOK_LOG_FILE", "/tmp/quotebook.log");
        config.apply_env_overrides();
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/quotebook.log")));

        // Empty string clears it
        env::set_var("QUOTEBOOK_LOG_FILE", "");
        config.apply_env_overrides();
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_serialization() {
        let _guard = EnvGuard::new(ENV_VARS);

        let config = Config {
            data_dir: PathBuf::from("/data/quotebook"),
            sync_url: Some("https://sync.example.com/quotes".to_string()),
            sync_enabled: true,
            conflict_policy: ConflictPolicy::LocalWins,
            ..Config::default()
        };

        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("data_dir"));
        assert!(toml_str.contains("sync_url"));
        assert!(toml_str.contains("conflict_policy = \"local-wins\""));

        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.data_dir, config.data_dir);
        assert_eq!(parsed.sync_url, config.sync_url);
        assert_eq!(parsed.sync_enabled, config.sync_enabled);
        assert_eq!(parsed.conflict_policy, ConflictPolicy::LocalWins);
    }

    #[test]
    fn test_load_from_str() {
        let _guard = EnvGuard::new(ENV_VARS);

        let toml = r#"
            data_dir = "/custom/data"
            sync_url = "https://example.com/posts"
            sync_enabled = true
            sync_interval_secs = 60
        "#;

        let config = Config::load_from_str(toml).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/custom/data"));
        assert_eq!(
            config.sync_url,
            Some("https://example.com/posts".to_string())
        );
        assert!(config.sync_enabled);
        assert_eq!(config.sync_interval_secs, 60);
        assert_eq!(config.sync_timeout_secs, DEFAULT_SYNC_TIMEOUT_SECS);
    }

    #[test]
    fn test_load_from_path_missing_file() {
        let _guard = EnvGuard::new(ENV_VARS);
        let temp_dir = tempfile::TempDir::new().unwrap();
        env::set_var("QUOTEBOOK_DATA_DIR", temp_dir.path().join("data"));

        let path = PathBuf::from("/nonexistent/config.toml");
        let config = Config::load_from_path(&path).unwrap();
        assert!(!config.sync_enabled);
        assert!(config.sync_url.is_none());
        assert!(temp_dir.path().join("data").exists());
    }

    #[test]
    fn test_save_and_reload() {
        let _guard = EnvGuard::new(ENV_VARS);
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let config = Config {
            data_dir: temp_dir.path().join("data"),
            sync_interval_secs: 12,
            ..Config::default()
        };
        config.save_to_path(&path).unwrap();

        let loaded = Config::load_with_cli_override(Some(&path)).unwrap();
        assert_eq!(loaded.data_dir, config.data_dir);
        assert_eq!(loaded.sync_interval_secs, 12);
    }
}
