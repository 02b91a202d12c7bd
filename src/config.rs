//! Configuration file parser for ~/.config/opml2feedlist/config.toml.
//!
//! The config file is optional: a missing file yields `Config::default()`.
//! It only supplies defaults; command-line arguments always take precedence.
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Output file used when neither the command line nor the config names one.
pub const DEFAULT_OUTPUT: &str = "feedlist.txt";

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// SEC-014: Config file exceeds maximum allowed size.
    #[error("Config file too large: {0}")]
    TooLarge(String),
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Defaults loaded from the config file.
///
/// All fields use `#[serde(default)]` so any subset of keys can be specified.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output path used when the command line does not name one.
    pub output: String,

    /// Whether to annotate the feed list with titles and section markers.
    pub comments: bool,

    /// Whether to drop feeds whose URL is not an absolute http(s) URL.
    pub http_only: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output: DEFAULT_OUTPUT.to_string(),
            comments: true,
            http_only: false,
        }
    }
}

impl Config {
    /// SEC-014: Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    /// Default location, `$HOME/.config/opml2feedlist/config.toml`.
    ///
    /// `None` when `HOME` is not set.
    pub fn default_path() -> Option<PathBuf> {
        let home = std::env::var_os("HOME")?;
        Some(
            PathBuf::from(home)
                .join(".config")
                .join("opml2feedlist")
                .join("config.toml"),
        )
    }

    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(Config::default())`
    /// - Empty file → `Ok(Config::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)` with line number info
    /// - Unknown keys → accepted, logged as warning
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        // SEC-014: Check file size before reading to prevent memory exhaustion
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // Race condition: file deleted between metadata and read
                tracing::debug!(path = %path.display(), "Config file disappeared, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        if content.trim().is_empty() {
            tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
            return Ok(Self::default());
        }

        if let Ok(raw) = content.parse::<toml::Table>() {
            let known_keys = ["output", "comments", "http_only"];
            for key in raw.keys() {
                if !known_keys.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        let config: Config = toml::from_str(&content)?;
        tracing::info!(path = %path.display(), ?config, "Loaded configuration");
        Ok(config)
    }
}

/// Settings for one conversion run, fixed once arguments are parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Input paths and wildcard patterns, in argument order.
    pub input_patterns: Vec<String>,
    pub output_path: PathBuf,
    pub add_comments: bool,
    pub http_only: bool,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn config_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("opml2feedlist_config_test_{}", name));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.output, "feedlist.txt");
        assert!(config.comments);
        assert!(!config.http_only);
    }

    #[test]
    fn test_missing_file_returns_default() {
        let path = Path::new("/tmp/opml2feedlist_test_nonexistent_config.toml");
        let config = Config::load(path).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_empty_file_returns_default() {
        let dir = config_dir("empty");
        let path = dir.join("config.toml");
        std::fs::write(&path, "   \n  \n").unwrap();

        assert_eq!(Config::load(&path).unwrap(), Config::default());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_partial_config_uses_defaults_for_missing() {
        let dir = config_dir("partial");
        let path = dir.join("config.toml");
        std::fs::write(&path, "comments = false\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert!(!config.comments);
        assert_eq!(config.output, "feedlist.txt");
        assert!(!config.http_only);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_full_config() {
        let dir = config_dir("full");
        let path = dir.join("config.toml");
        let content = r#"
output = "/home/me/rssfeedz/feedlist.txt"
comments = false
http_only = true
"#;
        std::fs::write(&path, content).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.output, "/home/me/rssfeedz/feedlist.txt");
        assert!(!config.comments);
        assert!(config.http_only);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_invalid_toml_returns_error() {
        let dir = config_dir("invalid");
        let path = dir.join("config.toml");
        std::fs::write(&path, "this is not [valid toml").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().contains("Invalid TOML"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_unknown_keys_accepted() {
        let dir = config_dir("unknown");
        let path = dir.join("config.toml");
        std::fs::write(&path, "comments = true\ntheme = \"dark\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert!(config.comments);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_wrong_type_returns_error() {
        let dir = config_dir("wrongtype");
        let path = dir.join("config.toml");
        std::fs::write(&path, "comments = \"yes\"\n").unwrap();

        assert!(Config::load(&path).is_err());

        std::fs::remove_dir_all(&dir).ok();
    }

    // SEC-014: File size limit
    #[test]
    fn test_too_large_file_rejected() {
        let dir = config_dir("too_large");
        let path = dir.join("config.toml");
        std::fs::write(&path, "a".repeat(1_048_577)).unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::TooLarge(_)));
        assert!(err.to_string().contains("too large"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_default_path_under_home() {
        if let Some(path) = Config::default_path() {
            assert!(path.ends_with(".config/opml2feedlist/config.toml"));
        }
    }
}
