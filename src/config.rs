use crate::error::{config_error, ImportResult};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use url::Url;

/// Default feed URL used when none is configured
pub const DEFAULT_FEED_URL: &str =
    "https://25livepub.collegenet.com/calendars/events-for-albion-college-website.json";

/// Default interval between scheduled imports, in seconds
pub const DEFAULT_IMPORT_INTERVAL_SECS: u64 = 3600;

/// Main configuration structure for the importer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// URL of the 25Live JSON feed
    pub feed_url: String,
    /// Whether scheduled imports are enabled
    pub import_enabled: bool,
    /// Seconds between scheduled imports
    pub import_interval_secs: u64,
    /// Redis connection URL for the record store
    pub redis_url: String,
}

/// Optional overrides loaded from config/import.toml
#[derive(Debug, Default, Deserialize)]
struct FileOverrides {
    feed_url: Option<String>,
    import_enabled: Option<bool>,
    import_interval_secs: Option<u64>,
    redis_url: Option<String>,
}

impl Config {
    /// Load configuration from environment and config file
    pub fn load() -> ImportResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let feed_url = env::var("FEED_URL").unwrap_or_else(|_| String::from(DEFAULT_FEED_URL));

        let import_enabled = match env::var("IMPORT_ENABLED") {
            Ok(v) => parse_bool(&v)
                .ok_or_else(|| config_error("Invalid IMPORT_ENABLED value, expected true/false"))?,
            Err(_) => true,
        };

        let import_interval_secs = match env::var("IMPORT_INTERVAL_SECS") {
            Ok(v) => v
                .parse::<u64>()
                .map_err(|_| config_error("Invalid IMPORT_INTERVAL_SECS format"))?,
            Err(_) => DEFAULT_IMPORT_INTERVAL_SECS,
        };

        let redis_url =
            env::var("REDIS_URL").unwrap_or_else(|_| String::from("redis://127.0.0.1:6379"));

        let mut config = Config {
            feed_url,
            import_enabled,
            import_interval_secs,
            redis_url,
        };

        // File overrides take precedence over environment values
        if let Ok(content) = fs::read_to_string("config/import.toml") {
            let overrides: FileOverrides = toml::from_str(&content)?;
            if let Some(url) = overrides.feed_url {
                config.feed_url = url;
            }
            if let Some(enabled) = overrides.import_enabled {
                config.import_enabled = enabled;
            }
            if let Some(interval) = overrides.import_interval_secs {
                config.import_interval_secs = interval;
            }
            if let Some(url) = overrides.redis_url {
                config.redis_url = url;
            }
        }

        config.validate()?;

        Ok(config)
    }

    /// Check that the configured values are usable
    pub fn validate(&self) -> ImportResult<()> {
        Url::parse(&self.feed_url)
            .map_err(|e| config_error(&format!("Invalid feed URL {}: {}", self.feed_url, e)))?;

        if self.import_interval_secs == 0 {
            return Err(config_error("Import interval must be greater than zero"));
        }

        Ok(())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool("1"), Some(true));
        assert_eq!(parse_bool("Off"), Some(false));
        assert_eq!(parse_bool("nope"), None);
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let config = Config {
            feed_url: "not a url".to_string(),
            import_enabled: true,
            import_interval_secs: 3600,
            redis_url: "redis://127.0.0.1:6379".to_string(),
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_interval() {
        let config = Config {
            feed_url: DEFAULT_FEED_URL.to_string(),
            import_enabled: true,
            import_interval_secs: 0,
            redis_url: "redis://127.0.0.1:6379".to_string(),
        };
        assert!(config.validate().is_err());
    }
}
