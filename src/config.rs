use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// Exporter configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ExporterConfig {
    /// Base URL of the Sorted API
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Name of the export format (e.g., "paprika")
    #[serde(default = "default_format")]
    pub format: String,
    /// Directory the archive is written to
    #[serde(default = "default_destination")]
    pub destination: String,
    /// Serving count whose quantities, times and steps are exported
    #[serde(default = "default_target_servings")]
    pub target_servings: u32,
    /// Overall request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Connection and TLS handshake timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,
    /// Idle pooled connection timeout in seconds
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout: u64,
}

impl Default for ExporterConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            format: default_format(),
            destination: default_destination(),
            target_servings: default_target_servings(),
            timeout: default_timeout(),
            connect_timeout: default_connect_timeout(),
            idle_timeout: default_idle_timeout(),
        }
    }
}

/// Timeouts applied to every HTTP client the exporter builds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request: Duration,
    pub connect: Duration,
    pub idle: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        ExporterConfig::default().timeouts()
    }
}

// Default value functions
fn default_endpoint() -> String {
    "https://cook.sorted.club".to_string()
}

fn default_format() -> String {
    "paprika".to_string()
}

fn default_destination() -> String {
    ".".to_string()
}

fn default_target_servings() -> u32 {
    2
}

fn default_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    5
}

fn default_idle_timeout() -> u64 {
    5
}

impl ExporterConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with SORTED__ prefix
    /// 2. sorted-export.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: SORTED__TARGET_SERVINGS
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    pub fn timeouts(&self) -> Timeouts {
        Timeouts {
            request: Duration::from_secs(self.timeout),
            connect: Duration::from_secs(self.connect_timeout),
            idle: Duration::from_secs(self.idle_timeout),
        }
    }
}

/// Load configuration from file and environment variables
///
/// See [`ExporterConfig::load`] for the precedence rules.
pub fn load_config() -> Result<ExporterConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("sorted-export").required(false))
        // Use double underscore for nested keys: SORTED__TARGET_SERVINGS
        .add_source(
            Environment::with_prefix("SORTED")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        assert_eq!(default_endpoint(), "https://cook.sorted.club");
        assert_eq!(default_format(), "paprika");
        assert_eq!(default_destination(), ".");
        assert_eq!(default_target_servings(), 2);
        assert_eq!(default_timeout(), 30);
        assert_eq!(default_connect_timeout(), 5);
        assert_eq!(default_idle_timeout(), 5);
    }

    #[test]
    fn test_timeouts_from_config() {
        let config = ExporterConfig {
            timeout: 10,
            connect_timeout: 2,
            idle_timeout: 1,
            ..Default::default()
        };

        let timeouts = config.timeouts();
        assert_eq!(timeouts.request, Duration::from_secs(10));
        assert_eq!(timeouts.connect, Duration::from_secs(2));
        assert_eq!(timeouts.idle, Duration::from_secs(1));
    }

    #[test]
    fn test_default_timeouts_match_config_defaults() {
        assert_eq!(Timeouts::default(), ExporterConfig::default().timeouts());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let settings = Config::builder()
            .add_source(config::File::from_str(
                "target_servings = 4\nformat = \"paprika\"",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap();

        let config: ExporterConfig = settings.try_deserialize().unwrap();
        assert_eq!(config.target_servings, 4);
        assert_eq!(config.endpoint, "https://cook.sorted.club");
        assert_eq!(config.timeout, 30);
    }

    #[test]
    fn test_load_config_without_file() {
        // Every field has a default, so an empty environment still loads
        let result = load_config();
        assert!(result.is_ok());
    }
}
