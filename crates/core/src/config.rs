use serde::Deserialize;

/// Root application configuration. Loaded from environment variables
/// with the prefix `CLIPMORE__`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// How long the initial load may take before the dashboard switches
    /// to placeholder data.
    #[serde(default = "default_fallback_ms")]
    pub fallback_ms: u64,
    /// Reporting window selected when the page first opens.
    #[serde(default = "default_time_range_days")]
    pub time_range_days: u16,
    #[serde(default)]
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Simulated round-trip latency of the bundled mock API.
    #[serde(default = "default_mock_latency_ms")]
    pub mock_latency_ms: u64,
    /// Make campaign lookups fail, to exercise the error fallback path.
    #[serde(default)]
    pub fail_campaigns: bool,
}

// Default functions
fn default_fallback_ms() -> u64 {
    3000
}
fn default_time_range_days() -> u16 {
    30
}
fn default_mock_latency_ms() -> u64 {
    400
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            fallback_ms: default_fallback_ms(),
            time_range_days: default_time_range_days(),
            api: ApiConfig::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            mock_latency_ms: default_mock_latency_ms(),
            fail_campaigns: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder().add_source(
            config::Environment::with_prefix("CLIPMORE")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }
}
