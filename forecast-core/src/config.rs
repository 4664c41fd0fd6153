use serde::{Deserialize, Serialize};

/// Settings for the HTTP client talking to the weather provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API base URL, e.g. "https://api.openweathermap.org/data/2.5".
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Unit system passed to the provider. Templates assume "metric".
    #[serde(default = "default_units")]
    pub units: String,

    /// Number of days requested for daily forecasts.
    #[serde(default = "default_daily_count")]
    pub daily_count: u8,
}

fn default_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

const fn default_timeout() -> u64 {
    30
}

fn default_units() -> String {
    "metric".to_string()
}

const fn default_daily_count() -> u8 {
    7
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            units: default_units(),
            daily_count: default_daily_count(),
        }
    }
}

impl ClientConfig {
    /// Same defaults, different endpoint. Mostly for pointing at a mock server.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), ..Self::default() }
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path.trim_start_matches('/'))
    }
}
