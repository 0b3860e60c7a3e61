use serde::Deserialize;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Movie catalog (TMDB) API key
    pub tmdb_api_key: String,

    /// Movie catalog API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Prefix joined with a poster path to build an absolute poster URL
    #[serde(default = "default_tmdb_image_base_url")]
    pub tmdb_image_base_url: String,

    /// Streaming Availability API key
    pub streaming_api_key: String,

    /// Streaming Availability API base URL
    #[serde(default = "default_streaming_api_url")]
    pub streaming_api_url: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Timeout applied to every outbound request
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,

    /// Catalog queries issued per discovery before giving up
    #[serde(default = "default_sample_max_attempts")]
    pub sample_max_attempts: u32,

    /// Highest page the catalog will serve
    #[serde(default = "default_sample_page_ceiling")]
    pub sample_page_ceiling: u32,

    /// Base delay after a failed catalog query, doubled per attempt
    #[serde(default = "default_sample_backoff_ms")]
    pub sample_backoff_ms: u64,

    /// Region used for streaming lookups when the request names none
    #[serde(default = "default_region")]
    pub default_region: String,

    /// Language requested from the catalog detail endpoint
    #[serde(default = "default_detail_language")]
    pub detail_language: String,
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_tmdb_image_base_url() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_streaming_api_url() -> String {
    "https://streaming-availability.p.rapidapi.com".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_http_timeout_secs() -> u64 {
    5
}

fn default_sample_max_attempts() -> u32 {
    3
}

fn default_sample_page_ceiling() -> u32 {
    500
}

fn default_sample_backoff_ms() -> u64 {
    250
}

fn default_region() -> String {
    "us".to_string()
}

fn default_detail_language() -> String {
    "en-US".to_string()
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn sample_backoff(&self) -> Duration {
        Duration::from_millis(self.sample_backoff_ms)
    }
}
