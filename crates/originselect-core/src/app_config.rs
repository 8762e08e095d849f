/// Production host of the discovery API.
pub const DEFAULT_API_BASE_URL: &str = "https://api.originselect.com";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URL of the discovery backend, without a trailing slash.
    pub api_base_url: String,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            log_level: "info".to_string(),
        }
    }
}
