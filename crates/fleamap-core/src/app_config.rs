use std::net::SocketAddr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub kakao_api_key: String,
    pub kakao_base_url: String,
    pub geocoder_timeout_secs: u64,
    /// When set, cached failures expire after this many seconds. Successes
    /// never expire.
    pub geocoder_failure_ttl_secs: Option<u64>,
    pub batch_delay_ms: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("kakao_api_key", &"[redacted]")
            .field("kakao_base_url", &self.kakao_base_url)
            .field("geocoder_timeout_secs", &self.geocoder_timeout_secs)
            .field("geocoder_failure_ttl_secs", &self.geocoder_failure_ttl_secs)
            .field("batch_delay_ms", &self.batch_delay_ms)
            .finish()
    }
}
