use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct RelayConfig {
    pub host: String,
    pub port: u16,
    pub secure: bool,
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JudgeConfig {
    pub endpoint: String,
    pub version: String,
    pub request_delay_ms: u64,
    pub request_timeout_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EditorConfig {
    pub debounce_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReconnectConfig {
    pub initial_backoff_ms: u64,
    pub max_backoff_ms: u64,
    pub max_retries: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub relay: RelayConfig,
    pub judge: JudgeConfig,
    pub editor: EditorConfig,
    pub reconnect: ReconnectConfig,
}
