pub use crate::models::config_models::Config;

use once_cell::sync::OnceCell;
use std::fs;

use crate::models::config_models::RelayConfig;

pub static GLOBAL_CONFIG: OnceCell<Config> = OnceCell::new();

pub const CONFIG_FILE: &str = "config.toml";

impl Config {
    pub fn from_file(path: &str) -> Self {
        let content = fs::read_to_string(path).expect("Failed to read config file");
        toml::from_str(&content).expect("Failed to parse config file")
    }
}

pub fn init_global_config() -> &'static Config {
    GLOBAL_CONFIG.get_or_init(|| Config::from_file(CONFIG_FILE))
}

pub fn get_global_config() -> &'static Config {
    GLOBAL_CONFIG.get().expect("Global config not initialized")
}

impl RelayConfig {
    pub fn ws_url(&self, session_id: &str) -> String {
        let scheme = if self.secure { "wss" } else { "ws" };
        format!(
            "{}://{}:{}{}?sessionId={}",
            scheme, self.host, self.port, self.path, session_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shipped_config_parses() {
        let config: Config = toml::from_str(include_str!("../../../config.toml")).unwrap();
        assert_eq!(config.judge.version, "*");
        assert!(config.judge.request_delay_ms > 0);
        assert!(config.reconnect.max_backoff_ms >= config.reconnect.initial_backoff_ms);
    }

    #[test]
    fn relay_url_carries_the_session_id() {
        let relay = RelayConfig {
            host: "localhost".to_owned(),
            port: 9006,
            secure: false,
            path: "/ws".to_owned(),
        };
        assert_eq!(relay.ws_url("S1"), "ws://localhost:9006/ws?sessionId=S1");
    }

    #[test]
    fn secure_relay_uses_wss() {
        let relay = RelayConfig {
            host: "relay.example.com".to_owned(),
            port: 443,
            secure: true,
            path: "/ws".to_owned(),
        };
        assert!(relay.ws_url("S1").starts_with("wss://"));
    }
}
