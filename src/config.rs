/**
* filename : config
* author : HAMA
* date: 2025. 6. 2.
* description:
**/

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::VwapError;

const TRADING_PAIRS_DELIMITER: &str = "|";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub vwap: VwapConfig,
    pub feed: FeedConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VwapConfig {
    pub trading_pairs: Vec<String>,
    pub window_size: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedName {
    Coinbase,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    pub name: FeedName,
    pub ws_connection_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Config {
    /// Load configuration from a file
    pub fn load() -> Result<Self, VwapError> {
        // Try to load from config.json
        let config_path = Path::new("config.json");

        let mut cfg = if config_path.exists() {
            let mut file = File::open(config_path)
                .map_err(|e| VwapError::ConfigError(format!("Failed to open config file: {}", e)))?;

            let mut contents = String::new();
            file.read_to_string(&mut contents)
                .map_err(|e| VwapError::ConfigError(format!("Failed to read config file: {}", e)))?;

            serde_json::from_str::<Config>(&contents)
                .map_err(|e| VwapError::ConfigError(format!("Failed to parse config file: {}", e)))?
        } else {
            Config::default()
        };

        // environment overrides
        cfg.apply_env_overrides()?;
        cfg.validate()?;

        Ok(cfg)
    }

    /// Apply environment variable overrides for runtime fields
    fn apply_env_overrides(&mut self) -> Result<(), VwapError> {
        use std::env;

        if let Ok(v) = env::var("VWAP_TRADING_PAIRS") {
            if !v.is_empty() {
                self.vwap.trading_pairs = v
                    .split(TRADING_PAIRS_DELIMITER)
                    .map(|s| s.to_string())
                    .collect();
            }
        }

        if let Ok(v) = env::var("VWAP_WINDOW_SIZE") {
            if !v.is_empty() {
                let size: i64 = v.parse().map_err(|_| {
                    VwapError::ConfigError(format!("invalid VWAP_WINDOW_SIZE value: {}", v))
                })?;
                if size <= 0 {
                    return Err(VwapError::ConfigError(format!(
                        "VWAP_WINDOW_SIZE must be positive, got {}",
                        size
                    )));
                }
                self.vwap.window_size = size as usize;
            }
        }

        if let Ok(v) = env::var("FEED_NAME") {
            if !v.is_empty() {
                self.feed.name = match v.to_lowercase().as_str() {
                    "coinbase" => FeedName::Coinbase,
                    other => {
                        return Err(VwapError::ConfigError(format!(
                            "unsupported feed name: {}",
                            other
                        )))
                    }
                };
            }
        }

        if let Ok(v) = env::var("FEED_WS_CONNECTION_URL") {
            if !v.is_empty() {
                self.feed.ws_connection_url = v;
            }
        }

        Ok(())
    }

    fn validate(&self) -> Result<(), VwapError> {
        if self.vwap.trading_pairs.is_empty() {
            return Err(VwapError::ConfigError(
                "at least one trading pair is required".to_string(),
            ));
        }

        if self.vwap.window_size == 0 {
            return Err(VwapError::ConfigError(
                "window size must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            vwap: VwapConfig {
                trading_pairs: vec![
                    "BTC-USD".to_string(),
                    "ETH-USD".to_string(),
                    "ETH-BTC".to_string(),
                ],
                window_size: 200,
            },
            feed: FeedConfig {
                name: FeedName::Coinbase,
                // 편의를 위한 기본값
                ws_connection_url: "wss://ws-feed.exchange.coinbase.com".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, MutexGuard};

    // 환경변수는 프로세스 전역이므로 관련 테스트를 직렬화
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    struct EnvGuard {
        _lock: MutexGuard<'static, ()>,
        keys: Vec<&'static str>,
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for key in &self.keys {
                env::remove_var(key);
            }
        }
    }

    fn set_env(vars: &[(&'static str, &str)]) -> EnvGuard {
        let lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());

        for (key, value) in vars {
            env::set_var(key, value);
        }

        EnvGuard {
            _lock: lock,
            keys: vars.iter().map(|(key, _)| *key).collect(),
        }
    }

    #[test]
    fn test_default_config() {
        let cfg = Config::default();

        assert_eq!(cfg.vwap.trading_pairs, vec!["BTC-USD", "ETH-USD", "ETH-BTC"]);
        assert_eq!(cfg.vwap.window_size, 200);
        assert_eq!(cfg.feed.name, FeedName::Coinbase);
        assert_eq!(cfg.feed.ws_connection_url, "wss://ws-feed.exchange.coinbase.com");
    }

    #[test]
    fn test_validate_rejects_zero_window_size() {
        let mut cfg = Config::default();
        cfg.vwap.window_size = 0;

        assert!(matches!(cfg.validate(), Err(VwapError::ConfigError(_))));
    }

    #[test]
    fn test_validate_rejects_empty_trading_pairs() {
        let mut cfg = Config::default();
        cfg.vwap.trading_pairs.clear();

        assert!(matches!(cfg.validate(), Err(VwapError::ConfigError(_))));
    }

    #[test]
    fn test_env_overrides_runtime_fields() {
        let _guard = set_env(&[
            ("VWAP_TRADING_PAIRS", "SOL-USD|ADA-USD"),
            ("VWAP_WINDOW_SIZE", "42"),
            ("FEED_WS_CONNECTION_URL", "ws://127.0.0.1:9999"),
        ]);

        let mut cfg = Config::default();
        cfg.apply_env_overrides().unwrap();

        // 거래쌍 목록은 "|" 구분자로 분리됨
        assert_eq!(cfg.vwap.trading_pairs, vec!["SOL-USD", "ADA-USD"]);
        assert_eq!(cfg.vwap.window_size, 42);
        assert_eq!(cfg.feed.ws_connection_url, "ws://127.0.0.1:9999");
    }

    #[test]
    fn test_env_empty_values_keep_defaults() {
        let _guard = set_env(&[
            ("VWAP_TRADING_PAIRS", ""),
            ("VWAP_WINDOW_SIZE", ""),
        ]);

        let mut cfg = Config::default();
        cfg.apply_env_overrides().unwrap();

        assert_eq!(cfg.vwap.trading_pairs, vec!["BTC-USD", "ETH-USD", "ETH-BTC"]);
        assert_eq!(cfg.vwap.window_size, 200);
    }

    #[test]
    fn test_env_rejects_non_numeric_window_size() {
        let _guard = set_env(&[("VWAP_WINDOW_SIZE", "abc")]);

        let mut cfg = Config::default();
        assert!(matches!(
            cfg.apply_env_overrides(),
            Err(VwapError::ConfigError(_))
        ));
    }

    #[test]
    fn test_env_rejects_non_positive_window_size() {
        for value in ["0", "-3"] {
            let _guard = set_env(&[("VWAP_WINDOW_SIZE", value)]);

            let mut cfg = Config::default();
            assert!(matches!(
                cfg.apply_env_overrides(),
                Err(VwapError::ConfigError(_))
            ));
        }
    }

    #[test]
    fn test_env_accepts_coinbase_feed_name_case_insensitively() {
        let _guard = set_env(&[("FEED_NAME", "Coinbase")]);

        let mut cfg = Config::default();
        cfg.apply_env_overrides().unwrap();

        assert_eq!(cfg.feed.name, FeedName::Coinbase);
    }

    #[test]
    fn test_env_rejects_unsupported_feed_name() {
        let _guard = set_env(&[("FEED_NAME", "binance")]);

        let mut cfg = Config::default();
        assert!(matches!(
            cfg.apply_env_overrides(),
            Err(VwapError::ConfigError(_))
        ));
    }
}
