//! 설정 관리.
//!
//! 설정은 내장 기본값 → TOML 파일 → 환경 변수 순서로 덮어씁니다.
//! 자격증명은 파일에 두지 않고 환경 변수(또는 `.env`)에서만 읽는 것을 전제로 합니다.

use crate::credentials::mask_key;
use crate::domain::OrderType;
use crate::error::{TraderError, TraderResult};
use secrecy::SecretString;
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::path::Path;

/// 메인넷 선물 REST 기본 URL.
pub const MAINNET_BASE_URL: &str = "https://fapi.binance.com";

/// 테스트넷 선물 REST 기본 URL.
pub const TESTNET_BASE_URL: &str = "https://testnet.binancefuture.com";

/// 기본 설정 파일 경로.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// 기본 심볼 유니버스.
pub const DEFAULT_SYMBOLS: [&str; 10] = [
    "BTCUSDT", "ETHUSDT", "BNBUSDT", "ADAUSDT", "DOGEUSDT", "XRPUSDT", "DOTUSDT", "LINKUSDT",
    "LTCUSDT", "BCHUSDT",
];

/// 애플리케이션 설정.
#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// 거래소 설정
    #[serde(default)]
    pub exchange: ExchangeSettings,
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 거래소 접속 설정. 클라이언트 생성 후에는 바뀌지 않습니다.
#[derive(Deserialize)]
pub struct ExchangeSettings {
    /// API 키
    #[serde(default)]
    pub api_key: String,
    /// API 시크릿
    #[serde(default = "empty_secret", deserialize_with = "deserialize_secret")]
    pub api_secret: SecretString,
    /// 테스트넷 사용
    #[serde(default = "default_testnet")]
    pub testnet: bool,
    /// REST 기본 URL 재정의 (테스트/프록시용)
    #[serde(default)]
    pub base_url: Option<String>,
    /// 시세 조회 기본 심볼 유니버스 (순서 유지)
    #[serde(default = "default_symbols")]
    pub symbols: Vec<String>,
    /// 허용되는 주문 유형
    #[serde(default = "default_order_types")]
    pub order_types: Vec<OrderType>,
    /// 요청 타임아웃 (초)
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
    /// 수신 윈도우 (밀리초). 기본값 5000, 설정에서 `0`을 주면 `None`(전송하지 않음)
    #[serde(default = "default_recv_window", deserialize_with = "deserialize_recv_window")]
    pub recv_window: Option<u64>,
}

fn empty_secret() -> SecretString {
    SecretString::new(String::new().into_boxed_str())
}

fn deserialize_secret<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Ok(SecretString::new(value.into_boxed_str()))
}

fn deserialize_recv_window<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u64>::deserialize(deserializer)?.filter(|window| *window > 0))
}

fn default_testnet() -> bool {
    true
}
fn default_symbols() -> Vec<String> {
    DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect()
}
fn default_order_types() -> Vec<OrderType> {
    OrderType::ALL.to_vec()
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_recv_window() -> Option<u64> {
    Some(5000)
}

impl Default for ExchangeSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_secret: empty_secret(),
            testnet: default_testnet(),
            base_url: None,
            symbols: default_symbols(),
            order_types: default_order_types(),
            request_timeout_secs: default_timeout_secs(),
            recv_window: default_recv_window(),
        }
    }
}

impl fmt::Debug for ExchangeSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExchangeSettings")
            .field("api_key", &mask_key(&self.api_key))
            .field("api_secret", &"***REDACTED***")
            .field("testnet", &self.testnet)
            .field("base_url", &self.base_url)
            .field("symbols", &self.symbols)
            .field("order_types", &self.order_types)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("recv_window", &self.recv_window)
            .finish()
    }
}

impl ExchangeSettings {
    /// REST API 기본 URL 반환.
    pub fn rest_base_url(&self) -> &str {
        match self.base_url.as_deref() {
            Some(url) => url.trim_end_matches('/'),
            None if self.testnet => TESTNET_BASE_URL,
            None => MAINNET_BASE_URL,
        }
    }

    /// 설정 값의 일관성을 검사합니다 (자격증명은 클라이언트 생성 시 검사).
    pub fn validate(&self) -> TraderResult<()> {
        if self.symbols.iter().all(|s| s.trim().is_empty()) {
            return Err(TraderError::Config(
                "exchange.symbols must contain at least one symbol".to_string(),
            ));
        }
        if self.order_types.is_empty() {
            return Err(TraderError::Config(
                "exchange.order_types must not be empty".to_string(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(TraderError::Config(
                "exchange.request_timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// 로그 레벨
    #[serde(default = "default_log_level")]
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    #[serde(default = "default_log_format")]
    pub format: String,
    /// 일별 로그 파일 디렉토리 (없으면 파일 로깅 안 함)
    #[serde(default)]
    pub file_dir: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file_dir: None,
        }
    }
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// `path`가 없으면 `config/default.toml`을 시도하고, 파일이 없어도 에러가 아닙니다.
    /// 환경 변수는 `TRADEBOT__EXCHANGE__API_KEY` 형식이며,
    /// 관례적인 `BINANCE_API_KEY` / `BINANCE_API_SECRET`도 기본값으로 받아들입니다.
    pub fn load(path: Option<&Path>) -> TraderResult<Self> {
        let mut builder = config::Config::builder();

        if let Ok(key) = std::env::var("BINANCE_API_KEY") {
            builder = builder.set_default("exchange.api_key", key)?;
        }
        if let Ok(secret) = std::env::var("BINANCE_API_SECRET") {
            builder = builder.set_default("exchange.api_secret", secret)?;
        }

        let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH));
        let config: AppConfig = builder
            // 파일에서 로드
            .add_source(config::File::from(path).required(false))
            // 환경 변수로 오버라이드
            .add_source(
                config::Environment::with_prefix("TRADEBOT")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("exchange.symbols")
                    .with_list_parse_key("exchange.order_types"),
            )
            .build()?
            .try_deserialize()?;

        config.exchange.validate()?;
        Ok(config)
    }

    /// TOML 문자열에서 설정을 로드합니다 (환경 변수 미반영).
    pub fn from_toml(contents: &str) -> TraderResult<Self> {
        let config: AppConfig = config::Config::builder()
            .add_source(config::File::from_str(contents, config::FileFormat::Toml))
            .build()?
            .try_deserialize()?;

        config.exchange.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_defaults_from_empty_toml() {
        let config = AppConfig::from_toml("").unwrap();
        assert!(config.exchange.testnet);
        assert_eq!(config.exchange.rest_base_url(), TESTNET_BASE_URL);
        assert_eq!(config.exchange.symbols.len(), 10);
        assert_eq!(config.exchange.symbols[0], "BTCUSDT");
        assert_eq!(config.exchange.order_types, OrderType::ALL.to_vec());
        assert_eq!(config.exchange.request_timeout_secs, 10);
        assert_eq!(config.exchange.recv_window, Some(5000));
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_toml_overrides() {
        let config = AppConfig::from_toml(
            r#"
            [exchange]
            api_key = "key"
            api_secret = "secret"
            testnet = false
            symbols = ["ETHUSDT", "BTCUSDT"]
            order_types = ["MARKET", "LIMIT"]
            request_timeout_secs = 3

            [logging]
            level = "debug"
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.exchange.rest_base_url(), MAINNET_BASE_URL);
        assert_eq!(config.exchange.api_secret.expose_secret(), "secret");
        assert_eq!(config.exchange.symbols, vec!["ETHUSDT", "BTCUSDT"]);
        assert_eq!(
            config.exchange.order_types,
            vec![OrderType::Market, OrderType::Limit]
        );
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_base_url_override_trims_slash() {
        let config = AppConfig::from_toml(
            r#"
            [exchange]
            base_url = "http://127.0.0.1:1234/"
            "#,
        )
        .unwrap();
        assert_eq!(config.exchange.rest_base_url(), "http://127.0.0.1:1234");
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let settings = ExchangeSettings {
            symbols: vec![],
            ..Default::default()
        };
        assert!(settings.validate().unwrap_err().is_config());

        let settings = ExchangeSettings {
            order_types: vec![],
            ..Default::default()
        };
        assert!(settings.validate().is_err());

        let err = AppConfig::from_toml(
            r#"
            [exchange]
            request_timeout_secs = 0
            "#,
        )
        .unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_zero_recv_window_disables_it() {
        let config = AppConfig::from_toml(
            r#"
            [exchange]
            recv_window = 0
            "#,
        )
        .unwrap();
        assert_eq!(config.exchange.recv_window, None);

        let config = AppConfig::from_toml(
            r#"
            [exchange]
            recv_window = 10000
            "#,
        )
        .unwrap();
        assert_eq!(config.exchange.recv_window, Some(10000));
    }

    /// 테스트가 끝나면 (패닉 포함) 설정한 환경 변수를 지웁니다.
    struct EnvVars(Vec<&'static str>);

    impl EnvVars {
        fn set(vars: &[(&'static str, &str)]) -> Self {
            for (key, value) in vars {
                std::env::set_var(key, value);
            }
            Self(vars.iter().map(|(key, _)| *key).collect())
        }
    }

    impl Drop for EnvVars {
        fn drop(&mut self) {
            for key in &self.0 {
                std::env::remove_var(key);
            }
        }
    }

    // 환경 변수는 프로세스 전역이므로 `load`를 다루는 검증은 이 테스트 하나에 모읍니다.
    #[test]
    fn test_load_applies_env_overrides() {
        let missing = Path::new("config/does-not-exist.toml");

        let _vars = EnvVars::set(&[
            ("BINANCE_API_KEY", "fallback-key"),
            ("BINANCE_API_SECRET", "fallback-secret"),
            ("TRADEBOT__EXCHANGE__TESTNET", "false"),
            ("TRADEBOT__EXCHANGE__SYMBOLS", "SOLUSDT,ETHUSDT"),
            ("TRADEBOT__EXCHANGE__ORDER_TYPES", "MARKET,LIMIT"),
            ("TRADEBOT__EXCHANGE__RECV_WINDOW", "0"),
            ("TRADEBOT__LOGGING__LEVEL", "debug"),
        ]);

        let config = AppConfig::load(Some(missing)).unwrap();
        assert_eq!(config.exchange.api_key, "fallback-key");
        assert_eq!(config.exchange.api_secret.expose_secret(), "fallback-secret");
        assert!(!config.exchange.testnet);
        assert_eq!(config.exchange.rest_base_url(), MAINNET_BASE_URL);
        assert_eq!(config.exchange.symbols, vec!["SOLUSDT", "ETHUSDT"]);
        assert_eq!(
            config.exchange.order_types,
            vec![OrderType::Market, OrderType::Limit]
        );
        assert_eq!(config.exchange.recv_window, None);
        assert_eq!(config.exchange.request_timeout_secs, 10);
        assert_eq!(config.logging.level, "debug");

        // 접두사 변수가 관례적인 변수보다 우선
        let _prefixed = EnvVars::set(&[("TRADEBOT__EXCHANGE__API_KEY", "prefixed-key")]);
        let config = AppConfig::load(Some(missing)).unwrap();
        assert_eq!(config.exchange.api_key, "prefixed-key");
        assert_eq!(config.exchange.api_secret.expose_secret(), "fallback-secret");
    }

    #[test]
    fn test_debug_hides_secret() {
        let config = AppConfig::from_toml(
            r#"
            [exchange]
            api_key = "abcdefghijklmnop"
            api_secret = "super-secret-value"
            "#,
        )
        .unwrap();
        let debug = format!("{:?}", config.exchange);
        assert!(debug.contains("abcd...mnop"));
        assert!(!debug.contains("super-secret-value"));
    }
}
