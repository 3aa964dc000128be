//! Runtime configuration loaded from the environment (and `.env`).

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::AppError;

const DEFAULT_JWT_SECRET: &str = "your-secret-key";

/// Settings for the language model used by the therapeutic response.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    /// OpenAI-compatible base url, without trailing slash
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub request_timeout: Duration,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4".to_string(),
            temperature: 0.7,
            max_tokens: 500,
            request_timeout: Duration::from_secs(60),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    pub llm: LlmConfig,
    pub log_dir: PathBuf,
    pub environment: String,
    pub recorder_queue_capacity: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            database_url: "sqlite://data/calmjournal.sqlite".to_string(),
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            token_ttl_hours: 24,
            llm: LlmConfig::default(),
            log_dir: PathBuf::from("logs"),
            environment: "development".to_string(),
            recorder_queue_capacity: 256,
        }
    }
}

impl AppConfig {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Result<Self, AppError> {
        dotenv::dotenv().ok();
        Self::from_vars()
    }

    /// Read the process environment only.
    pub fn from_vars() -> Result<Self, AppError> {
        let defaults = Self::default();
        let llm_defaults = LlmConfig::default();

        let jwt_secret = var_or("JWT_SECRET_KEY", &defaults.jwt_secret);

        let llm = LlmConfig {
            api_key: env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty()),
            base_url: var_or("LLM_BASE_URL", &llm_defaults.base_url)
                .trim_end_matches('/')
                .to_string(),
            model: var_or("LLM_MODEL", &llm_defaults.model),
            temperature: parse_var("LLM_TEMPERATURE", llm_defaults.temperature)?,
            max_tokens: parse_var("LLM_MAX_TOKENS", llm_defaults.max_tokens)?,
            request_timeout: Duration::from_secs(parse_var(
                "LLM_TIMEOUT_SECS",
                llm_defaults.request_timeout.as_secs(),
            )?),
        };

        if !(0.0..=2.0).contains(&llm.temperature) {
            return Err(AppError::Config(format!(
                "LLM_TEMPERATURE must be between 0.0 and 2.0, got {}",
                llm.temperature
            )));
        }

        let recorder_queue_capacity =
            parse_var("RECORDER_QUEUE_CAPACITY", defaults.recorder_queue_capacity)?;
        if recorder_queue_capacity == 0 {
            return Err(AppError::Config(
                "RECORDER_QUEUE_CAPACITY must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            host: var_or("HOST", &defaults.host),
            port: parse_var("PORT", defaults.port)?,
            database_url: var_or("DATABASE_URL", &defaults.database_url),
            jwt_secret,
            token_ttl_hours: parse_var("TOKEN_TTL_HOURS", defaults.token_ttl_hours)?,
            llm,
            log_dir: PathBuf::from(var_or("LOG_DIR", &defaults.log_dir.to_string_lossy())),
            environment: var_or("ENVIRONMENT", &defaults.environment),
            recorder_queue_capacity,
        })
    }

    /// True when tokens would be signed with the built-in development secret.
    pub fn uses_default_jwt_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_JWT_SECRET
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("Invalid bind address: {}", e)))
    }
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_var<T>(key: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) if !raw.is_empty() => raw
            .parse()
            .map_err(|e| AppError::Config(format!("{} is invalid ({}): {}", key, raw, e))),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEYS: &[&str] = &[
        "HOST",
        "PORT",
        "DATABASE_URL",
        "JWT_SECRET_KEY",
        "TOKEN_TTL_HOURS",
        "OPENAI_API_KEY",
        "LLM_BASE_URL",
        "LLM_MODEL",
        "LLM_TEMPERATURE",
        "LLM_MAX_TOKENS",
        "LLM_TIMEOUT_SECS",
        "LOG_DIR",
        "ENVIRONMENT",
        "RECORDER_QUEUE_CAPACITY",
    ];

    /// Every known key, unset unless listed in `overrides`.
    fn env_with(overrides: &[(&'static str, &'static str)]) -> Vec<(&'static str, Option<&'static str>)> {
        KEYS.iter()
            .map(|k| {
                let value = overrides.iter().find(|(o, _)| o == k).map(|(_, v)| *v);
                (*k, value)
            })
            .collect()
    }

    #[test]
    fn test_defaults() {
        temp_env::with_vars(env_with(&[]), || {
            let config = AppConfig::from_vars().unwrap();
            assert_eq!(config.port, 5000);
            assert_eq!(config.token_ttl_hours, 24);
            assert_eq!(config.llm.model, "gpt-4");
            assert_eq!(config.llm.max_tokens, 500);
            assert!(config.llm.api_key.is_none());
            assert_eq!(config.bind_addr().unwrap().to_string(), "127.0.0.1:5000");
        });
    }

    #[test]
    fn test_overrides() {
        let vars = env_with(&[
            ("PORT", "8088"),
            ("OPENAI_API_KEY", "sk-test"),
            ("LLM_BASE_URL", "http://localhost:9999/v1/"),
            ("LLM_TEMPERATURE", "0.2"),
            ("RECORDER_QUEUE_CAPACITY", "8"),
        ]);
        temp_env::with_vars(vars, || {
            let config = AppConfig::from_vars().unwrap();
            assert_eq!(config.port, 8088);
            assert_eq!(config.llm.api_key.as_deref(), Some("sk-test"));
            assert_eq!(config.llm.base_url, "http://localhost:9999/v1");
            assert!((config.llm.temperature - 0.2).abs() < f32::EPSILON);
            assert_eq!(config.recorder_queue_capacity, 8);
        });
    }

    #[test]
    fn test_invalid_number_is_config_error() {
        let vars = env_with(&[("PORT", "not-a-port")]);
        temp_env::with_vars(vars, || {
            let err = AppConfig::from_vars().unwrap_err();
            assert!(matches!(err, AppError::Config(msg) if msg.contains("PORT")));
        });
    }

    #[test]
    fn test_temperature_out_of_range() {
        let vars = env_with(&[("LLM_TEMPERATURE", "3.5")]);
        temp_env::with_vars(vars, || {
            assert!(matches!(AppConfig::from_vars(), Err(AppError::Config(_))));
        });
    }
}
