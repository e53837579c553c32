use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::str::FromStr;

use crate::services::prompt::DEFAULT_PREAMBLE;

/// Development frontend allowed to call the API from a browser.
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:5173";

/// Google Generative Language API base URL.
pub const DEFAULT_GENAI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.0-flash";

const DEFAULT_TIMEOUT_SECS: u64 = 120;

const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub cors: CorsConfig,
    pub generation: GenerationConfig,
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    pub allowed_origin: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerationConfig {
    pub provider: ProviderKind,
    pub model: String,
    pub api_key: String,
    pub api_base: String,
    /// Upper bound on a single generation call; 0 disables the bound.
    pub timeout_secs: u64,
    pub prompt_preamble: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObservabilityConfig {
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
}

/// Which text generator backs `/chat`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Gemini,
    Mock,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "gemini",
            ProviderKind::Mock => "mock",
        }
    }
}

impl FromStr for ProviderKind {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "gemini" => Ok(ProviderKind::Gemini),
            "mock" => Ok(ProviderKind::Mock),
            other => Err(AppError::ConfigError(anyhow::anyhow!(
                "Unknown GENAI_PROVIDER '{}', expected 'gemini' or 'mock'",
                other
            ))),
        }
    }
}

impl ChatConfig {
    /// Overlay the environment on `ChatConfig::default()`.
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";
        let defaults = ChatConfig::default();
        let generation = defaults.generation;

        Ok(ChatConfig {
            common: common_config,
            cors: CorsConfig {
                allowed_origin: get_env(
                    "CHAT_ALLOWED_ORIGIN",
                    Some(&defaults.cors.allowed_origin),
                    is_prod,
                )?,
            },
            generation: GenerationConfig {
                provider: get_env("GENAI_PROVIDER", Some(generation.provider.as_str()), is_prod)?
                    .parse()?,
                model: get_env("GENAI_TEXT_MODEL", Some(&generation.model), is_prod)?,
                api_key: get_env("GOOGLE_API_KEY", Some(&generation.api_key), is_prod)?,
                api_base: get_env("GENAI_API_BASE", Some(&generation.api_base), is_prod)?,
                timeout_secs: get_env(
                    "GENAI_TIMEOUT_SECS",
                    Some(&generation.timeout_secs.to_string()),
                    is_prod,
                )?
                .parse()
                .unwrap_or(generation.timeout_secs),
                prompt_preamble: get_env(
                    "CHAT_PROMPT_PREAMBLE",
                    Some(&generation.prompt_preamble),
                    is_prod,
                )?,
            },
            observability: ObservabilityConfig {
                log_level: env::var("LOG_LEVEL")
                    .unwrap_or(defaults.observability.log_level),
                otlp_endpoint: env::var("OTLP_ENDPOINT").ok().filter(|v| !v.is_empty()),
            },
        })
    }
}

impl Default for ChatConfig {
    /// Defaults used when nothing is configured: local listener on 5000,
    /// the dev frontend as the only origin, Gemini without a key.
    fn default() -> Self {
        Self {
            common: core_config::Config::default(),
            cors: CorsConfig {
                allowed_origin: DEFAULT_ALLOWED_ORIGIN.to_string(),
            },
            generation: GenerationConfig {
                provider: ProviderKind::Gemini,
                model: DEFAULT_TEXT_MODEL.to_string(),
                api_key: String::new(),
                api_base: DEFAULT_GENAI_API_BASE.to_string(),
                timeout_secs: DEFAULT_TIMEOUT_SECS,
                prompt_preamble: DEFAULT_PREAMBLE.to_string(),
            },
            observability: ObservabilityConfig {
                log_level: DEFAULT_LOG_LEVEL.to_string(),
                otlp_endpoint: None,
            },
        }
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
