use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

/// Default Gemini API base URL. Overridable for tests and proxies.
const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Clone, Deserialize)]
pub struct PresetConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub auth: AuthConfig,
    pub google: GoogleConfig,
    pub sheet: SheetConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Shared secret compared against the `password` field of generation
    /// requests.
    pub app_password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleConfig {
    pub api_key: String,
    pub api_base: String,
    /// Fixed model identifier. When set, model discovery is skipped.
    pub model: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SheetConfig {
    /// Archive webhook URL. When unset, archival is disabled and history
    /// reads fail open to an empty log.
    pub webhook_url: Option<String>,
}

impl PresetConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(PresetConfig {
            common,
            auth: AuthConfig {
                app_password: core_config::get_env("APP_PASSWORD", None, is_prod)?,
            },
            google: GoogleConfig {
                api_key: core_config::get_env("GEMINI_API_KEY", None, is_prod)?,
                api_base: env::var("GEMINI_API_BASE")
                    .unwrap_or_else(|_| DEFAULT_API_BASE.to_string()),
                model: env::var("GEMINI_MODEL").ok(),
            },
            sheet: SheetConfig {
                webhook_url: env::var("SHEET_WEBHOOK_URL").ok(),
            },
        })
    }
}
