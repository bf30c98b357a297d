use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Public Gemini REST endpoint.
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Model the storefront assistant was tuned against.
pub const DEFAULT_TEXT_MODEL: &str = "gemini-1.5-flash";

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub common: core_config::Config,
    pub google: GoogleConfig,
    pub models: ModelConfig,
    pub catalog: CatalogConfig,
}

#[derive(Debug, Clone)]
pub struct GoogleConfig {
    pub api_key: Secret<String>,
    pub api_base: String,
    /// Upper bound for one generateContent round trip. `None` waits for the
    /// provider indefinitely.
    pub request_timeout: Option<Duration>,
}

#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub text_model: String,
}

#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// JSON file replacing the built-in list of alternatives.
    pub path: Option<PathBuf>,
}

impl GatewayConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;
        Self::from_lookup(common, |key| env::var(key).ok())
    }

    /// Build the service settings from an arbitrary variable source.
    pub fn from_lookup<F>(common: core_config::Config, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let request_timeout = match get_optional(&lookup, "GEMINI_REQUEST_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.parse().map_err(|_| {
                    AppError::config(format!(
                        "GEMINI_REQUEST_TIMEOUT_SECS must be a whole number of seconds, got '{}'",
                        raw
                    ))
                })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(GatewayConfig {
            common,
            google: GoogleConfig {
                api_key: Secret::new(get_env(&lookup, "GOOGLE_API_KEY", None)?),
                api_base: get_env(&lookup, "GEMINI_API_BASE_URL", Some(DEFAULT_GEMINI_API_BASE))?,
                request_timeout,
            },
            models: ModelConfig {
                text_model: get_env(&lookup, "GENAI_TEXT_MODEL", Some(DEFAULT_TEXT_MODEL))?,
            },
            catalog: CatalogConfig {
                path: get_optional(&lookup, "CATALOG_PATH").map(PathBuf::from),
            },
        })
    }
}

fn get_optional<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).filter(|v| !v.trim().is_empty())
}

fn get_env<F>(lookup: &F, key: &str, default: Option<&str>) -> Result<String, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    match get_optional(lookup, key) {
        Some(val) => Ok(val),
        None => match default {
            Some(def) => Ok(def.to_string()),
            None => Err(AppError::config(format!("{} is required but not set", key))),
        },
    }
}
