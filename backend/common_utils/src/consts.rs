//! Commonly used constants

/// Prefix for environment variable overrides, e.g. `GATEWAY__PROXY__HTTPS_URL`.
pub const ENV_PREFIX: &str = "GATEWAY";

/// Environment variable selecting which config file to load.
pub const RUN_ENV: &str = "GATEWAY_ENV";

pub const NO_ERROR_CODE: &str = "No error code";
pub const NO_ERROR_MESSAGE: &str = "No error message";

/// Placeholder written over sensitive values in scrubbed transcripts.
pub const FILTERED: &str = "[FILTERED]";

pub const BASE64_ENGINE: base64::engine::GeneralPurpose = base64::engine::general_purpose::STANDARD;

/// Deployment environment, chooses the config file under `config/`.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    serde::Deserialize,
    serde::Serialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Env {
    #[default]
    Development,
    Sandbox,
    Production,
}

impl Env {
    /// Reads [`RUN_ENV`], falling back to `development` when unset or unknown.
    pub fn current_env() -> Self {
        std::env::var(RUN_ENV)
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }

    pub const fn config_path(self) -> &'static str {
        match self {
            Self::Development => "development.toml",
            Self::Sandbox => "sandbox.toml",
            Self::Production => "production.toml",
        }
    }
}
