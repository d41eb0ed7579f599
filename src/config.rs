//! Account orchestrator configuration parsed from environment variables.

use crate::error::ConfigError;

pub const DEFAULT_HOME_PATH: &str = "/";
pub const DEFAULT_FALLBACK_LOCALE: &str = "en";
pub const DEFAULT_SUPPORTED_LOCALES: &[&str] = &["en", "fr", "de", "es", "ru"];
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoteTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for RemoteTimeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountConfig {
    /// Base URL of the profile and sector REST API, without trailing slash.
    pub api_base_url: Option<String>,
    /// Route navigated to after login and logout.
    pub home_path: String,
    /// Locale used when a profile update carries none or an unknown one.
    pub fallback_locale: String,
    pub supported_locales: Vec<String>,
    pub timeouts: RemoteTimeouts,
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            api_base_url: None,
            home_path: DEFAULT_HOME_PATH.to_owned(),
            fallback_locale: DEFAULT_FALLBACK_LOCALE.to_owned(),
            supported_locales: DEFAULT_SUPPORTED_LOCALES.iter().map(|&l| l.to_owned()).collect(),
            timeouts: RemoteTimeouts::default(),
        }
    }
}

impl AccountConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `ACCOUNT_API_BASE_URL`: required only by the HTTP stores
    /// - `ACCOUNT_HOME_PATH`: default `/`
    /// - `ACCOUNT_FALLBACK_LOCALE`: default `en`
    /// - `ACCOUNT_SUPPORTED_LOCALES`: comma list, default `en,fr,de,es,ru`
    /// - `ACCOUNT_REQUEST_TIMEOUT_SECS`: default 30
    /// - `ACCOUNT_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns an error if the supported list is empty or does not contain
    /// the fallback locale.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_base_url = std::env::var("ACCOUNT_API_BASE_URL")
            .ok()
            .map(|url| url.trim().trim_end_matches('/').to_owned())
            .filter(|url| !url.is_empty());
        let home_path = std::env::var("ACCOUNT_HOME_PATH").unwrap_or_else(|_| DEFAULT_HOME_PATH.to_owned());
        let fallback_locale =
            std::env::var("ACCOUNT_FALLBACK_LOCALE").unwrap_or_else(|_| DEFAULT_FALLBACK_LOCALE.to_owned());
        let supported_locales = match std::env::var("ACCOUNT_SUPPORTED_LOCALES") {
            Ok(raw) => parse_locale_list(&raw)?,
            Err(_) => DEFAULT_SUPPORTED_LOCALES.iter().map(|&l| l.to_owned()).collect(),
        };
        if !supported_locales.contains(&fallback_locale) {
            return Err(ConfigError::Parse(format!(
                "fallback locale '{fallback_locale}' is not in ACCOUNT_SUPPORTED_LOCALES"
            )));
        }
        let timeouts = RemoteTimeouts {
            request_secs: env_parse_u64("ACCOUNT_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse_u64("ACCOUNT_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        };

        Ok(Self { api_base_url, home_path, fallback_locale, supported_locales, timeouts })
    }

    /// Base URL for the HTTP stores.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when `ACCOUNT_API_BASE_URL` was not set.
    pub fn require_api_base_url(&self) -> Result<&str, ConfigError> {
        self.api_base_url
            .as_deref()
            .ok_or_else(|| ConfigError::Missing { var: "ACCOUNT_API_BASE_URL".into() })
    }
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

fn parse_locale_list(raw: &str) -> Result<Vec<String>, ConfigError> {
    let locales: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_owned)
        .collect();
    if locales.is_empty() {
        return Err(ConfigError::Parse("ACCOUNT_SUPPORTED_LOCALES is empty".into()));
    }
    Ok(locales)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
